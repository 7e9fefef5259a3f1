//! Error types for pyembed-core

use thiserror::Error;

/// Result type alias using pyembed-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for pyembed
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Empty or otherwise unusable runtime version
    #[error("Invalid runtime version: {version:?}")]
    InvalidVersion { version: String },

    /// Architecture name not in the supported set
    #[error("Unknown architecture: {arch}. Valid architectures: win32 (x86), amd64 (x64)")]
    UnknownArchitecture { arch: String },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create an unknown architecture error
    pub fn unknown_architecture(arch: impl Into<String>) -> Self {
        Self::UnknownArchitecture { arch: arch.into() }
    }
}
