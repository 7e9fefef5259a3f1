//! Error types for pyembed-fetch

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using pyembed-fetch's Error type
pub type Result<T> = std::result::Result<T, FetchError>;

/// Failures of the download-and-extract pipeline
///
/// Nothing in the pipeline retries; every variant aborts the run and is
/// returned to the caller unchanged.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection failure, timeout, or broken body stream
    #[error("Network error while fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("Download of {url} failed with status: {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Extraction tool exited unsuccessfully
    #[error("{tool} failed to extract {}{}", .package.display(), exit_code_suffix(.code))]
    Extraction {
        tool: String,
        package: PathBuf,
        code: Option<i32>,
    },

    /// Extraction tool could not be started
    #[error("Failed to run {tool}: {source}")]
    ExtractorUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Downloaded bundle is not a readable zip archive
    #[error("Invalid archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Local filesystem operation failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Operation requires a different host platform
    #[error("{operation} is only supported on {required}, not {platform}")]
    UnsupportedPlatform {
        operation: String,
        required: String,
        platform: String,
    },

    /// Configuration or settings error from pyembed-core
    #[error(transparent)]
    Core(#[from] pyembed_core::Error),
}

impl FetchError {
    /// Wrap an IO error with a description of what was being done
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an unsupported platform error for the running host
    pub fn unsupported_platform(
        operation: impl Into<String>,
        required: impl Into<String>,
    ) -> Self {
        Self::UnsupportedPlatform {
            operation: operation.into(),
            required: required.into(),
            platform: std::env::consts::OS.to_string(),
        }
    }

    /// True for failures talking to the remote mirror
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::HttpStatus { .. })
    }

    /// True for failures of the extraction tools
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Self::Extraction { .. } | Self::ExtractorUnavailable { .. }
        )
    }
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {})", code),
        None => " (terminated by signal)".to_string(),
    }
}

/// Attach a context message to IO results
pub(crate) trait IoResultExt<T> {
    fn io_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn io_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| FetchError::io(f(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_message() {
        let err = FetchError::Extraction {
            tool: "msiextract".to_string(),
            package: PathBuf::from("core.msi"),
            code: Some(1),
        };
        assert_eq!(err.to_string(), "msiextract failed to extract core.msi (exit code 1)");
        assert!(err.is_extraction());
        assert!(!err.is_network());
    }

    #[test]
    fn test_io_context() {
        let result: std::io::Result<()> = Err(std::io::Error::other("disk full"));
        let err = result.io_context(|| "Failed to write core.msi").unwrap_err();
        assert_eq!(err.to_string(), "Failed to write core.msi: disk full");
    }

    #[test]
    fn test_unsupported_platform() {
        let err = FetchError::unsupported_platform("Linking the host interpreter", "windows");
        assert!(err
            .to_string()
            .starts_with("Linking the host interpreter is only supported on windows"));
    }
}
