//! Runtime configuration types for operational parameters
//!
//! These types define configuration that controls runtime behavior like
//! the download mirror, network timeouts and the extraction tools used.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// External extraction tools
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Base URL of the release mirror, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-transfer timeout in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Show a progress bar per download
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
            show_progress: default_show_progress(),
        }
    }
}

impl NetworkConfig {
    /// Base URL with any trailing slashes removed
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_base_url() -> String {
    "https://www.python.org/ftp/python".to_string()
}
fn default_connect_timeout() -> u64 {
    5
}
fn default_download_timeout() -> u64 {
    300 // 5 minutes
}
fn default_user_agent() -> String {
    format!(
        "pyembed/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
fn default_show_progress() -> bool {
    true
}

/// Programs used to unpack installer packages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolsConfig {
    /// Native Windows installer, used in administrative-install mode
    #[serde(default = "default_msiexec")]
    pub msiexec: String,

    /// msitools converter used on every other host
    #[serde(default = "default_msiextract")]
    pub msiextract: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            msiexec: default_msiexec(),
            msiextract: default_msiextract(),
        }
    }
}

fn default_msiexec() -> String {
    "msiexec".to_string()
}
fn default_msiextract() -> String {
    "msiextract".to_string()
}
