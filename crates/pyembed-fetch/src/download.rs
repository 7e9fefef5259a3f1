//! Streaming artifact download
//!
//! Fetches a single remote file straight to disk. The body is written chunk
//! by chunk as it arrives, so memory use stays bounded regardless of the
//! artifact size. There are no retries and no resumption: a failed download
//! is reported and the caller aborts.

use crate::error::{FetchError, IoResultExt, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use pyembed_core::NetworkConfig;
use reqwest::header::CONTENT_LENGTH;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Download progress information
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    /// Total bytes to download (0 when the server did not say)
    pub total_bytes: u64,

    /// Bytes downloaded so far
    pub downloaded_bytes: u64,
}

impl DownloadProgress {
    /// Create a new progress tracker
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            downloaded_bytes: 0,
        }
    }

    /// Record another received chunk
    pub fn advance(&mut self, bytes: u64) {
        self.downloaded_bytes += bytes;
    }
}

/// Fetches remote artifacts to local files
#[derive(Debug, Clone)]
pub struct ArtifactFetcher {
    /// HTTP client
    client: reqwest::Client,

    /// Show a progress bar per download
    show_progress: bool,
}

impl ArtifactFetcher {
    /// Create a fetcher from the network configuration
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.download_timeout_secs))
            .build()
            .map_err(|e| FetchError::Network {
                url: config.base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            client,
            show_progress: config.show_progress,
        })
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download `url` into a newly created file at `destination`
    ///
    /// Returns the number of bytes written. A non-success status fails
    /// before the destination file is created.
    pub async fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let total_size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|ct| ct.to_str().ok())
            .and_then(|ct| ct.parse::<u64>().ok())
            .unwrap_or(0);

        let file_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url.to_string());

        if total_size > 0 {
            info!("Downloading {} ({})", file_name, human_readable_size(total_size));
        } else {
            info!("Downloading {}", file_name);
        }

        let progress_bar = self.progress_bar(total_size, &file_name);

        let mut file = File::create(destination)
            .io_context(|| format!("Failed to create {}", destination.display()))?;

        let mut progress = DownloadProgress::new(total_size);
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk: bytes::Bytes = chunk_result.map_err(|e| network_error(url, e))?;
            file.write_all(&chunk)
                .io_context(|| format!("Failed to write {}", destination.display()))?;

            progress.advance(chunk.len() as u64);

            if let Some(pb) = &progress_bar {
                pb.set_position(progress.downloaded_bytes);
            }
        }

        file.flush()
            .io_context(|| format!("Failed to write {}", destination.display()))?;

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        debug!(
            "Downloaded {} bytes to {}",
            progress.downloaded_bytes,
            destination.display()
        );

        Ok(progress.downloaded_bytes)
    }

    fn progress_bar(&self, total_size: u64, file_name: &str) -> Option<ProgressBar> {
        if !self.show_progress || total_size == 0 {
            return None;
        }

        let pb = ProgressBar::new(total_size);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(format!("Downloading {}", file_name));
        Some(pb)
    }
}

fn network_error(url: &str, source: reqwest::Error) -> FetchError {
    FetchError::Network {
        url: url.to_string(),
        source,
    }
}

/// Convert bytes to human-readable size
fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}
