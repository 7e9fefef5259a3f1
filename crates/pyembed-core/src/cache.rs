//! Cache marker persistence and validation
//!
//! After a fully successful download the output directory receives a small
//! marker file holding [`Settings::cache_string`]. A later run with caching
//! enabled compares that file byte-for-byte against the requested settings
//! and skips the download when they are identical. Anything else (missing,
//! unreadable, different) means the download runs again.

use crate::error::Result;
use crate::types::Settings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the cache marker inside the output directory
pub const CACHE_FILENAME: &str = ".version.toml";

/// Outcome of comparing a cache marker against requested settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No marker in the output directory
    Missing,
    /// Marker exists but could not be read
    Unreadable,
    /// Marker records different settings
    Mismatch,
    /// Marker is byte-identical to the requested settings
    Match,
}

impl CacheStatus {
    pub fn is_match(&self) -> bool {
        matches!(self, CacheStatus::Match)
    }
}

/// Fields recorded in a marker, used only to explain mismatches
#[derive(Debug, Deserialize, PartialEq)]
struct RecordedSettings {
    version: String,
    arch: String,
    debug: bool,
    stdlib: bool,
}

/// Accessor for the cache marker of an output directory
pub struct CacheMarker;

impl CacheMarker {
    /// Path of the marker inside `output_dir`
    pub fn path(output_dir: &Path) -> PathBuf {
        output_dir.join(CACHE_FILENAME)
    }

    /// Write the marker for `settings`, replacing any previous one
    pub fn write(output_dir: &Path, settings: &Settings) -> Result<PathBuf> {
        let path = Self::path(output_dir);
        fs::write(&path, settings.cache_string())?;
        debug!("Wrote cache marker {}", path.display());
        Ok(path)
    }

    /// Read the marker contents, if present
    pub fn read(output_dir: &Path) -> Result<Option<String>> {
        let path = Self::path(output_dir);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Compare the marker in `output_dir` against `settings`
pub fn check_cache(output_dir: &Path, settings: &Settings) -> CacheStatus {
    match CacheMarker::read(output_dir) {
        Ok(None) => {
            info!("Cache does not exist");
            CacheStatus::Missing
        }
        Ok(Some(recorded)) if recorded == settings.cache_string() => {
            info!("Cached settings are identical, skipping download");
            CacheStatus::Match
        }
        Ok(Some(recorded)) => {
            info!("Cache does not match");
            explain_mismatch(&recorded, settings);
            CacheStatus::Mismatch
        }
        Err(e) => {
            info!("Cache could not be read: {}", e);
            CacheStatus::Unreadable
        }
    }
}

/// True only when the marker exists and matches `settings` exactly
pub fn should_skip(output_dir: &Path, settings: &Settings) -> bool {
    check_cache(output_dir, settings).is_match()
}

fn explain_mismatch(recorded: &str, settings: &Settings) {
    let Ok(recorded) = toml::from_str::<RecordedSettings>(recorded) else {
        debug!("Cache marker is not in the expected format");
        return;
    };

    if recorded.version != settings.version() {
        debug!("version: cached {}, requested {}", recorded.version, settings.version());
    }
    if recorded.arch != settings.arch().url_name() {
        debug!("arch: cached {}, requested {}", recorded.arch, settings.arch());
    }
    if recorded.debug != settings.debug() {
        debug!("debug: cached {}, requested {}", recorded.debug, settings.debug());
    }
    if recorded.stdlib != settings.stdlib() {
        debug!("stdlib: cached {}, requested {}", recorded.stdlib, settings.stdlib());
    }
}
