//! Standard library archives from the embeddable runtime bundle
//!
//! The embeddable distribution ships the compiled standard library as a
//! nested zip (e.g. `python311.zip`). It can't be rebuilt locally because the
//! interpreter running this tool may not match the requested version, so the
//! bundle is downloaded and only its nested archives are kept.

use crate::artifacts::{debug_name, embed_bundle_name, embed_bundle_url};
use crate::download::ArtifactFetcher;
use crate::error::{FetchError, IoResultExt, Result};
use pyembed_core::Architecture;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension of the nested archives kept from the bundle
const ARCHIVE_SUFFIX: &str = ".zip";

/// Files written by [`install_stdlib`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StdlibInstall {
    /// Nested archives extracted from the bundle
    pub archives: Vec<PathBuf>,

    /// Debug-named copies of those archives
    pub debug_copies: Vec<PathBuf>,
}

/// Download the embeddable bundle and extract its nested stdlib archives
///
/// When `debug` is set every extracted archive also gets a `_d` copy, which
/// is the name the debug runtime looks for. The bundle itself is deleted
/// afterwards.
pub async fn install_stdlib(
    fetcher: &ArtifactFetcher,
    base_url: &str,
    version: &str,
    arch: Architecture,
    debug: bool,
    output_dir: &Path,
) -> Result<StdlibInstall> {
    let bundle_path = output_dir.join(embed_bundle_name(version, arch));
    let url = embed_bundle_url(base_url, version, arch);

    fetcher.fetch(&url, &bundle_path).await?;

    let install = extract_stdlib_archives(&bundle_path, output_dir, debug)?;

    fs::remove_file(&bundle_path)
        .io_context(|| format!("Failed to remove {}", bundle_path.display()))?;

    Ok(install)
}

/// Extract every top-level `.zip` entry of `bundle` into `output_dir`
pub fn extract_stdlib_archives(
    bundle: &Path,
    output_dir: &Path,
    debug: bool,
) -> Result<StdlibInstall> {
    let file = File::open(bundle).io_context(|| format!("Failed to open {}", bundle.display()))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| FetchError::Archive {
        path: bundle.to_path_buf(),
        source: e,
    })?;

    let mut install = StdlibInstall::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| FetchError::Archive {
            path: bundle.to_path_buf(),
            source: e,
        })?;

        if entry.is_dir() || !entry.name().ends_with(ARCHIVE_SUFFIX) {
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping unsafe archive entry: {}", entry.name());
            continue;
        };

        let dest_path = output_dir.join(&relative);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)
                .io_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut dest_file = File::create(&dest_path)
            .io_context(|| format!("Failed to create {}", dest_path.display()))?;
        io::copy(&mut entry, &mut dest_file)
            .io_context(|| format!("Failed to extract {}", dest_path.display()))?;
        info!("Extracted {}", entry.name());

        if debug {
            let Some(file_name) = dest_path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let debug_path = output_dir.join(debug_name(file_name));
            fs::copy(&dest_path, &debug_path)
                .io_context(|| format!("Failed to create {}", debug_path.display()))?;
            debug!("Copied {} to {}", dest_path.display(), debug_path.display());
            install.debug_copies.push(debug_path);
        }

        install.archives.push(dest_path);
    }

    Ok(install)
}
