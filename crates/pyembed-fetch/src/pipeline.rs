//! Download-and-materialize pipeline
//!
//! One run moves linearly through four steps:
//! 1. Reset: the output directory is deleted (if present) and recreated empty
//! 2. Installers: each package is fetched, extracted, then deleted
//! 3. Stdlib: the embeddable bundle's archives are added (when requested)
//! 4. Commit: the cache marker is written
//!
//! Any failure aborts the run. The output directory is then left as it was
//! at that point with no cache marker, so the next run starts over.

use crate::artifacts::{installer_url, packages_for};
use crate::download::ArtifactFetcher;
use crate::error::{FetchError, IoResultExt, Result};
use crate::extract::{select_extractor, PackageExtractor};
use crate::stdlib::{install_stdlib, StdlibInstall};
use pyembed_core::{should_skip, CacheMarker, RuntimeConfig, Settings};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Summary of a successful pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Directory that was populated
    pub output_dir: PathBuf,

    /// Installer packages that were extracted, in order
    pub packages: Vec<String>,

    /// Stdlib archives added from the embeddable bundle
    pub stdlib: Option<StdlibInstall>,

    /// Location of the written cache marker
    pub marker: PathBuf,
}

/// Outcome of [`Pipeline::run_with_cache`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The cache marker matched; nothing was touched
    Cached,
    /// The pipeline ran to completion
    Downloaded(PipelineReport),
}

/// Sequences fetch and extraction of every artifact into one directory
pub struct Pipeline {
    fetcher: ArtifactFetcher,
    extractor: Box<dyn PackageExtractor>,
    base_url: String,
}

impl Pipeline {
    /// Create a pipeline from explicit collaborators
    pub fn new(
        fetcher: ArtifactFetcher,
        extractor: Box<dyn PackageExtractor>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            base_url: base_url.into(),
        }
    }

    /// Create a pipeline for this host from runtime configuration
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let fetcher = ArtifactFetcher::new(&config.network)?;
        let extractor = select_extractor(&config.tools);
        debug!("Using {} for package extraction", extractor.name());
        Ok(Self::new(fetcher, extractor, config.network.base_url()))
    }

    /// Run the full pipeline for `settings` into `output_dir`
    pub async fn run(&self, settings: &Settings, output_dir: &Path) -> Result<PipelineReport> {
        info!("Downloading {} into {}", settings, output_dir.display());

        reset_output_dir(output_dir)?;

        let packages = packages_for(settings);
        for package in &packages {
            self.install_package(settings, package, output_dir).await?;
        }

        let stdlib = if settings.stdlib() {
            info!("Installing standard library archives");
            Some(
                install_stdlib(
                    &self.fetcher,
                    &self.base_url,
                    settings.version(),
                    settings.arch(),
                    settings.debug(),
                    output_dir,
                )
                .await?,
            )
        } else {
            None
        };

        let marker = CacheMarker::write(output_dir, settings)?;
        info!("Finished downloading {}", settings);

        Ok(PipelineReport {
            output_dir: output_dir.to_path_buf(),
            packages,
            stdlib,
            marker,
        })
    }

    /// Run the pipeline unless `use_cache` is set and the output directory
    /// already holds exactly these settings
    pub async fn run_with_cache(
        &self,
        settings: &Settings,
        output_dir: &Path,
        use_cache: bool,
    ) -> Result<RunOutcome> {
        if use_cache && should_skip(output_dir, settings) {
            return Ok(RunOutcome::Cached);
        }

        self.run(settings, output_dir)
            .await
            .map(RunOutcome::Downloaded)
    }

    /// Fetch, extract and delete a single installer package
    async fn install_package(
        &self,
        settings: &Settings,
        package: &str,
        output_dir: &Path,
    ) -> Result<()> {
        let url = installer_url(&self.base_url, settings.version(), settings.arch(), package);
        let package_path = output_dir.join(package);

        self.fetcher.fetch(&url, &package_path).await?;

        info!("Extracting {}", package);
        self.extractor.extract(&package_path, output_dir).await?;

        fs::remove_file(&package_path)
            .io_context(|| format!("Failed to remove {}", package_path.display()))?;

        Ok(())
    }
}

/// Delete `dir` recursively (ignoring absence) and recreate it empty
pub fn reset_output_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => debug!("Removed previous contents of {}", dir.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(FetchError::io(
                format!("Failed to remove {}", dir.display()),
                e,
            ));
        }
    }

    fs::create_dir_all(dir).io_context(|| format!("Failed to create {}", dir.display()))
}
