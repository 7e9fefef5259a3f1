//! Download and extraction pipeline for pyembed
//!
//! Provides:
//! - Streaming artifact download with progress tracking
//! - Installer package extraction (msiexec on Windows, msiextract elsewhere)
//! - Standard library archives from the embeddable runtime bundle
//! - The pipeline that sequences all of the above into one output directory
//!
//! # Example
//!
//! ```no_run
//! use pyembed_core::{Architecture, HierarchicalConfigLoader, Settings};
//! use pyembed_fetch::Pipeline;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = HierarchicalConfigLoader::new()?.load_runtime_config()?;
//!     let settings = Settings::new("3.11.5", Architecture::Amd64, false, false)?;
//!
//!     let pipeline = Pipeline::from_config(&config)?;
//!     let report = pipeline.run(&settings, Path::new("py-3.11.5-x64")).await?;
//!
//!     println!("Installed {:?}", report.packages);
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod download;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod stdlib;

pub use download::{ArtifactFetcher, DownloadProgress};
pub use error::{FetchError, Result};
pub use extract::{
    select_extractor, MsiexecExtractor, MsiextractExtractor, PackageExtractor,
    MSIEXEC_CANT_OPEN_EXIT_CODE,
};
pub use pipeline::{reset_output_dir, Pipeline, PipelineReport, RunOutcome};
pub use stdlib::{install_stdlib, StdlibInstall};
