//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};
use pyembed_core::Architecture;
use std::path::PathBuf;

/// pyembed - Fetch the Python embeddable runtime
#[derive(Parser, Debug)]
#[command(name = "pyembed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and unpack a runtime into a directory
    Download(DownloadArgs),

    /// Link the current interpreter's directory beside this tool (Windows only)
    Link(LinkArgs),

    /// Show version information
    Version(VersionArgs),
}

// Download command
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Runtime version, e.g. 3.11.5
    #[arg(id = "runtime_version", value_name = "VERSION")]
    pub version: String,

    /// Target architecture (win32/x86 or amd64/x64)
    #[arg(value_parser = parse_architecture)]
    pub arch: Architecture,

    /// Include debug binaries (default)
    #[arg(long, overrides_with = "no_debug")]
    pub debug: bool,

    /// Skip debug binaries
    #[arg(long, overrides_with = "debug")]
    pub no_debug: bool,

    /// Include the standard library (default)
    #[arg(long, overrides_with = "no_stdlib")]
    pub stdlib: bool,

    /// Skip the standard library
    #[arg(long, overrides_with = "stdlib")]
    pub no_stdlib: bool,

    /// Output directory (default: py-<version>-<arch> beside this tool)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Skip the download when the directory already holds these settings
    #[arg(long, overrides_with = "no_cache")]
    pub cache: bool,

    /// Always download (default)
    #[arg(long, overrides_with = "cache")]
    pub no_cache: bool,

    /// Release mirror to download from
    #[arg(long)]
    pub base_url: Option<String>,
}

impl DownloadArgs {
    pub fn include_debug(&self) -> bool {
        !self.no_debug
    }

    pub fn include_stdlib(&self) -> bool {
        !self.no_stdlib
    }

    pub fn use_cache(&self) -> bool {
        self.cache && !self.no_cache
    }
}

fn parse_architecture(s: &str) -> Result<Architecture, String> {
    s.parse().map_err(|e: pyembed_core::Error| e.to_string())
}

// Link command
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Python interpreter to link (default: first `python` on PATH)
    #[arg(long)]
    pub python: Option<PathBuf>,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
