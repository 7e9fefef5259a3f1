//! Version command

use crate::cli::VersionArgs;
use anyhow::Result;
use serde::Serialize;
use std::fmt;

/// Build the tool reports about itself
#[derive(Debug, Serialize)]
struct BuildInfo {
    version: &'static str,
    os: &'static str,
    arch: &'static str,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pyembed {} ({}-{})", self.version, self.os, self.arch)
    }
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = BuildInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info);
    }

    Ok(())
}
