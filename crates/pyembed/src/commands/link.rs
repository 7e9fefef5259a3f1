//! Link command
//!
//! Points an `x64`/`x86` directory symlink beside this tool at the install
//! directory of an existing interpreter. On Windows that directory holds the
//! interpreter, its headers and import libraries, which is all an embedding
//! build needs.

use anyhow::{Context, Result};
use pyembed_core::utils::tool_dir;
use pyembed_core::Architecture;
use pyembed_fetch::FetchError;
use std::path::{Path, PathBuf};

use crate::cli::LinkArgs;
use crate::output;

pub fn run(args: LinkArgs) -> Result<()> {
    if !cfg!(windows) {
        return Err(FetchError::unsupported_platform("link", "windows").into());
    }

    let python = resolve_python(args.python)?;
    let install_dir = python
        .parent()
        .with_context(|| format!("{} has no parent directory", python.display()))?;
    let link = link_path(&tool_dir());

    create_link(install_dir, &link)?;

    output::success(&format!(
        "Linked {} -> {}",
        link.display(),
        install_dir.display()
    ));
    Ok(())
}

/// Interpreter to link: the given path, or the first `python` on PATH
fn resolve_python(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => std::path::absolute(&path)
            .with_context(|| format!("Failed to resolve {}", path.display())),
        None => which::which("python").context("No python interpreter found on PATH"),
    }
}

/// Link location inside `root`, named after the host architecture
fn link_path(root: &Path) -> PathBuf {
    root.join(Architecture::host().dir_name())
}

#[cfg(windows)]
fn create_link(target: &Path, link: &Path) -> Result<()> {
    if std::fs::symlink_metadata(link).is_ok() {
        std::fs::remove_dir(link)
            .with_context(|| format!("Failed to remove existing {}", link.display()))?;
    }

    std::os::windows::fs::symlink_dir(target, link).with_context(|| {
        format!(
            "Failed to link {} to {}",
            link.display(),
            target.display()
        )
    })
}

#[cfg(not(windows))]
fn create_link(_target: &Path, _link: &Path) -> Result<()> {
    Err(FetchError::unsupported_platform("link", "windows").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_path_uses_directory_arch_name() {
        let link = link_path(Path::new("tools"));
        let name = link.file_name().unwrap().to_str().unwrap();

        assert!(name == "x64" || name == "x86");
        assert_eq!(name, Architecture::host().dir_name());
    }

    #[test]
    fn test_explicit_python_is_made_absolute() {
        let python = resolve_python(Some(PathBuf::from("bin/python"))).unwrap();
        assert!(python.is_absolute());
        assert!(python.ends_with("bin/python"));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_unsupported_outside_windows() {
        let err = run(LinkArgs { python: None }).unwrap_err();
        let fetch_err = err.downcast_ref::<FetchError>().unwrap();

        assert!(matches!(fetch_err, FetchError::UnsupportedPlatform { .. }));
    }
}
