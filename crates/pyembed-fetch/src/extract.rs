//! Installer package extraction
//!
//! Two strategies unpack an MSI into a directory:
//! - [`MsiexecExtractor`] runs the native Windows installer in administrative
//!   install mode. msiexec refuses to extract into the directory holding the
//!   package, so it extracts into a scratch directory which is then
//!   merge-copied into the target.
//! - [`MsiextractExtractor`] runs msitools' `msiextract` on every other host.
//!
//! The strategy is picked once per run by [`select_extractor`].

use crate::error::{FetchError, IoResultExt, Result};
use async_trait::async_trait;
use pyembed_core::ToolsConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// msiexec exit status for "cannot open the installation package"
///
/// In practice this means the target directory is not writable.
pub const MSIEXEC_CANT_OPEN_EXIT_CODE: i32 = 2203;

/// Unpacks an installer package into a directory
#[async_trait]
pub trait PackageExtractor: Send + Sync {
    /// Name of the underlying tool, for logs and errors
    fn name(&self) -> &str;

    /// Expand every file installed by `package` into `target_dir`
    ///
    /// Existing files in `target_dir` are kept or overwritten, never cleared.
    /// The package file itself is left in place.
    async fn extract(&self, package: &Path, target_dir: &Path) -> Result<()>;
}

/// Pick the extraction strategy for the running host
pub fn select_extractor(tools: &ToolsConfig) -> Box<dyn PackageExtractor> {
    if cfg!(windows) {
        Box::new(MsiexecExtractor::new(&tools.msiexec))
    } else {
        Box::new(MsiextractExtractor::new(&tools.msiextract))
    }
}

/// Native extraction through `msiexec /a`
pub struct MsiexecExtractor {
    program: String,
}

impl MsiexecExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl PackageExtractor for MsiexecExtractor {
    fn name(&self) -> &str {
        &self.program
    }

    async fn extract(&self, package: &Path, target_dir: &Path) -> Result<()> {
        let scratch = TempDir::new().io_context(|| "Failed to create scratch directory")?;
        let scratch_path = scratch.path().to_path_buf();

        debug!(
            "{} TARGETDIR={} /a {} /qn",
            self.program,
            scratch_path.display(),
            package.display()
        );

        let status = Command::new(&self.program)
            .arg(format!("TARGETDIR={}", scratch_path.display()))
            .arg("/a")
            .arg(package)
            .arg("/qn")
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| FetchError::ExtractorUnavailable {
                tool: self.program.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(msiexec_failure(&self.program, package, status.code()));
        }

        let target = target_dir.to_path_buf();
        tokio::task::spawn_blocking(move || -> Result<()> {
            // Administrative installs leave a copy of the package behind
            let removed = remove_nested_packages(&scratch_path)?;
            if removed > 0 {
                debug!("Removed {} package copies from scratch directory", removed);
            }
            merge_copy(&scratch_path, &target)
        })
        .await
        .map_err(|e| FetchError::io("Extraction task failed", std::io::Error::other(e)))??;

        scratch
            .close()
            .io_context(|| "Failed to remove scratch directory")?;

        Ok(())
    }
}

/// Advisory shown for msiexec exit codes with a known likely cause
fn msiexec_advisory(code: Option<i32>) -> Option<&'static str> {
    match code {
        Some(MSIEXEC_CANT_OPEN_EXIT_CODE) => {
            Some("Do you have permission to write to the output dir?")
        }
        _ => None,
    }
}

/// Error for a failed msiexec run, logging the advisory when there is one
fn msiexec_failure(program: &str, package: &Path, code: Option<i32>) -> FetchError {
    if let Some(advisory) = msiexec_advisory(code) {
        warn!("{}", advisory);
    }

    FetchError::Extraction {
        tool: program.to_string(),
        package: package.to_path_buf(),
        code,
    }
}

/// Cross-platform extraction through msitools' `msiextract`
pub struct MsiextractExtractor {
    program: String,
}

impl MsiextractExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl PackageExtractor for MsiextractExtractor {
    fn name(&self) -> &str {
        &self.program
    }

    async fn extract(&self, package: &Path, target_dir: &Path) -> Result<()> {
        debug!(
            "{} -C {} {}",
            self.program,
            target_dir.display(),
            package.display()
        );

        let status = Command::new(&self.program)
            .arg("-C")
            .arg(target_dir)
            .arg(package)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .await
            .map_err(|e| FetchError::ExtractorUnavailable {
                tool: self.program.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(FetchError::Extraction {
                tool: self.program.clone(),
                package: package.to_path_buf(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Delete every `.msi` file below `dir`, returning how many were removed
pub fn remove_nested_packages(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            FetchError::io(
                format!("Failed to walk {}", dir.display()),
                std::io::Error::other(e),
            )
        })?;

        if entry.file_type().is_file() && is_installer_package(entry.path()) {
            fs::remove_file(entry.path())
                .io_context(|| format!("Failed to remove {}", entry.path().display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn is_installer_package(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("msi"))
}

/// Copy the tree under `src` into `dst`
///
/// Directories are created as needed and files already present in `dst`
/// are overwritten; nothing in `dst` is removed.
pub fn merge_copy(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).io_context(|| format!("Failed to create {}", dst.display()))?;

    let mut copied = 0usize;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| {
            FetchError::io(
                format!("Failed to walk {}", src.display()),
                std::io::Error::other(e),
            )
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| FetchError::io("Failed to resolve relative path", std::io::Error::other(e)))?;
        let target: PathBuf = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .io_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .io_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target).io_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }

    info!("Merged {} files into {}", copied, dst.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_copy_into_existing_tree() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        fs::create_dir_all(src.path().join("Lib/site-packages")).unwrap();
        fs::write(src.path().join("python.exe"), b"new").unwrap();
        fs::write(src.path().join("Lib/site-packages/README.txt"), b"readme").unwrap();

        fs::write(dst.path().join("python.exe"), b"old").unwrap();
        fs::write(dst.path().join("keep.txt"), b"keep").unwrap();

        merge_copy(src.path(), dst.path()).unwrap();

        assert_eq!(fs::read(dst.path().join("python.exe")).unwrap(), b"new");
        assert_eq!(fs::read(dst.path().join("keep.txt")).unwrap(), b"keep");
        assert_eq!(
            fs::read(dst.path().join("Lib/site-packages/README.txt")).unwrap(),
            b"readme"
        );
    }

    #[test]
    fn test_merge_copy_creates_missing_target() {
        let src = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let dst = root.path().join("out");

        fs::write(src.path().join("python3.dll"), b"dll").unwrap();
        merge_copy(src.path(), &dst).unwrap();

        assert!(dst.join("python3.dll").is_file());
    }

    #[test]
    fn test_remove_nested_packages() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("core.msi"), b"msi").unwrap();
        fs::write(dir.path().join("sub/DEV.MSI"), b"msi").unwrap();
        fs::write(dir.path().join("python.exe"), b"exe").unwrap();

        let removed = remove_nested_packages(dir.path()).unwrap();

        assert_eq!(removed, 2);
        assert!(!dir.path().join("core.msi").exists());
        assert!(!dir.path().join("sub/DEV.MSI").exists());
        assert!(dir.path().join("python.exe").exists());
    }

    #[test]
    fn test_msiexec_permission_failure() {
        let package = Path::new("out/core.msi");
        assert_eq!(
            msiexec_advisory(Some(2203)),
            Some("Do you have permission to write to the output dir?")
        );

        let err = msiexec_failure("msiexec", package, Some(2203));

        assert!(matches!(
            &err,
            FetchError::Extraction { tool, package: p, code: Some(2203) }
                if tool == "msiexec" && p == package
        ));
        assert!(err.to_string().contains("exit code 2203"));
    }

    #[test]
    fn test_msiexec_other_failures_have_no_advisory() {
        for code in [Some(1), Some(1603), Some(155), None] {
            assert_eq!(msiexec_advisory(code), None);

            let err = msiexec_failure("msiexec", Path::new("core.msi"), code);
            assert!(matches!(err, FetchError::Extraction { code: c, .. } if c == code));
        }
    }

    #[test]
    fn test_select_extractor_for_host() {
        let extractor = select_extractor(&ToolsConfig::default());
        if cfg!(windows) {
            assert_eq!(extractor.name(), "msiexec");
        } else {
            assert_eq!(extractor.name(), "msiextract");
        }
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let dir = TempDir::new().unwrap();
        let package = dir.path().join("core.msi");
        fs::write(&package, b"not really an msi").unwrap();

        let extractor = MsiextractExtractor::new("pyembed-no-such-extractor");
        let err = extractor.extract(&package, dir.path()).await.unwrap_err();

        assert!(matches!(err, FetchError::ExtractorUnavailable { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_extraction_error() {
        let dir = TempDir::new().unwrap();
        let package = dir.path().join("core.msi");
        fs::write(&package, b"not really an msi").unwrap();

        // `false` ignores its arguments and exits 1
        let extractor = MsiextractExtractor::new("false");
        let err = extractor.extract(&package, dir.path()).await.unwrap_err();

        assert!(matches!(
            err,
            FetchError::Extraction { code: Some(1), .. }
        ));
    }
}
