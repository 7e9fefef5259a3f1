//! Fake extraction strategies
//!
//! `RecordingExtractor` stands in for msiexec/msiextract in pipeline tests:
//! it "extracts" a package by writing `<stem>.txt` holding the package bytes
//! and records every call. The shell scripts mimic the real tools closely
//! enough to exercise the real strategies on unix hosts.

use async_trait::async_trait;
use pyembed_fetch::{FetchError, PackageExtractor, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Record of one extraction call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractionCall {
    pub package: String,
    pub target_dir: PathBuf,
    pub content: Vec<u8>,
}

/// Extractor that writes `<stem>.txt` for every package it is given
#[derive(Clone, Default)]
pub struct RecordingExtractor {
    calls: Arc<Mutex<Vec<ExtractionCall>>>,
    fail_on: Option<String>,
}

impl RecordingExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with exit code 1 when asked to extract `package`
    pub fn failing_on(package: &str) -> Self {
        Self {
            calls: Arc::default(),
            fail_on: Some(package.to_string()),
        }
    }

    /// Packages extracted so far, in order
    pub fn packages(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.package.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<ExtractionCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageExtractor for RecordingExtractor {
    fn name(&self) -> &str {
        "recording"
    }

    async fn extract(&self, package: &Path, target_dir: &Path) -> Result<()> {
        let name = package.file_name().unwrap().to_string_lossy().into_owned();
        let content = fs::read(package).map_err(|e| FetchError::io("read package", e))?;

        self.calls.lock().unwrap().push(ExtractionCall {
            package: name.clone(),
            target_dir: target_dir.to_path_buf(),
            content: content.clone(),
        });

        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(FetchError::Extraction {
                tool: "recording".to_string(),
                package: package.to_path_buf(),
                code: Some(1),
            });
        }

        let stem = package.file_stem().unwrap().to_string_lossy().into_owned();
        fs::write(target_dir.join(format!("{}.txt", stem)), content)
            .map_err(|e| FetchError::io("write extracted file", e))?;
        Ok(())
    }
}

/// Write an executable shell script
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// Fake `msiextract -C <dir> <package>`: writes `<dir>/from-<package>`
#[cfg(unix)]
pub fn fake_msiextract(dir: &Path) -> PathBuf {
    let path = dir.join("msiextract");
    write_script(
        &path,
        r#"[ "$1" = "-C" ] || exit 2
cp "$3" "$2/from-$(basename "$3")"
echo "extracted $3"
"#,
    );
    path
}

/// Fake `msiexec TARGETDIR=<dir> /a <package> /qn`
///
/// Like the real administrative install it writes the payload into a
/// subdirectory and leaves a copy of the package in the target directory.
#[cfg(unix)]
pub fn fake_msiexec(dir: &Path) -> PathBuf {
    let path = dir.join("msiexec");
    write_script(
        &path,
        r#"target="${1#TARGETDIR=}"
[ "$2" = "/a" ] || exit 2
[ "$4" = "/qn" ] || exit 2
mkdir -p "$target/Lib"
cp "$3" "$target/Lib/from-$(basename "$3")"
cp "$3" "$target/$(basename "$3")"
"#,
    );
    path
}

/// Fake msiexec that always exits with `code`
#[cfg(unix)]
pub fn failing_tool(dir: &Path, name: &str, code: i32) -> PathBuf {
    let path = dir.join(name);
    write_script(&path, &format!("exit {}\n", code));
    path
}
