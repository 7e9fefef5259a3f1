//! Builders for settings, fetchers and embeddable bundles

use pyembed_core::{Architecture, NetworkConfig, Settings};
use pyembed_fetch::ArtifactFetcher;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

use super::constants::*;

/// Settings for 3.11.5 on amd64 with the given flags
pub fn settings(debug: bool, stdlib: bool) -> Settings {
    Settings::new(VERSION_3_11_5, Architecture::Amd64, debug, stdlib).unwrap()
}

/// Fetcher with progress bars disabled
pub fn quiet_fetcher() -> ArtifactFetcher {
    ArtifactFetcher::new(&NetworkConfig::default())
        .unwrap()
        .with_progress(false)
}

/// Build an in-memory zip with the given entries
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A bundle shaped like the real embeddable distribution
pub fn embed_bundle() -> Vec<u8> {
    zip_bytes(&[
        ("python.exe", b"exe"),
        ("python311.dll", b"dll"),
        ("python311._pth", b"python311.zip\n."),
        (STDLIB_ZIP, STDLIB_CONTENT),
    ])
}
