//! Settings describing which runtime build to fetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Target architecture of the downloaded runtime
///
/// Each variant carries two names: the one used by the download mirror
/// (`win32`/`amd64`) and the one used for local directory naming
/// (`x86`/`x64`). Either name is accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// 32-bit x86
    Win32,
    /// 64-bit x86-64
    Amd64,
}

impl Architecture {
    /// Name used when building download URLs and in the cache marker
    pub fn url_name(&self) -> &'static str {
        match self {
            Architecture::Win32 => "win32",
            Architecture::Amd64 => "amd64",
        }
    }

    /// Name used for local directory naming
    pub fn dir_name(&self) -> &'static str {
        match self {
            Architecture::Win32 => "x86",
            Architecture::Amd64 => "x64",
        }
    }

    /// Architecture matching the pointer width of the running process
    pub fn host() -> Self {
        if cfg!(target_pointer_width = "64") {
            Architecture::Amd64
        } else {
            Architecture::Win32
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url_name())
    }
}

impl std::str::FromStr for Architecture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "win32" | "x86" => Ok(Architecture::Win32),
            "amd64" | "x64" => Ok(Architecture::Amd64),
            _ => Err(Error::unknown_architecture(s)),
        }
    }
}

/// Immutable description of what to download
///
/// Two settings with identical fields always produce identical
/// [`Settings::cache_string`] output, which is what the cache check compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Settings {
    version: String,
    arch: Architecture,
    debug: bool,
    stdlib: bool,
}

impl Settings {
    /// Create new settings
    ///
    /// The version is not validated beyond being non-empty; a bogus version
    /// only shows up later as a failed download.
    pub fn new(
        version: impl Into<String>,
        arch: Architecture,
        debug: bool,
        stdlib: bool,
    ) -> Result<Self> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(Error::invalid_version(version));
        }

        Ok(Self {
            version,
            arch,
            debug,
            stdlib,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn arch(&self) -> Architecture {
        self.arch
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn stdlib(&self) -> bool {
        self.stdlib
    }

    /// Name of the default output directory, e.g. `py-3.11.5-x64`
    pub fn default_dir_name(&self) -> String {
        format!("py-{}-{}", self.version, self.arch.dir_name())
    }

    /// Default output directory rooted at `root`
    pub fn default_output_dir_in(&self, root: &Path) -> PathBuf {
        root.join(self.default_dir_name())
    }

    /// Default output directory, placed beside the running executable
    pub fn default_output_dir(&self) -> PathBuf {
        self.default_output_dir_in(&crate::utils::tool_dir())
    }

    /// Serialize these settings into the cache marker format
    ///
    /// The output is a small TOML document with the keys in a fixed order,
    /// booleans as lowercase literals and strings as basic strings.
    pub fn cache_string(&self) -> String {
        format!(
            "version = {}\narch = {}\ndebug = {}\nstdlib = {}\n",
            toml_basic_string(&self.version),
            toml_basic_string(self.arch.url_name()),
            self.debug,
            self.stdlib,
        )
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Python {} ({}), debug: {}, stdlib: {}",
            self.version,
            self.arch,
            if self.debug { "yes" } else { "no" },
            if self.stdlib { "yes" } else { "no" },
        )
    }
}

/// Quote a string as a TOML basic string
fn toml_basic_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
