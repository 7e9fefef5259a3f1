//! Shared constants for test infrastructure

// Runtime versions
pub const VERSION_3_11_5: &str = "3.11.5";
pub const VERSION_3_12_1: &str = "3.12.1";

// Installer packages
pub const CORE_MSI: &str = "core.msi";
pub const DEV_MSI: &str = "dev.msi";
pub const LIB_MSI: &str = "lib.msi";

// Nested stdlib archive shipped in the embeddable bundle
pub const STDLIB_ZIP: &str = "python311.zip";
pub const STDLIB_DEBUG_ZIP: &str = "python311_d.zip";

// Payloads
pub const FAKE_MSI_CONTENT: &[u8] = b"fake msi content for testing";
pub const STDLIB_CONTENT: &[u8] = b"compiled standard library";

/// Marker text for 3.11.5 / amd64 / no debug / no stdlib
pub const MINIMAL_MARKER: &str =
    "version = \"3.11.5\"\narch = \"amd64\"\ndebug = false\nstdlib = false\n";
