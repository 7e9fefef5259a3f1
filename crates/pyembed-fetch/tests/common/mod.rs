//! Common test infrastructure for pyembed-fetch tests
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: Versions, package names, test payloads
//! - `builders`: Settings and embeddable bundle construction
//! - `mock_server`: Wiremock setup helpers for mirror endpoints
//! - `extractors`: Fake `PackageExtractor` implementations and tool scripts

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod constants;
pub mod extractors;
pub mod mock_server;

pub use builders::*;
pub use constants::*;
pub use extractors::*;
pub use mock_server::*;
