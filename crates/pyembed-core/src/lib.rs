//! # pyembed-core
//!
//! Core library for pyembed providing:
//! - The `Settings` value object describing which runtime to fetch
//! - Cache marker persistence and the cache-validity check
//! - Runtime configuration (mirror URL, timeouts, extraction tools)

pub mod cache;
pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use cache::{check_cache, should_skip, CacheMarker, CacheStatus, CACHE_FILENAME};
pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::{Architecture, NetworkConfig, RuntimeConfig, Settings, ToolsConfig};
