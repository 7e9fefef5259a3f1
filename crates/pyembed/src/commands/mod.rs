//! CLI command implementations

pub mod download;
pub mod link;
pub mod version;
