//! Type definitions for pyembed settings and runtime configuration

mod runtime_config;
mod settings;

pub use runtime_config::*;
pub use settings::*;
