#![allow(clippy::must_use_candidate)]

pub mod batch;
mod env;
mod loader;
pub mod providers;

use serde::Deserialize;

pub use batch::BatchConfig;
pub use providers::{FalConfig, FreepikConfig, ProvidersConfig};

/// Top-level adforge configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Image generation provider sections
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Batch pacing configuration
    #[serde(default)]
    pub batch: BatchConfig,
}
