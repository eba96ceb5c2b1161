//! CLI command implementations

pub mod build;
pub mod clean;
pub mod generate;
pub mod table;

use anyhow::{Context, Result};
use lunarbuild_core::Config;

fn load(config_path: &str) -> Result<Config> {
    Config::load(config_path).with_context(|| format!("Failed to load manifest from {config_path}"))
}
