//! Table command

use anyhow::{Context, Result};
use lunarbuild_codegen::stage::Generation;
use lunarbuild_core::{SUCCESS, Status};

/// Print `id name` for every entry a generator would emit
pub fn run(config_path: &str, name: &str) -> Result<Status> {
    let config = super::load(config_path)?;
    let generator = config
        .generator(name)
        .with_context(|| format!("Unknown generator '{name}'"))?;

    let table = Generation::new(&config, generator)?
        .table()
        .with_context(|| format!("Failed to extract names for '{name}'"))?;

    for (id, entry) in table.iter() {
        println!("{id} {entry}");
    }
    tracing::info!("{} names", table.len());
    Ok(SUCCESS)
}
