//! Build command

use anyhow::Result;
use lunarbuild_core::{SUCCESS, Status};

use crate::plan;

/// Run every stage in order, stopping at the first failure
pub fn run(config_path: &str, release: bool, force: bool) -> Result<Status> {
    let config = super::load(config_path)?;
    let release = release || config.project.release;

    tracing::info!(
        "Building '{}' ({})",
        config.project.name,
        if release { "release" } else { "debug" }
    );

    let pipeline = plan::build_pipeline(&config, release)?;

    let status = pipeline.run(&plan::context(&config, force));
    if status == SUCCESS {
        tracing::info!("Build complete ({} stages)", pipeline.len());
    } else {
        tracing::error!("Build failed with status {}", status);
    }
    Ok(status)
}
