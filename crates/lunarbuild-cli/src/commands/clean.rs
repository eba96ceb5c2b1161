//! Clean command

use anyhow::{Context, Result};
use lunarbuild_core::{SUCCESS, Status, fsutil};

use crate::plan;

/// Delete every file the pipeline would write
pub fn run(config_path: &str) -> Result<Status> {
    let config = super::load(config_path)?;

    let mut removed = 0;
    for output in plan::outputs(&config)? {
        if fsutil::remove_if_exists(&output)
            .with_context(|| format!("Failed to remove {}", output.display()))?
        {
            tracing::debug!("removed {}", output.display());
            removed += 1;
        }
    }

    tracing::info!("Removed {} files", removed);
    Ok(SUCCESS)
}
