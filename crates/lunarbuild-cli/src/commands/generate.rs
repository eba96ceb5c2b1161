//! Generate command

use anyhow::Result;
use lunarbuild_core::Status;

use crate::plan;

/// Run only the code generation stages
pub fn run(config_path: &str, force: bool) -> Result<Status> {
    let config = super::load(config_path)?;
    let pipeline = plan::generate_pipeline(&config)?;

    if pipeline.is_empty() {
        tracing::warn!("No generators declared in {}", config.manifest_path.display());
    }

    Ok(pipeline.run(&plan::context(&config, force)))
}
