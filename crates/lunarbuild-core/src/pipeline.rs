//! Fail-fast pipeline executor
//!
//! Stages run strictly in the order they were pushed. The first non-zero
//! status stops the pipeline and becomes its result.

use std::path::PathBuf;

use crate::stage::{BuildContext, BuildTask, CachedStage, FAILURE, SUCCESS, Status};

/// An ordered sequence of cached stages
#[derive(Debug, Default)]
pub struct Pipeline {
    directories: Vec<PathBuf>,
    stages: Vec<CachedStage>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a directory to exist before any stage runs
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directories.push(dir.into());
        self
    }

    /// Append a stage
    pub fn push(&mut self, task: BuildTask) {
        self.stages.push(CachedStage::new(task));
    }

    /// Stages in execution order
    pub fn stages(&self) -> &[CachedStage] {
        &self.stages
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Create the required directories; existing ones are left alone
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for dir in &self.directories {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Run every stage in order, stopping at the first failure
    pub fn run(&self, ctx: &BuildContext) -> Status {
        if let Err(e) = self.ensure_directories() {
            tracing::error!("failed to create output directories: {}", e);
            return FAILURE;
        }

        for stage in &self.stages {
            let status = stage.run(ctx);
            if status != SUCCESS {
                tracing::debug!(
                    "stopping after '{}' with status {}",
                    stage.task().name(),
                    status
                );
                return status;
            }
        }
        SUCCESS
    }
}
