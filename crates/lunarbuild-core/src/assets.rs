//! Static asset copy stages
//!
//! Each asset becomes its own cached stage so unchanged files are skipped
//! individually. Copies go through a temporary file and an atomic rename.

use std::path::{Path, PathBuf};

use crate::config::{Config, StaticConfig};
use crate::error::Result;
use crate::fsutil;
use crate::pattern;
use crate::stage::{ActionResult, BuildTask, SUCCESS};

/// One static asset, relative to the source and destination roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAsset {
    /// Path relative to both roots
    pub relative: PathBuf,
    /// Absolute source path
    pub source: PathBuf,
    /// Absolute destination path
    pub dest: PathBuf,
}

impl StaticAsset {
    /// Build a copy stage for this asset
    pub fn task(&self) -> BuildTask {
        let (source, dest) = (self.source.clone(), self.dest.clone());
        BuildTask::new(
            format!("copy_static {}", self.relative.display()),
            &self.dest,
            vec![self.source.clone()],
            move || -> ActionResult {
                let bytes = fsutil::copy_atomic(&source, &dest)?;
                tracing::debug!("copied {} bytes to {}", bytes, dest.display());
                Ok(SUCCESS)
            },
        )
    }
}

/// Expand the manifest's asset list in order
pub fn collect(config: &Config) -> Result<Vec<StaticAsset>> {
    resolve(&config.base_path, &config.project.static_assets)
}

/// Expand an asset list against `base`
pub fn resolve(base: &Path, assets: &StaticConfig) -> Result<Vec<StaticAsset>> {
    let from = base.join(&assets.from);
    let to = base.join(&assets.to);

    Ok(pattern::expand_all(&from, assets.files.as_slice())?
        .into_iter()
        .map(|relative| StaticAsset {
            source: from.join(&relative),
            dest: to.join(&relative),
            relative,
        })
        .collect())
}
