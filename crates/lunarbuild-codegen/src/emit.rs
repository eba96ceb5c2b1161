//! Writing a generated pair to disk
//!
//! Both fragments are staged in temporary files first. Once renaming has
//! started, a failure removes both destinations so a later run sees a
//! missing output instead of one fresh fragment next to a stale one.

use std::path::Path;

use lunarbuild_core::fsutil;

use crate::error::{Error, Result};
use crate::generator::ArtifactPair;

/// Write `pair` to its two destinations, both or neither
pub fn write_pair(pair: &ArtifactPair, native: &Path, frontend: &Path) -> Result<()> {
    let native_tmp = fsutil::stage(native, pair.native.as_bytes()).map_err(write_error(native))?;
    let frontend_tmp =
        fsutil::stage(frontend, pair.frontend.as_bytes()).map_err(write_error(frontend))?;

    let persisted = native_tmp
        .persist(native)
        .map_err(|e| write_error(native)(e.error))
        .and_then(|_| {
            frontend_tmp
                .persist(frontend)
                .map_err(|e| write_error(frontend)(e.error))
        });

    if let Err(e) = persisted {
        for path in [native, frontend] {
            if let Err(remove_err) = fsutil::remove_if_exists(path) {
                tracing::warn!("failed to remove {}: {}", path.display(), remove_err);
            }
        }
        return Err(e);
    }

    tracing::debug!("wrote {} and {}", native.display(), frontend.display());
    Ok(())
}

fn write_error(path: &Path) -> impl Fn(std::io::Error) -> Error + '_ {
    move |source| Error::WriteFragment {
        path: path.display().to_string(),
        source,
    }
}
