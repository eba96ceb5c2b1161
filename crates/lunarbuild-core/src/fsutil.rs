//! All-or-nothing file writes
//!
//! Outputs are staged in a temporary file next to their destination and
//! renamed into place, so an interrupted build leaves each output either
//! absent or complete.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Stage `contents` in a temporary file in the destination's directory.
///
/// The file is not visible at `dest` until [`NamedTempFile::persist`] is
/// called on the result.
pub fn stage(dest: &Path, contents: &[u8]) -> io::Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(parent_dir(dest)?)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Atomically replace `dest` with `contents`
pub fn write_atomic(dest: &Path, contents: &[u8]) -> io::Result<()> {
    stage(dest, contents)?.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

/// Atomically replace `dest` with a byte-for-byte copy of `src`
pub fn copy_atomic(src: &Path, dest: &Path) -> io::Result<u64> {
    let mut reader = std::fs::File::open(src)?;
    let mut tmp = NamedTempFile::new_in(parent_dir(dest)?)?;
    let copied = io::copy(&mut reader, &mut tmp)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(copied)
}

/// Remove a file, treating "not found" as success.
///
/// Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn parent_dir(dest: &Path) -> io::Result<&Path> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    Ok(parent)
}
