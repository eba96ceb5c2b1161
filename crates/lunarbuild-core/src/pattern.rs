//! Path patterns for source and asset lists
//!
//! Manifest entries are either plain relative paths or shell-style
//! patterns: `*`, `?` and `[...]` match within one path component, `**/`
//! matches any number of directories, and wildcards never match a leading
//! `.`. Patterns expand at startup into a sorted list of existing files.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Whether a manifest entry contains wildcards
pub fn is_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand one entry relative to `base`.
///
/// Plain paths are returned as is, whether or not they exist. Patterns
/// return the matching files, sorted, as paths relative to `base`.
pub fn expand(base: &Path, entry: &str) -> Result<Vec<PathBuf>> {
    if !is_pattern(entry) {
        return Ok(vec![PathBuf::from(entry)]);
    }

    let pattern = compile(entry)?;
    let root = base.join(literal_prefix(entry));
    if !root.is_dir() {
        tracing::debug!("pattern '{}' has no root directory {}", entry, root.display());
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for dir_entry in walkdir::WalkDir::new(&root).follow_links(true) {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = dir_entry.path().strip_prefix(base) else {
            continue;
        };
        if pattern.matches_with(&to_slash(relative), MATCH_OPTIONS) {
            matches.push(relative.to_path_buf());
        }
    }
    matches.sort();
    Ok(matches)
}

/// Expand every entry in manifest order, dropping repeated paths
pub fn expand_all<S: AsRef<str>>(base: &Path, entries: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        for path in expand(base, entry.as_ref())? {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    Ok(paths)
}

/// Leading components that contain no wildcard
fn literal_prefix(entry: &str) -> PathBuf {
    entry
        .split('/')
        .take_while(|component| !is_pattern(component))
        .collect()
}

fn compile(entry: &str) -> Result<Pattern> {
    Pattern::new(entry).map_err(|e| Error::InvalidPattern {
        pattern: entry.to_string(),
        message: e.to_string(),
    })
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
