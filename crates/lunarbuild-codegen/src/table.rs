//! Name table extraction
//!
//! Scans source text for `MARKER(name` and numbers the distinct names in
//! order of first appearance. The macro's own `#define MARKER(...)` line is
//! not an invocation and is skipped.

use std::collections::HashSet;

use regex::Regex;

use crate::error::{Error, Result};

/// A macro name whose first argument is captured
#[derive(Debug, Clone)]
pub struct Marker {
    literal: String,
    regex: Regex,
}

impl Marker {
    /// Build a scanner for `literal(identifier`
    pub fn new(literal: &str) -> Result<Self> {
        let literal = literal.trim();
        if literal.is_empty() {
            return Err(Error::InvalidMarker {
                marker: literal.to_string(),
                message: "marker is empty".to_string(),
            });
        }

        // Group 1 only matches on the macro definition itself.
        let pattern = format!(
            r"(#\s*define\s+)?\b{}\s*\(\s*([A-Za-z_][A-Za-z0-9_]*)",
            regex::escape(literal)
        );
        let regex = Regex::new(&pattern).map_err(|e| Error::InvalidMarker {
            marker: literal.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            literal: literal.to_string(),
            regex,
        })
    }
}

/// Ordered name → id mapping; an id is the name's rank of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    /// Scan `text` left to right for marker invocations.
    ///
    /// Repeated names keep their first id. No match yields an empty table;
    /// a marker without `(` and an identifier is not a match.
    pub fn extract(text: &str, marker: &Marker) -> Self {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        for caps in marker.regex.captures_iter(text) {
            if caps.get(1).is_some() {
                continue;
            }
            let Some(name) = caps.get(2).map(|m| m.as_str()) else {
                continue;
            };
            if seen.insert(name) {
                names.push(name.to_string());
            }
        }

        tracing::debug!("extracted {} names for {}", names.len(), marker.literal);
        Self { names }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Id assigned to `name`
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Name with the given id
    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// `(id, name)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}
