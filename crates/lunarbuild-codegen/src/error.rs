//! Error types for code generation

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum Error {
    /// Marker could not be turned into a scanner
    #[error("invalid marker '{marker}': {message}")]
    InvalidMarker {
        /// The marker literal
        marker: String,
        /// Error message
        message: String,
    },

    /// A captured name collides with an entry the generator adds itself
    #[error("name '{name}' is reserved in the generated table")]
    ReservedName {
        /// The offending name
        name: String,
    },

    /// Invalid or failing template
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Source file could not be read
    #[error("failed to read {path}: {source}")]
    ReadSource {
        /// Source path
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// One of the fragments could not be written; neither is left behind
    #[error("failed to write {path}: {source}")]
    WriteFragment {
        /// Fragment path
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },
}
