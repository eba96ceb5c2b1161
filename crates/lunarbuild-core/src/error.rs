//! Error types for lunarbuild-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for lunarbuild-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lunarbuild-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// A declared stage input could not be stat'd
    #[error("{}: {source}", path.display())]
    MissingInput {
        /// The input whose metadata could not be read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A path pattern could not be compiled
    #[error("invalid path pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern that failed
        pattern: String,
        /// Error message
        message: String,
    },

    /// Directory traversal error
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
