//! Toolchain error types

use thiserror::Error;

/// Result type for toolchain operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or running external tools
#[derive(Error, Debug)]
pub enum Error {
    /// The program could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Source list expansion or other core failure
    #[error(transparent)]
    Core(#[from] lunarbuild_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
