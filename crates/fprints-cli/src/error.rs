//! Error types for the command-line tool.
//!
//! Command failures are reported through `anyhow` with context; this module
//! holds the typed errors raised before any command runs.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Compression level outside the zlib range
    #[error("Invalid compression level {level}: must be between 0 and {max}")]
    InvalidLevel {
        /// Level that was requested
        level: u32,
        /// Highest accepted level
        max: u32,
    },

    /// Input file does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Missing required configuration value
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

/// Errors reading the blueprint text a command works on.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read the input file
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailed {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read standard input
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// Input holds nothing but whitespace
    #[error("Input is empty")]
    Empty,
}
