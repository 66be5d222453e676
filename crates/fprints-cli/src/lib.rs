//! Command-line front end for the Factorio blueprint string codec.
//!
//! The binary is a thin wrapper; argument parsing, validation and the
//! commands live here so they can be tested without spawning a process.
//!
//! # Commands
//!
//! - `decode`: any supported string to JSON, optionally upgrading 0.14 trees
//! - `encode`: JSON to a current-format string
//! - `info`: kind, label, description, game version and book contents
//! - `histogram`: entity and item counts
//! - `extract`: one blueprint out of a book, re-encoded
//!
//! # Example
//!
//! ```
//! use fprints_cli::{CliConfig, commands};
//!
//! let config = CliConfig::try_from_args(["fprints", "decode", "--compact"])
//!     .expect("valid arguments");
//! let output = commands::run_with_input(&config, "{name=\"Demo\"}").expect("decode");
//! assert_eq!(output, r#"{"name":"Demo"}"#);
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

// Module declarations
pub mod commands;
pub mod config;
pub mod error;

// Re-exports for public API
pub use commands::InfoReport;
pub use config::{CliConfig, Command};
pub use error::{ConfigError, InputError};
