//! `fprints` binary entry point.
//!
//! This is a thin wrapper around the fprints-cli library that:
//! 1. Initializes logging on standard error
//! 2. Parses and validates command-line arguments
//! 3. Runs the command and prints its output
//!
//! Log verbosity follows `RUST_LOG` and defaults to warnings only.

use anyhow::Result;
use fprints_cli::{CliConfig, commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse configuration from CLI args
    let config = CliConfig::from_args();

    tracing::debug!(
        "Configuration loaded: level={}, utf8={}, literal_booleans={}, command={:?}",
        config.level,
        config.utf8,
        config.literal_booleans,
        config.command
    );

    // Validate configuration
    config.validate()?;

    let output = commands::run(&config)?;
    println!("{output}");

    Ok(())
}
