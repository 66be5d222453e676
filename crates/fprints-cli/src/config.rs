//! Command-line configuration.
//!
//! Options can be provided via:
//! - CLI arguments (`--level`, `--utf8`, `--literal-booleans`)
//! - Environment variables (`FPRINTS_COMPRESSION_LEVEL`, `FPRINTS_UTF8`,
//!   `FPRINTS_LITERAL_BOOLEANS`)
//! - Default values
//!
//! # Example
//!
//! ```
//! use fprints_cli::{CliConfig, Command};
//!
//! let config = CliConfig::try_from_args(["fprints", "--level", "6", "extract", "book.txt", "--path", "2.1"])
//!     .expect("valid arguments");
//! assert_eq!(config.level, 6);
//! assert!(matches!(config.command, Command::Extract { .. }));
//! ```

use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use fprints_codec::codec::{CodecOptions, MAX_COMPRESSION_LEVEL, TextEncoding};
use fprints_codec::{DecodeOptions, ParseOptions};
use std::path::{Path, PathBuf};

/// Tool configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fprints",
    about = "Decode, encode and inspect Factorio blueprint strings",
    version
)]
pub struct CliConfig {
    /// zlib compression level for encoded output (0-9)
    #[arg(
        long,
        global = true,
        env = "FPRINTS_COMPRESSION_LEVEL",
        default_value_t = fprints_codec::codec::DEFAULT_COMPRESSION_LEVEL
    )]
    pub level: u32,

    /// Treat payload bytes as UTF-8 instead of one byte per character
    #[arg(long, global = true, env = "FPRINTS_UTF8")]
    pub utf8: bool,

    /// Keep `false` in Lua tables instead of reading every boolean as `true`
    #[arg(long, global = true, env = "FPRINTS_LITERAL_BOOLEANS")]
    pub literal_booleans: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Commands of the `fprints` tool.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Decode any supported blueprint string to JSON
    Decode {
        /// Input file, standard input when omitted
        input: Option<PathBuf>,

        /// Print JSON on one line
        #[arg(long)]
        compact: bool,

        /// Convert 0.14 blueprints to the current layout
        #[arg(long)]
        upgrade: bool,
    },

    /// Encode a JSON tree as a blueprint string
    Encode {
        /// Input file, standard input when omitted
        input: Option<PathBuf>,
    },

    /// Show kind, label, description, version and book contents
    Info {
        /// Input file, standard input when omitted
        input: Option<PathBuf>,
    },

    /// Count entities and requested items
    Histogram {
        /// Input file, standard input when omitted
        input: Option<PathBuf>,
    },

    /// Extract one blueprint from a book and re-encode it
    Extract {
        /// Input file, standard input when omitted
        input: Option<PathBuf>,

        /// Dotted 1-based position in the book, such as `2.1`
        #[arg(long)]
        path: String,
    },
}

impl Command {
    /// Input file of the command, if one was given.
    pub fn input(&self) -> Option<&Path> {
        match self {
            Self::Decode { input, .. }
            | Self::Encode { input }
            | Self::Info { input }
            | Self::Histogram { input }
            | Self::Extract { input, .. } => input.as_deref(),
        }
    }
}

impl CliConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse configuration from an explicit argument list.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Options for the current-format codec.
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            level: self.level,
            text: if self.utf8 {
                TextEncoding::Utf8
            } else {
                TextEncoding::Latin1
            },
        }
    }

    /// Options for format detection and the legacy parser.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            codec: self.codec_options(),
            legacy: ParseOptions {
                literal_booleans: self.literal_booleans,
            },
        }
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The compression level is above 9
    /// - The input file doesn't exist
    /// - `extract` is given an empty path
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level > MAX_COMPRESSION_LEVEL {
            return Err(ConfigError::InvalidLevel {
                level: self.level,
                max: MAX_COMPRESSION_LEVEL,
            });
        }

        if let Some(input) = self.command.input()
            && !input.exists()
        {
            return Err(ConfigError::InputNotFound(input.to_path_buf()));
        }

        if let Command::Extract { path, .. } = &self.command
            && path.trim().is_empty()
        {
            return Err(ConfigError::MissingRequired(
                "extract needs a non-empty --path".to_string(),
            ));
        }

        Ok(())
    }
}
