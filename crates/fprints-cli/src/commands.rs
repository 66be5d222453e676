//! Implementation of the `fprints` subcommands.
//!
//! Every command takes the input text and returns the text to print, so the
//! binary only deals with reading input and writing output.

use crate::config::{CliConfig, Command};
use crate::error::InputError;
use anyhow::{Context, Result};
use fprints_codec::book::{self, BookEntry};
use fprints_codec::codec::{self, CodecOptions};
use fprints_codec::summary::Histograms;
use fprints_codec::{
    BlueprintInfo, DecodeOptions, Decoded, SourceFormat, decode_any_with, variant,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Read the command input from a file, or standard input when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String, InputError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| InputError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(InputError::Stdin)?;
            text
        }
    };

    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }
    Ok(text)
}

/// Read the input and run the configured command.
pub fn run(config: &CliConfig) -> Result<String> {
    let input = read_input(config.command.input())?;
    run_with_input(config, &input)
}

/// Run the configured command on input that has already been read.
pub fn run_with_input(config: &CliConfig, input: &str) -> Result<String> {
    let options = config.decode_options();
    match &config.command {
        Command::Decode {
            compact, upgrade, ..
        } => decode(input, options, *compact, *upgrade),
        Command::Encode { .. } => encode(input, options.codec),
        Command::Info { .. } => info(input, options),
        Command::Histogram { .. } => histogram(input, options),
        Command::Extract { path, .. } => extract(input, path, options),
    }
}

fn decode_input(input: &str, options: DecodeOptions) -> Result<Decoded> {
    let decoded = decode_any_with(input, options).context("Failed to decode blueprint string")?;
    debug!(format = ?decoded.format, "decoded blueprint string");
    Ok(decoded)
}

fn current_tree(input: &str, options: DecodeOptions) -> Result<Value> {
    decode_input(input, options)?
        .into_current()
        .context("Failed to upgrade 0.14 blueprint")
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    text.context("Failed to serialize output")
}

/// Decode any supported string to JSON.
pub fn decode(input: &str, options: DecodeOptions, compact: bool, upgrade: bool) -> Result<String> {
    let value = if upgrade {
        current_tree(input, options)?
    } else {
        decode_input(input, options)?.value
    };
    to_json(&value, compact)
}

/// Encode a JSON tree as a current-format string.
pub fn encode(input: &str, options: CodecOptions) -> Result<String> {
    let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;
    if let Err(err) = variant::validate(&value) {
        warn!(%err, "encoding a tree that is not a known blueprint variant");
    }
    codec::encode_with(&value, options).context("Failed to encode blueprint")
}

/// Summary printed by the `info` command.
#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    /// Format the input was recognized as
    pub format: SourceFormat,
    /// Kind, label, description, icons and packed version
    #[serde(flatten)]
    pub info: BlueprintInfo,
    /// Version in `major.minor.patch.build` form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_version: Option<String>,
    /// Slots of a book
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<BookEntry>,
}

impl InfoReport {
    /// Build the report for any supported input string.
    pub fn from_input(input: &str, options: DecodeOptions) -> Result<Self> {
        let decoded = decode_input(input, options)?;
        let format = decoded.format;
        let value = decoded
            .into_current()
            .context("Failed to upgrade 0.14 blueprint")?;

        let info = BlueprintInfo::from_value(&value).context("Not a known blueprint variant")?;
        Ok(Self {
            format,
            game_version: info.game_version().map(|v| v.to_string()),
            entries: book::entries(&value),
            info,
        })
    }
}

/// Describe a blueprint string.
pub fn info(input: &str, options: DecodeOptions) -> Result<String> {
    to_json(&InfoReport::from_input(input, options)?, false)
}

/// Count entities and requested items, summed over books.
pub fn histogram(input: &str, options: DecodeOptions) -> Result<String> {
    let value = current_tree(input, options)?;
    let histograms = Histograms::of_tree(&value).context("Not a known blueprint variant")?;
    to_json(&histograms, false)
}

/// Extract a blueprint from a book and encode it as its own string.
pub fn extract(input: &str, path: &str, options: DecodeOptions) -> Result<String> {
    let value = current_tree(input, options)?;
    let blueprint = book::extract(&value, path)?;
    codec::encode_with(&blueprint, options.codec).context("Failed to encode blueprint")
}
