//! The 0.14 exchange string envelope
//!
//! Before 0.15 the game exported a Lua script, `do local _=<table>;return _;end`,
//! gzip compressed and base64 encoded without a version marker. The
//! decompressed bytes are read one byte per character.

use super::error::{LegacyParseError, LegacyResult};
use crate::codec::{DecodeError, decompress_gzip, latin1_to_string};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::trace;

/// Base64 of the gzip magic bytes and deflate method (`1F 8B 08`)
pub const ENVELOPE_PREFIX: &str = "H4sI";

const ASSIGNMENT_PREFIX: &str = "do local _=";
const ASSIGNMENT_SUFFIX: &str = ";return _;end";

/// Whether the input looks like a 0.14 envelope
pub fn is_envelope(input: &str) -> bool {
    input.trim_start().starts_with(ENVELOPE_PREFIX)
}

/// Whether the input looks like bare Lua table text
pub fn looks_like_table(input: &str) -> bool {
    input.trim_start().starts_with('{')
}

/// Unpack an envelope into the Lua table text it carries
pub fn unwrap_envelope(encoded: &str) -> LegacyResult<String> {
    let payload: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if payload.is_empty() {
        return Err(DecodeError::EmptyInput.into());
    }

    let compressed = BASE64.decode(payload.as_bytes()).map_err(DecodeError::from)?;
    let script = latin1_to_string(&decompress_gzip(&compressed)?);
    trace!(
        compressed = compressed.len(),
        script = script.len(),
        "inflated legacy envelope"
    );

    extract_table(&script).map(str::to_string)
}

/// Extract the table literal from a `do local _=...;return _;end` script
pub fn extract_table(script: &str) -> LegacyResult<&str> {
    let start = script
        .find(ASSIGNMENT_PREFIX)
        .ok_or(LegacyParseError::MissingAssignment)?
        + ASSIGNMENT_PREFIX.len();
    let end = script
        .rfind(ASSIGNMENT_SUFFIX)
        .filter(|&end| end > start)
        .ok_or(LegacyParseError::MissingAssignment)?;

    Ok(&script[start..end])
}
