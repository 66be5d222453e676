//! Decoder, encoder and legacy parser for Factorio blueprint strings
//!
#![allow(clippy::cast_possible_truncation)] // Stream counters fit in usize
#![allow(clippy::cast_precision_loss)] // Lua numbers follow f64 semantics
#![allow(clippy::cast_possible_wrap)] // Sign handling in number conversion
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Game-specific terms don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::float_cmp)] // Integral checks on parsed numbers
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! This crate turns the text a player copies out of Factorio (an "exchange
//! string") into a JSON tree and back, and understands the Lua-table format
//! that 0.14-era strings used before the game switched to JSON.
//!
//! # Supported Formats
//!
//! - **Current**: `'0'` version marker, base64, zlib, JSON ([`codec`])
//! - **Legacy envelope**: base64 gzip wrapping a `do local _=...;return _;end`
//!   script ([`legacy::unwrap_envelope`])
//! - **Lua table text**: the table literal itself ([`legacy::parse`])
//!
//! # Example
//!
//! ```
//! use fprints_codec::{BlueprintKind, SourceFormat, codec, decode_any, variant};
//! use serde_json::json;
//!
//! let value = json!({"blueprint": {"item": "blueprint", "label": "Demo", "version": 1}});
//! let encoded = codec::encode(&value).expect("encode");
//! assert!(encoded.starts_with('0'));
//!
//! let decoded = decode_any(&encoded).expect("decode");
//! assert_eq!(decoded.format, SourceFormat::Current);
//! assert_eq!(decoded.value, value);
//! assert_eq!(variant::classify(&decoded.value), Ok(BlueprintKind::Blueprint));
//!
//! let legacy = decode_any(r#"{entities={{name="iron-chest",position={x=0,y=0}}}}"#)
//!     .expect("legacy");
//! assert_eq!(legacy.format, SourceFormat::LuaTable);
//! ```

#![warn(missing_docs)]

/// Navigation inside blueprint books
pub mod book;
/// Current exchange string format: base64 + zlib + JSON
///
/// The decode path strips the version marker, base64 decodes the payload,
/// inflates the zlib stream and parses the text as JSON. Encoding runs the
/// same steps in reverse and always writes [`codec::VERSION_MARKER`].
///
/// Payload bytes map one-to-one onto characters by default (Latin-1), which
/// keeps any byte above 0x7F intact across a round trip.
pub mod codec;
mod error;
/// 0.14-era Lua table blueprints
///
/// Contains the lexer, parser and tree visitor for Lua table literals, the
/// gzip envelope those strings were shipped in, and the conversion of a
/// decoded legacy tree into the current blueprint shape.
pub mod legacy;
/// Entity and item histograms
pub mod summary;
/// The four top-level blueprint variants
pub mod variant;
/// Packed game version numbers
pub mod version;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use codec::{CodecOptions, DecodeError, EncodeError, TextEncoding};
pub use error::{BlueprintError, BlueprintResult};
pub use legacy::{LegacyParseError, ParseOptions};
pub use variant::{BlueprintInfo, BlueprintKind, UnrecognizedVariant};
pub use version::GameVersion;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Which input format a string was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Versioned base64 + zlib + JSON string
    Current,
    /// 0.14 gzip envelope around a Lua script
    LegacyEnvelope,
    /// Bare Lua table literal text
    LuaTable,
}

impl SourceFormat {
    /// Whether the decoded tree is in the 0.14 layout
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        !matches!(self, Self::Current)
    }
}

/// Options for [`decode_any_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Options for the current format
    pub codec: CodecOptions,
    /// Options for the Lua table parser
    pub legacy: ParseOptions,
}

/// A decoded tree together with the format it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Format the input was recognized as
    pub format: SourceFormat,
    /// Decoded tree, in the layout of its source format
    pub value: Value,
}

impl Decoded {
    /// Return the tree in the current layout, upgrading legacy trees
    pub fn into_current(self) -> BlueprintResult<Value> {
        if self.format.is_legacy() {
            Ok(legacy::upgrade(&self.value)?)
        } else {
            Ok(self.value)
        }
    }
}

/// Decode any supported blueprint string with default options
pub fn decode_any(input: &str) -> BlueprintResult<Decoded> {
    decode_any_with(input, DecodeOptions::default())
}

/// Decode any supported blueprint string
///
/// The current format is tried first. When that fails and the input is a
/// legacy gzip envelope or a Lua table literal, the legacy parser takes over;
/// otherwise the codec's [`DecodeError`] is returned.
pub fn decode_any_with(input: &str, options: DecodeOptions) -> BlueprintResult<Decoded> {
    let trimmed = input.trim();

    let error = match codec::decode_with(trimmed, options.codec) {
        Ok(value) => {
            return Ok(Decoded {
                format: SourceFormat::Current,
                value,
            });
        }
        Err(error) => error,
    };

    if legacy::is_envelope(trimmed) {
        tracing::warn!("decoding 0.14 blueprint string");
        let table = legacy::unwrap_envelope(trimmed)?;
        let value = legacy::parse_with(&table, options.legacy)?;
        return Ok(Decoded {
            format: SourceFormat::LegacyEnvelope,
            value,
        });
    }

    if legacy::looks_like_table(trimmed) {
        debug!(%error, "not a current blueprint string, parsing as Lua table");
        let value = legacy::parse_with(trimmed, options.legacy)?;
        return Ok(Decoded {
            format: SourceFormat::LuaTable,
            value,
        });
    }

    Err(error.into())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_any_current() {
        let value = json!({"upgrade_planner": {"item": "upgrade-planner", "version": 7}});
        let encoded = codec::encode(&value).expect("Encode should succeed");

        let decoded = decode_any(&format!("  {encoded}\n")).expect("Decode should succeed");
        assert_eq!(decoded.format, SourceFormat::Current);
        assert_eq!(decoded.value, value);
    }

    #[test]
    fn test_decode_any_lua_table() {
        let decoded = decode_any(r#"{entities={{name="iron-chest",position={x=0,y=0}}}}"#)
            .expect("Lua table should parse");

        assert_eq!(decoded.format, SourceFormat::LuaTable);
        assert_eq!(
            decoded.value,
            json!({"entities": [{"name": "iron-chest", "position": {"x": 0, "y": 0}}]})
        );
    }

    #[test]
    fn test_decode_any_reports_codec_error() {
        let err = decode_any("0SGVsbG8gV29ybGQ=").expect_err("Not a zlib stream");
        assert!(matches!(err, BlueprintError::Decode(_)));
        assert!(err.to_string().starts_with("could not decode blueprint"));
    }

    #[test]
    fn test_decode_any_reports_legacy_error() {
        let err = decode_any("{entities={{name=}}}").expect_err("Broken Lua table");
        assert!(matches!(err, BlueprintError::LegacyParse(_)));
    }

    #[test]
    fn test_decode_any_empty() {
        let err = decode_any("   ").expect_err("Empty input");
        assert!(matches!(err, BlueprintError::Decode(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_into_current_upgrades_lua_table() {
        let decoded = decode_any(r#"{name="Smelter",entities={{name="stone-furnace",position={x=1,y=1}}}}"#)
            .expect("Lua table should parse");

        let current = decoded.into_current().expect("Upgrade should succeed");
        assert_eq!(
            variant::classify(&current),
            Ok(BlueprintKind::Blueprint)
        );
        assert_eq!(current["blueprint"]["label"], json!("Smelter"));
        assert_eq!(current["blueprint"]["entities"][0]["entity_number"], json!(1));
    }

    #[test]
    fn test_legacy_options_reach_parser() {
        let options = DecodeOptions {
            legacy: ParseOptions {
                literal_booleans: true,
            },
            ..DecodeOptions::default()
        };

        let decoded = decode_any_with("{flag=false}", options).expect("Lua table should parse");
        assert_eq!(decoded.value, json!({"flag": false}));
    }
}
