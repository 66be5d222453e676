//! Current blueprint string format
//!
//! An exchange string is one version character followed by base64 text:
//!
//! ```text
//! 0eNqN0MsKwjAQBdBfkbuOYqr1ka2fISJ9jBpoJyWJYin5d9MWRLCCqzA3...
//! ^ version marker
//!  ^ base64 of a zlib stream whose payload is JSON
//! ```
//!
//! # Examples
//!
//! ```
//! use fprints_codec::codec::{self, CodecOptions, TextEncoding};
//! use serde_json::json;
//!
//! let value = json!({"deconstruction_planner": {"item": "deconstruction-planner"}});
//! let encoded = codec::encode(&value).expect("encode");
//! assert_eq!(codec::decode(&encoded).expect("decode"), value);
//!
//! // Characters above U+00FF need the UTF-8 payload mode
//! let wide = json!({"blueprint": {"label": "\u{2192}"}});
//! assert!(codec::encode(&wide).is_err());
//! let options = CodecOptions { text: TextEncoding::Utf8, ..CodecOptions::default() };
//! let encoded = codec::encode_with(&wide, options).expect("encode");
//! assert_eq!(codec::decode_with(&encoded, options).expect("decode"), wide);
//! ```

mod compression;
mod error;
mod text;

pub use compression::{MAX_DECOMPRESSION_SIZE, compress, decompress, decompress_gzip};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use text::{TextEncoding, latin1_to_string, string_to_latin1};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use tracing::{debug, trace};

/// Version character written in front of every encoded string
pub const VERSION_MARKER: char = '0';

/// Compression level the game uses
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 9;

/// Highest valid zlib compression level
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Encoding and decoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// zlib compression level used when encoding (0-9)
    pub level: u32,
    /// Byte-to-character mapping of the JSON payload
    pub text: TextEncoding,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
            text: TextEncoding::Latin1,
        }
    }
}

/// Decode a blueprint string with default options
pub fn decode(encoded: &str) -> DecodeResult<Value> {
    decode_with(encoded, CodecOptions::default())
}

/// Decode a blueprint string
///
/// Surrounding whitespace and line breaks inside the payload are ignored.
/// The first character is dropped whatever it is.
pub fn decode_with(encoded: &str, options: CodecOptions) -> DecodeResult<Value> {
    let mut chars = encoded.trim().chars();
    let marker = chars.next().ok_or(DecodeError::EmptyInput)?;
    if marker != VERSION_MARKER {
        debug!(%marker, "unexpected version marker, decoding as current format");
    }

    let payload: String = chars.filter(|c| !c.is_ascii_whitespace()).collect();
    if payload.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let compressed = BASE64.decode(payload.as_bytes())?;
    let inflated = decompress(&compressed)?;
    trace!(
        compressed = compressed.len(),
        inflated = inflated.len(),
        "inflated blueprint payload"
    );

    let text = options.text.decode(inflated)?;
    Ok(serde_json::from_str(&text)?)
}

/// Encode a tree with default options
pub fn encode(value: &Value) -> EncodeResult<String> {
    encode_with(value, CodecOptions::default())
}

/// Encode a tree as a blueprint string
pub fn encode_with(value: &Value, options: CodecOptions) -> EncodeResult<String> {
    if options.level > MAX_COMPRESSION_LEVEL {
        return Err(EncodeError::InvalidLevel(options.level));
    }

    let json = serde_json::to_string(value)?;
    let bytes = options.text.encode(&json)?;
    let compressed = compress(&bytes, options.level)?;
    trace!(
        json = bytes.len(),
        compressed = compressed.len(),
        level = options.level,
        "compressed blueprint payload"
    );

    let mut encoded = String::with_capacity(1 + compressed.len().div_ceil(3) * 4);
    encoded.push(VERSION_MARKER);
    BASE64.encode_string(&compressed, &mut encoded);
    Ok(encoded)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_round_trip, belt_line, sample_blueprint};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_round_trip_sample() {
        assert_round_trip(&sample_blueprint());
    }

    #[test]
    fn test_version_marker() {
        for value in [json!(null), json!([1, 2]), json!("x"), sample_blueprint()] {
            let encoded = encode(&value).expect("Encode should succeed");
            assert!(encoded.starts_with(VERSION_MARKER));
        }
    }

    #[test]
    fn test_decode_invalid_json() {
        // zlib stream holding the text `{invalid json`
        let err = decode("0eJyrzswrS8zJTFHIKs7PAwAlewU9").expect_err("Should fail");
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_decode_json_null() {
        let value = decode("0eJzLK83JAQAEXwG8").expect("Decode should succeed");
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_decode_invalid_base64() {
        let err = decode("0{}[]").expect_err("Should fail");
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn test_decode_not_compressed() {
        // "Hello World" in base64
        let err = decode("0SGVsbG8gV29ybGQ=").expect_err("Should fail");
        assert!(matches!(
            err,
            DecodeError::Decompression(_) | DecodeError::Truncated { .. }
        ));
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode(""), Err(DecodeError::EmptyInput)));
        assert!(matches!(decode("0"), Err(DecodeError::EmptyInput)));
        assert!(matches!(decode(" 0 \n"), Err(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_decode_ignores_line_breaks() {
        let value = sample_blueprint();
        let encoded = encode(&value).expect("Encode should succeed");
        let (head, tail) = encoded.split_at(encoded.len() / 2);
        let wrapped = format!("\n{head}\r\n{tail}\n");

        assert_eq!(decode(&wrapped).expect("Decode should succeed"), value);
    }

    #[test]
    fn test_decode_accepts_any_marker() {
        let encoded = encode(&sample_blueprint()).expect("Encode should succeed");
        let remarked = format!("1{}", &encoded[1..]);
        assert_eq!(
            decode(&remarked).expect("Decode should succeed"),
            sample_blueprint()
        );
    }

    #[test]
    fn test_latin1_payload() {
        let value = json!({"blueprint": {"label": "Caf\u{e9}"}});
        let encoded = encode(&value).expect("Encode should succeed");
        assert_eq!(decode(&encoded).expect("Decode should succeed"), value);

        // The same payload read as UTF-8 is rejected
        let utf8 = CodecOptions {
            text: TextEncoding::Utf8,
            ..CodecOptions::default()
        };
        assert!(matches!(
            decode_with(&encoded, utf8),
            Err(DecodeError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_wide_chars_need_utf8() {
        let value = json!({"blueprint": {"label": "[item=iron-plate] \u{2192} gear"}});
        assert!(matches!(
            encode(&value),
            Err(EncodeError::UnrepresentableChar { ch: '\u{2192}', .. })
        ));

        let utf8 = CodecOptions {
            text: TextEncoding::Utf8,
            ..CodecOptions::default()
        };
        let encoded = encode_with(&value, utf8).expect("Encode should succeed");
        assert_eq!(decode_with(&encoded, utf8).expect("Decode should succeed"), value);
    }

    #[test]
    fn test_invalid_level() {
        let options = CodecOptions {
            level: 10,
            ..CodecOptions::default()
        };
        assert!(matches!(
            encode_with(&sample_blueprint(), options),
            Err(EncodeError::InvalidLevel(10))
        ));
    }

    #[test]
    fn test_every_level_round_trips() {
        let value = sample_blueprint();
        for level in 0..=MAX_COMPRESSION_LEVEL {
            let options = CodecOptions {
                level,
                ..CodecOptions::default()
            };
            let encoded = encode_with(&value, options).expect("Encode should succeed");
            assert_eq!(decode(&encoded).expect("Decode should succeed"), value);
        }
    }

    #[test]
    fn test_truncation_always_fails() {
        let encoded = encode(&sample_blueprint()).expect("Encode should succeed");
        for cut in 1..encoded.len() - 1 {
            let truncated = &encoded[..encoded.len() - cut];
            assert!(
                decode(truncated).is_err(),
                "dropping {cut} trailing characters should fail"
            );
        }
    }

    #[test]
    fn test_highly_compressible_trees() {
        for count in [10, 100, 1000] {
            let value = belt_line(count);
            let json_len = serde_json::to_vec(&value).expect("Serialize should succeed").len();
            let encoded = encode(&value).expect("Encode should succeed");
            if count >= 100 {
                // base64 payload holds three zlib bytes per four characters
                assert!((encoded.len() - 1) * 3 < json_len);
            }
            assert_eq!(decode(&encoded).expect("Decode should succeed"), value);
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use proptest::test_runner::TestCaseError;

        /// JSON trees limited to Latin-1 strings and integer numbers
        fn json_value() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(Value::from),
                "[\\x20-\\xff]{0,12}".prop_map(Value::String),
            ];
            leaf.prop_recursive(4, 48, 6, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                    prop::collection::vec(("[a-z_]{1,8}", inner), 0..6)
                        .prop_map(|fields| Value::Object(fields.into_iter().collect())),
                ]
            })
        }

        /// Entity lists built from one repeated entity
        fn repeated_entities() -> impl Strategy<Value = Value> {
            ("[a-z-]{3,20}", 50usize..2000).prop_map(|(name, count)| {
                let entity = json!({"name": name, "position": {"x": 0.5, "y": 0.5}});
                json!({"blueprint": {"entities": vec![entity; count], "item": "blueprint"}})
            })
        }

        proptest! {
            /// decode(encode(v)) == v
            #[test]
            fn round_trip_law(value in json_value()) {
                let encoded = encode(&value).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert!(encoded.starts_with(VERSION_MARKER));
                let decoded = decode(&encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(decoded, value);
            }

            /// Dropping trailing payload characters never yields a value
            #[test]
            fn truncation_rejected(value in json_value(), cut in 1usize..64) {
                let encoded = encode(&value).map_err(|e| TestCaseError::fail(e.to_string()))?;
                let payload_len = encoded.len() - 1;
                prop_assume!(cut < payload_len);
                prop_assert!(decode(&encoded[..encoded.len() - cut]).is_err());
            }

            /// Trees inflating to many times their compressed size
            #[test]
            fn repetitive_round_trip(value in repeated_entities(), cut in 1usize..64) {
                let encoded = encode(&value).map_err(|e| TestCaseError::fail(e.to_string()))?;
                let decoded = decode(&encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(decoded, value);
                prop_assume!(cut < encoded.len() - 1);
                prop_assert!(decode(&encoded[..encoded.len() - cut]).is_err());
            }
        }
    }
}
