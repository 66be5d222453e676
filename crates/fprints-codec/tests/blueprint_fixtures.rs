#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for current-format exchange strings
//!
//! The fixtures are exchange strings in the layout the game writes: a `0`
//! marker, standard base64 and a best-compression zlib stream.

use fprints_codec::book::{self, BookPathError};
use fprints_codec::codec::{self, CodecOptions, DecodeError, TextEncoding};
use fprints_codec::summary::{Histograms, entity_histogram};
use fprints_codec::{BlueprintInfo, BlueprintKind, SourceFormat, decode_any, variant};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::path::Path;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures/current")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

fn decode_fixture(name: &str) -> Value {
    codec::decode(&fixture(name)).expect("Fixture should decode")
}

#[test]
fn test_chest_feed_decodes() {
    let value = decode_fixture("chest_feed.txt");

    assert_eq!(variant::classify(&value), Ok(BlueprintKind::Blueprint));
    assert_eq!(value["blueprint"]["label"], json!("Chest feed"));
    assert_eq!(value["blueprint"]["entities"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["blueprint"]["version"], json!(281479275151360_u64));
}

#[test]
fn test_chest_feed_keeps_key_order() {
    let value = decode_fixture("chest_feed.txt");
    let keys: Vec<&str> = value["blueprint"]
        .as_object()
        .expect("blueprint object")
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(keys, ["icons", "entities", "item", "label", "version"]);
}

#[test]
fn test_chest_feed_round_trips() {
    let value = decode_fixture("chest_feed.txt");
    let encoded = codec::encode(&value).expect("Encode should succeed");

    assert!(encoded.starts_with(codec::VERSION_MARKER));
    assert_eq!(codec::decode(&encoded).expect("Decode should succeed"), value);
}

#[test]
fn test_chest_feed_info_and_histogram() {
    let value = decode_fixture("chest_feed.txt");

    let info = BlueprintInfo::from_value(&value).expect("Info should succeed");
    assert_eq!(info.kind, BlueprintKind::Blueprint);
    assert_eq!(info.label.as_deref(), Some("Chest feed"));
    assert_eq!(
        info.game_version().map(|v| v.short()).as_deref(),
        Some("1.1.53")
    );

    assert_eq!(
        entity_histogram(&value["blueprint"]),
        vec![
            ("transport-belt".to_string(), 2),
            ("iron-chest".to_string(), 1)
        ]
    );
}

#[test]
fn test_wrapped_string_decodes() {
    let compact = fixture("chest_feed.txt");
    let wrapped: String = compact
        .trim()
        .as_bytes()
        .chunks(40)
        .map(|chunk| format!("{}\n", String::from_utf8_lossy(chunk)))
        .collect();

    assert_eq!(
        codec::decode(&wrapped).expect("Wrapped string should decode"),
        decode_fixture("chest_feed.txt")
    );
}

#[test]
fn test_starter_book() {
    let value = decode_fixture("starter_book.txt");

    assert_eq!(variant::validate(&value), Ok(BlueprintKind::Book));

    let info = BlueprintInfo::from_value(&value).expect("Info should succeed");
    assert_eq!(info.label.as_deref(), Some("Starter book"));

    let listed = book::entries(&value);
    assert_eq!(
        listed.iter().map(|e| e.kind).collect::<Vec<_>>(),
        vec![Some(BlueprintKind::Blueprint), Some(BlueprintKind::UpgradePlanner)]
    );

    let pole = book::extract(&value, "1").expect("Extract should succeed");
    assert_eq!(pole["blueprint"]["label"], json!("Pole"));

    assert!(matches!(
        book::extract(&value, "2"),
        Err(BookPathError::NoBlueprint { .. })
    ));
    assert!(matches!(
        book::extract(&value, "3"),
        Err(BookPathError::OutOfRange { len: 2, .. })
    ));

    let histograms = Histograms::of_tree(&value).expect("Histograms should succeed");
    assert_eq!(
        histograms.entities,
        vec![("small-electric-pole".to_string(), 1)]
    );
}

#[test]
fn test_extracted_blueprint_reencodes() {
    let value = decode_fixture("starter_book.txt");
    let pole = book::extract(&value, "1").expect("Extract should succeed");

    let encoded = codec::encode(&pole).expect("Encode should succeed");
    let decoded = decode_any(&encoded).expect("Decode should succeed");
    assert_eq!(decoded.format, SourceFormat::Current);
    assert_eq!(decoded.value, pole);
}

#[test]
fn test_latin1_label() {
    let encoded = fixture("latin1_label.txt");

    let value = codec::decode(&encoded).expect("Latin-1 decode should succeed");
    assert_eq!(value["blueprint"]["label"], json!("Caf\u{e9}"));

    let utf8 = CodecOptions {
        text: TextEncoding::Utf8,
        ..CodecOptions::default()
    };
    assert!(matches!(
        codec::decode_with(&encoded, utf8),
        Err(DecodeError::InvalidUtf8(_))
    ));
}

#[test]
fn test_truncated_fixture_fails() {
    let encoded = fixture("chest_feed.txt");
    let encoded = encoded.trim();

    for cut in [encoded.len() - 4, encoded.len() / 2, 8] {
        assert!(
            codec::decode(&encoded[..cut]).is_err(),
            "prefix of {cut} characters decoded"
        );
    }
}

/// Exchange string exported by the game (0.15.2), not by this crate
#[test]
fn test_game_exported_string() {
    let value = decode_fixture("inserters.txt");
    let expected: Value = serde_json::from_str(&fixture("inserters_entities.json"))
        .expect("Expected entities should parse");

    assert_eq!(variant::validate(&value), Ok(BlueprintKind::Blueprint));
    assert_eq!(value["blueprint"]["entities"], expected);
    assert_eq!(
        value["blueprint"]["entities"][0],
        json!({
            "entity_number": 1,
            "name": "logistic-chest-passive-provider",
            "position": {"x": -4, "y": -14},
            "bar": 1
        })
    );

    let info = BlueprintInfo::from_value(&value).expect("Info should succeed");
    assert_eq!(info.label.as_deref(), Some("Inserters"));
    assert_eq!(info.icons.len(), 4);
    assert_eq!(
        info.game_version().map(|v| v.to_string()).as_deref(),
        Some("0.15.2.0")
    );

    let counts = entity_histogram(&value["blueprint"]);
    assert_eq!(counts.len(), 11);
    assert_eq!(counts[0], ("fast-transport-belt".to_string(), 77));
    assert_eq!(counts[1], ("fast-inserter".to_string(), 43));
    assert_eq!(counts[10], ("transport-belt".to_string(), 1));
}

#[test]
fn test_game_exported_string_round_trips() {
    let value = decode_fixture("inserters.txt");
    let encoded = codec::encode(&value).expect("Encode should succeed");
    assert_eq!(codec::decode(&encoded).expect("Decode should succeed"), value);
}

#[test]
fn test_game_exported_string_truncated() {
    let encoded = fixture("inserters.txt");
    let encoded = encoded.trim();

    for cut in (2..encoded.len()).step_by(97) {
        assert!(
            codec::decode(&encoded[..cut]).is_err(),
            "prefix of {cut} characters decoded"
        );
    }
}
