//! Test utilities shared by the format test modules

use crate::codec;
use serde_json::{Value, json};

/// Assert that a tree survives encode and decode unchanged
///
/// Also checks that re-encoding the decoded tree gives the same string, so
/// the encoder is deterministic for a given tree.
pub fn assert_round_trip(original: &Value) {
    let encoded = codec::encode(original).expect("Encode should succeed");
    let decoded = codec::decode(&encoded).expect("Decode should succeed");
    assert_eq!(
        &decoded, original,
        "Round-trip verification failed:\nOriginal: {original:?}\nDecoded: {decoded:?}"
    );

    let reencoded = codec::encode(&decoded).expect("Re-encode should succeed");
    assert_eq!(reencoded, encoded, "Encoding is not deterministic");
}

/// A small single blueprint with three entities
pub fn sample_blueprint() -> Value {
    json!({
        "blueprint": {
            "icons": [{"signal": {"type": "item", "name": "iron-chest"}, "index": 1}],
            "entities": [
                {"entity_number": 1, "name": "iron-chest", "position": {"x": 0.5, "y": 0.5}},
                {"entity_number": 2, "name": "transport-belt", "position": {"x": 1.5, "y": 0.5}, "direction": 2},
                {"entity_number": 3, "name": "transport-belt", "position": {"x": 2.5, "y": 0.5}, "direction": 2}
            ],
            "item": "blueprint",
            "label": "Chest feed",
            "version": 281479275151360_u64
        }
    })
}

/// A blueprint with `count` belts in a row, which compresses very well
pub fn belt_line(count: u32) -> Value {
    let entities: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "entity_number": n,
                "name": "transport-belt",
                "position": {"x": f64::from(n) + 0.5, "y": 0.5},
                "direction": 2
            })
        })
        .collect();
    json!({
        "blueprint": {
            "entities": entities,
            "item": "blueprint",
            "label": "Belt line",
            "version": 281479275151360_u64
        }
    })
}

/// A book holding a blueprint, an upgrade planner and a nested book
pub fn sample_book() -> Value {
    json!({
        "blueprint_book": {
            "blueprints": [
                {
                    "blueprint": {
                        "entities": [
                            {"entity_number": 1, "name": "small-electric-pole", "position": {"x": 0.5, "y": 0.5}}
                        ],
                        "item": "blueprint",
                        "label": "Pole",
                        "version": 281479275151360_u64
                    },
                    "index": 0
                },
                {
                    "upgrade_planner": {
                        "settings": {"mappers": []},
                        "item": "upgrade-planner",
                        "version": 281479275151360_u64
                    },
                    "index": 1
                },
                {
                    "blueprint_book": {
                        "blueprints": [
                            {"blueprint": {"item": "blueprint", "label": "Inner"}, "index": 0}
                        ],
                        "item": "blueprint-book",
                        "label": "Nested",
                        "active_index": 0
                    },
                    "index": 2
                }
            ],
            "item": "blueprint-book",
            "label": "Starter book",
            "active_index": 0,
            "version": 281479275151360_u64
        }
    })
}
