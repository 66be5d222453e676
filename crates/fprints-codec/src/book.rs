//! Paths into blueprint books
//!
//! A path is a dotted list of 1-based positions in `blueprint_book.blueprints`.
//! `2.1` selects the first entry of the book held in the second entry.

use crate::variant::{self, BlueprintKind};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// A book path that does not lead to a blueprint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookPathError {
    /// The tree at this point is not a book
    #[error("invalid path {path}: no blueprint book at {at}")]
    NoBook {
        /// Full path requested
        path: String,
        /// Path traversed so far
        at: String,
    },

    /// A path part is not a number
    #[error("invalid path {path}: \"{part}\" is not a valid number at {at}")]
    NotANumber {
        /// Full path requested
        path: String,
        /// Offending part
        part: String,
        /// Path traversed so far
        at: String,
    },

    /// A path part is zero or negative
    #[error("invalid path {path}: index must be positive at {at}")]
    NotPositive {
        /// Full path requested
        path: String,
        /// Path traversed so far
        at: String,
    },

    /// A path part is past the end of the book
    #[error("invalid path {path}: index {part} is out of bounds at {at} (valid range: 1-{len})")]
    OutOfRange {
        /// Full path requested
        path: String,
        /// Offending part
        part: String,
        /// Path traversed so far
        at: String,
        /// Number of entries in the book
        len: usize,
    },

    /// The selected entry holds no blueprint
    #[error("invalid path {path}: no blueprint at index {part} at {at}")]
    NoBlueprint {
        /// Full path requested
        path: String,
        /// Offending part
        part: String,
        /// Path traversed so far
        at: String,
    },
}

/// Extract the blueprint at `path` from a book
///
/// An empty path returns the tree unchanged. Intermediate parts must select
/// nested books and the last part must select a blueprint, which is returned
/// as `{"blueprint": ...}`.
pub fn extract(value: &Value, path: &str) -> Result<Value, BookPathError> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(value.clone());
    }

    let parts: Vec<&str> = path.split('.').collect();
    let mut current = value;
    let mut at = String::new();

    for (step, part) in parts.iter().enumerate() {
        if !at.is_empty() {
            at.push('.');
        }
        at.push_str(part);

        let Some(entries) = current
            .get("blueprint_book")
            .and_then(|book| book.get("blueprints"))
            .and_then(Value::as_array)
        else {
            return Err(BookPathError::NoBook {
                path: path.to_string(),
                at,
            });
        };

        let position: i64 = part.trim().parse().map_err(|_| BookPathError::NotANumber {
            path: path.to_string(),
            part: (*part).to_string(),
            at: at.clone(),
        })?;
        if position < 1 {
            return Err(BookPathError::NotPositive {
                path: path.to_string(),
                at,
            });
        }

        let Some(entry) = usize::try_from(position - 1)
            .ok()
            .and_then(|index| entries.get(index))
        else {
            return Err(BookPathError::OutOfRange {
                path: path.to_string(),
                part: (*part).to_string(),
                at,
                len: entries.len(),
            });
        };

        let last = step + 1 == parts.len();
        let wanted = if last { "blueprint" } else { "blueprint_book" };
        if entry.get(wanted).is_none_or(Value::is_null) {
            if last {
                return Err(BookPathError::NoBlueprint {
                    path: path.to_string(),
                    part: (*part).to_string(),
                    at,
                });
            }
            return Err(BookPathError::NoBook {
                path: path.to_string(),
                at,
            });
        }
        current = entry;
    }

    Ok(json!({ "blueprint": current["blueprint"].clone() }))
}

/// One slot of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookEntry {
    /// 1-based position, as used in paths
    pub position: usize,
    /// `index` field stored with the entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Variant held by the slot, `None` for empty slots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<BlueprintKind>,
    /// Label of the held variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// List the slots of a book, empty for anything else
pub fn entries(value: &Value) -> Vec<BookEntry> {
    value
        .get("blueprint_book")
        .and_then(|book| book.get("blueprints"))
        .and_then(Value::as_array)
        .map(|slots| {
            slots
                .iter()
                .enumerate()
                .map(|(i, slot)| {
                    let held = variant::content(slot).ok();
                    BookEntry {
                        position: i + 1,
                        index: slot.get("index").and_then(Value::as_u64),
                        kind: held.map(|(kind, _)| kind),
                        label: held
                            .and_then(|(_, content)| content.get("label"))
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}
