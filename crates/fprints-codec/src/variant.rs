//! Classification of decoded trees into the four blueprint variants

use crate::version::GameVersion;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Top-level shape of a decoded blueprint tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlueprintKind {
    /// `blueprint`
    Blueprint,
    /// `blueprint_book`
    #[serde(rename = "blueprint-book")]
    Book,
    /// `upgrade_planner`
    UpgradePlanner,
    /// `deconstruction_planner`
    DeconstructionPlanner,
}

impl BlueprintKind {
    /// All variants, in detection order
    pub const ALL: [Self; 4] = [
        Self::Blueprint,
        Self::Book,
        Self::UpgradePlanner,
        Self::DeconstructionPlanner,
    ];

    /// Key holding this variant's content in the JSON tree
    pub const fn key(self) -> &'static str {
        match self {
            Self::Blueprint => "blueprint",
            Self::Book => "blueprint_book",
            Self::UpgradePlanner => "upgrade_planner",
            Self::DeconstructionPlanner => "deconstruction_planner",
        }
    }

    /// Item name the game uses for this variant
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blueprint => "blueprint",
            Self::Book => "blueprint-book",
            Self::UpgradePlanner => "upgrade-planner",
            Self::DeconstructionPlanner => "deconstruction-planner",
        }
    }

    /// Whether description and icons live under `settings`
    pub const fn is_planner(self) -> bool {
        matches!(self, Self::UpgradePlanner | Self::DeconstructionPlanner)
    }
}

impl fmt::Display for BlueprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a tree is not exactly one blueprint variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnrecognizedVariant {
    /// The root is not a JSON object
    #[error("root is not an object")]
    NotAnObject,

    /// None of the variant keys is present
    #[error("no known blueprint variant key present")]
    Missing,

    /// More than one variant key is present
    #[error("more than one variant key present: {}", .0.join(", "))]
    Ambiguous(Vec<&'static str>),

    /// A book entry is not a valid variant
    #[error("book entry {path}: {source}")]
    InvalidEntry {
        /// Dotted 1-based path of the entry
        path: String,
        /// What is wrong with the entry
        source: Box<UnrecognizedVariant>,
    },
}

fn present(object: &serde_json::Map<String, Value>) -> Vec<BlueprintKind> {
    BlueprintKind::ALL
        .into_iter()
        .filter(|kind| object.get(kind.key()).is_some_and(|v| !v.is_null()))
        .collect()
}

/// Determine which of the four variants a tree is
///
/// Exactly one variant key must be present with a non-null value.
pub fn classify(value: &Value) -> Result<BlueprintKind, UnrecognizedVariant> {
    let object = value.as_object().ok_or(UnrecognizedVariant::NotAnObject)?;
    match present(object).as_slice() {
        [] => Err(UnrecognizedVariant::Missing),
        [kind] => Ok(*kind),
        kinds => Err(UnrecognizedVariant::Ambiguous(
            kinds.iter().map(|kind| kind.key()).collect(),
        )),
    }
}

/// Classify a tree and return the content under its variant key
pub fn content(value: &Value) -> Result<(BlueprintKind, &Value), UnrecognizedVariant> {
    let kind = classify(value)?;
    // classify guarantees the key exists
    let inner = value.get(kind.key()).unwrap_or(&Value::Null);
    Ok((kind, inner))
}

/// Classify a tree and check every book entry below it
///
/// Null slots, and entries whose keys other than `index` are all null, are
/// empty book slots and are accepted.
pub fn validate(value: &Value) -> Result<BlueprintKind, UnrecognizedVariant> {
    let (kind, inner) = content(value)?;
    if kind == BlueprintKind::Book {
        validate_book(inner, "")?;
    }
    Ok(kind)
}

fn validate_book(book: &Value, prefix: &str) -> Result<(), UnrecognizedVariant> {
    let Some(entries) = book.get("blueprints").and_then(Value::as_array) else {
        return Ok(());
    };

    for (index, entry) in entries.iter().enumerate() {
        let path = format!("{prefix}{}", index + 1);
        if is_empty_slot(entry) {
            continue;
        }

        let (kind, inner) = content(entry).map_err(|source| UnrecognizedVariant::InvalidEntry {
            path: path.clone(),
            source: Box::new(source),
        })?;
        if kind == BlueprintKind::Book {
            validate_book(inner, &format!("{path}."))?;
        }
    }
    Ok(())
}

fn is_empty_slot(entry: &Value) -> bool {
    match entry {
        Value::Null => true,
        Value::Object(object) => object
            .iter()
            .all(|(key, value)| key == "index" || value.is_null()),
        _ => false,
    }
}

/// Summary of a decoded tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlueprintInfo {
    /// Variant of the tree
    pub kind: BlueprintKind,
    /// Player-given name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Player-given description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon signals, as found in the tree
    pub icons: Vec<Value>,
    /// Packed game version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl BlueprintInfo {
    /// Summarize a decoded tree
    pub fn from_value(value: &Value) -> Result<Self, UnrecognizedVariant> {
        let (kind, inner) = content(value)?;
        let details = if kind.is_planner() {
            inner.get("settings").unwrap_or(&Value::Null)
        } else {
            inner
        };

        Ok(Self {
            kind,
            label: text(inner.get("label")),
            description: text(details.get("description")),
            icons: details
                .get("icons")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            version: inner.get("version").and_then(Value::as_u64),
        })
    }

    /// Game version the tree was exported from
    pub fn game_version(&self) -> Option<GameVersion> {
        self.version.map(GameVersion::from_packed)
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
