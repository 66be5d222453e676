//! Conversion of 0.14 trees into the current blueprint layout

use super::error::{LegacyParseError, LegacyResult};
use serde_json::{Map, Value, json};

/// Version number stamped on upgraded blueprints
pub const LEGACY_VERSION: u64 = 12345567890;

/// JavaScript truthiness, which decides which 0.14 fields are used
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| truthy(value))
}

fn as_list<'a>(value: Option<&'a Value>, what: &str) -> LegacyResult<&'a [Value]> {
    match value {
        None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(LegacyParseError::Upgrade(format!(
            "{what} is not a list: {other}"
        ))),
    }
}

/// Whether a 0.14 tree is a blueprint book
pub fn is_legacy_book(value: &Value) -> bool {
    value.get("book").is_some()
        || value.get("type").and_then(Value::as_str) == Some("blueprint-book")
}

/// Convert a decoded 0.14 tree into a `blueprint` or `blueprint_book` tree
pub fn upgrade(value: &Value) -> LegacyResult<Value> {
    let object = value
        .as_object()
        .ok_or_else(|| LegacyParseError::Upgrade("root is not a table".to_string()))?;

    if is_legacy_book(value) {
        upgrade_book(object)
    } else {
        upgrade_single(object)
    }
}

fn upgrade_single(object: &Map<String, Value>) -> LegacyResult<Value> {
    let (icons, label, entities) = match field(object, "data").and_then(Value::as_object) {
        Some(data) => (data.get("icons"), data.get("label"), data.get("entities")),
        None => (object.get("icons"), object.get("name"), object.get("entities")),
    };

    let entities = as_list(entities.filter(|e| truthy(e)), "entities")?
        .iter()
        .enumerate()
        .map(|(index, entity)| upgrade_entity(index, entity))
        .collect::<LegacyResult<Vec<_>>>()?;

    let mut blueprint = Map::new();
    if let Some(icons) = icons {
        blueprint.insert("icons".to_string(), icons.clone());
    }
    blueprint.insert("entities".to_string(), Value::Array(entities));
    blueprint.insert("item".to_string(), json!("blueprint"));
    if let Some(label) = label {
        blueprint.insert("label".to_string(), label.clone());
    }
    blueprint.insert("version".to_string(), json!(LEGACY_VERSION));

    Ok(json!({ "blueprint": blueprint }))
}

/// Number an entity and turn `[{item, count}]` into `[{<item>: count}]`
fn upgrade_entity(index: usize, entity: &Value) -> LegacyResult<Value> {
    let mut entity = entity
        .as_object()
        .cloned()
        .ok_or_else(|| LegacyParseError::Upgrade(format!("entity {} is not a table", index + 1)))?;

    entity.insert("entity_number".to_string(), json!(index + 1));

    if let Some(items) = field(&entity, "items") {
        let converted = as_list(Some(items), "entity items")?
            .iter()
            .map(|item| {
                let name = match item.get("item") {
                    Some(Value::String(name)) => name.clone(),
                    Some(other @ Value::Number(_)) => other.to_string(),
                    _ => {
                        return Err(LegacyParseError::Upgrade(format!(
                            "item without a name in entity {}",
                            index + 1
                        )));
                    }
                };
                let mut stack = Map::new();
                if let Some(count) = item.get("count") {
                    stack.insert(name, count.clone());
                }
                Ok(Value::Object(stack))
            })
            .collect::<LegacyResult<Vec<_>>>()?;
        entity.insert("items".to_string(), Value::Array(converted));
    }

    Ok(Value::Object(entity))
}

fn upgrade_book(object: &Map<String, Value>) -> LegacyResult<Value> {
    if let Some(data) = field(object, "data").and_then(Value::as_object) {
        let mut entries = Vec::new();
        if let Some(active) = field(data, "active") {
            entries.push(active);
        }
        entries.extend(as_list(field(data, "main"), "book main list")?);
        return book_from_entries(&entries, data.get("label"));
    }

    match field(object, "book") {
        Some(Value::Array(slots)) => {
            // The first slot of an exported book is always empty
            let entries: Vec<&Value> = slots.iter().skip(1).collect();
            book_from_entries(&entries, object.get("name"))
        }
        Some(Value::Object(slots)) => {
            let mut pairs: Vec<(&String, &Value)> = slots.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            let entries: Vec<&Value> = pairs.into_iter().map(|(_, entry)| entry).collect();
            book_from_entries(&entries, object.get("label"))
        }
        Some(other) => Err(LegacyParseError::Upgrade(format!(
            "book is not a table: {other}"
        ))),
        None => book_from_entries(&[], None),
    }
}

fn book_from_entries(entries: &[&Value], label: Option<&Value>) -> LegacyResult<Value> {
    let blueprints = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Ok(json!({
                "blueprint": upgrade_book_entry(index, entry)?,
                "index": index,
            }))
        })
        .collect::<LegacyResult<Vec<_>>>()?;

    let mut book = Map::new();
    book.insert("blueprints".to_string(), Value::Array(blueprints));
    book.insert("item".to_string(), json!("blueprint-book"));
    if let Some(label) = label {
        book.insert("label".to_string(), label.clone());
    }
    book.insert("active_index".to_string(), json!(0));
    book.insert("version".to_string(), json!(LEGACY_VERSION));

    Ok(json!({ "blueprint_book": book }))
}

/// Convert one book slot; empty slots stay null
fn upgrade_book_entry(index: usize, entry: &Value) -> LegacyResult<Value> {
    let object = match entry {
        Value::Null => return Ok(Value::Null),
        Value::Object(object) => object,
        other => {
            return Err(LegacyParseError::Upgrade(format!(
                "book slot {index} is not a table: {other}"
            )));
        }
    };

    let source = field(object, "tiles").or_else(|| field(object, "entities"));
    let entities = as_list(source, "book entry entities")?
        .iter()
        .enumerate()
        .map(|(number, entity)| {
            let mut numbered = Map::new();
            numbered.insert("entity_number".to_string(), json!(number + 1));
            if let Some(fields) = entity.as_object() {
                numbered.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            Value::Object(numbered)
        })
        .collect();

    let mut blueprint = Map::new();
    if let Some(icons) = object.get("icons") {
        blueprint.insert("icons".to_string(), icons.clone());
    }
    blueprint.insert("entities".to_string(), Value::Array(entities));
    blueprint.insert("item".to_string(), json!("blueprint"));
    if let Some(label) = field(object, "label").or_else(|| object.get("name")) {
        blueprint.insert("label".to_string(), label.clone());
    }
    blueprint.insert("version".to_string(), json!(LEGACY_VERSION));

    Ok(Value::Object(blueprint))
}
