//! Entity and item histograms of a blueprint

use crate::variant::{self, BlueprintKind, UnrecognizedVariant};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Name and count pairs, most frequent first
pub type Histogram = Vec<(String, u64)>;

fn sorted(counts: HashMap<String, u64>) -> Histogram {
    let mut pairs: Histogram = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

fn name_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn list<'a>(content: &'a Value, key: &str) -> &'a [Value] {
    content
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn count_entities(content: &Value, counts: &mut HashMap<String, u64>) {
    for entity in list(content, "entities").iter().chain(list(content, "tiles")) {
        if let Some(name) = entity.get("name").and_then(name_of) {
            *counts.entry(name).or_default() += 1;
        }
    }
}

fn count_items(content: &Value, counts: &mut HashMap<String, u64>) {
    for entity in list(content, "entities") {
        match entity.get("items") {
            Some(Value::Array(items)) => {
                for item in items {
                    count_item(item, counts);
                }
            }
            // 1.x stores a plain name to count map
            Some(map @ Value::Object(_)) => count_item(map, counts),
            _ => {}
        }
    }
}

fn count_item(item: &Value, counts: &mut HashMap<String, u64>) {
    let Some(object) = item.as_object() else {
        return;
    };

    if let (Some(name), Some(count)) = (
        object.get("item").and_then(name_of),
        object.get("count").and_then(Value::as_u64),
    ) {
        *counts.entry(name).or_default() += count;
        return;
    }

    if let Some(name) = object.get("id").and_then(|id| id.get("name")).and_then(name_of) {
        // One per inventory stack, or one when the stacks are unknown
        let stacks = match object.get("items").and_then(|items| items.get("in_inventory")) {
            Some(Value::Array(stacks)) => stacks.len() as u64,
            Some(Value::Null) => 0,
            Some(_) | None => 1,
        };
        *counts.entry(name).or_default() += stacks;
        return;
    }

    for (name, count) in object {
        if let Some(count) = count.as_u64() {
            *counts.entry(name.clone()).or_default() += count;
        }
    }
}

/// Count entities and tiles of a blueprint's content by name
pub fn entity_histogram(content: &Value) -> Histogram {
    let mut counts = HashMap::new();
    count_entities(content, &mut counts);
    sorted(counts)
}

/// Sum the items requested by a blueprint's entities
///
/// Three layouts are understood: `{item, count}` records, 2.0
/// `{id: {name}, items: {in_inventory}}` records counted per stack, and plain
/// `{name: count}` maps.
pub fn item_histogram(content: &Value) -> Histogram {
    let mut counts = HashMap::new();
    count_items(content, &mut counts);
    sorted(counts)
}

/// Both histograms of a blueprint or a whole book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histograms {
    /// Entities and tiles by name
    pub entities: Histogram,
    /// Requested items by name
    pub items: Histogram,
}

impl Histograms {
    /// Histograms of one blueprint's content
    pub fn of_content(content: &Value) -> Self {
        Self {
            entities: entity_histogram(content),
            items: item_histogram(content),
        }
    }

    /// Histograms of a decoded tree
    ///
    /// Books are summed over every blueprint they contain, at any depth.
    /// Planners place nothing and give empty histograms.
    pub fn of_tree(value: &Value) -> Result<Self, UnrecognizedVariant> {
        let mut entities = HashMap::new();
        let mut items = HashMap::new();
        collect(value, &mut entities, &mut items)?;
        Ok(Self {
            entities: sorted(entities),
            items: sorted(items),
        })
    }
}

fn collect(
    value: &Value,
    entities: &mut HashMap<String, u64>,
    items: &mut HashMap<String, u64>,
) -> Result<(), UnrecognizedVariant> {
    let (kind, content) = variant::content(value)?;
    match kind {
        BlueprintKind::Blueprint => {
            count_entities(content, entities);
            count_items(content, items);
        }
        BlueprintKind::Book => {
            for entry in list(content, "blueprints") {
                if variant::classify(entry).is_ok() {
                    collect(entry, entities, items)?;
                }
            }
        }
        BlueprintKind::UpgradePlanner | BlueprintKind::DeconstructionPlanner => {}
    }
    Ok(())
}
