//! Conversion of a [`LuaNode`] tree into JSON

use super::error::{LegacyParseError, LegacyResult};
use super::lexer::scan_number;
use super::parser::{Key, LuaNode};
use serde_json::{Map, Number, Value};

/// Largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Options for turning Lua values into JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Map `false` to `false`
    ///
    /// Off by default: older versions of the site turned every boolean
    /// literal into `true`, and trees stored by them depend on that.
    pub literal_booleans: bool,
}

/// Depth-first visitor from Lua nodes to JSON values
#[derive(Debug, Clone, Copy, Default)]
pub struct LuaTableToJson {
    options: ParseOptions,
}

impl LuaTableToJson {
    /// Create a visitor with the given options
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Convert a node and everything below it
    pub fn visit(&self, node: &LuaNode<'_>) -> LegacyResult<Value> {
        match node {
            LuaNode::Dictionary(fields) => {
                let mut object = Map::with_capacity(fields.len());
                for field in fields {
                    object.insert(key_text(field.key), self.visit(&field.value)?);
                }
                Ok(Value::Object(object))
            }
            LuaNode::Array(values) => values
                .iter()
                .map(|value| self.visit(value))
                .collect::<LegacyResult<Vec<_>>>()
                .map(Value::Array),
            LuaNode::Nil => Ok(Value::Null),
            LuaNode::Bool(value) => Ok(Value::Bool(*value || !self.options.literal_booleans)),
            LuaNode::Number { text, start } => number_value(text, *start),
            LuaNode::Str(quoted) => Ok(Value::String(unquote(quoted).to_string())),
        }
    }
}

/// Strip the surrounding quotes of a string literal
fn unquote(quoted: &str) -> &str {
    quoted.get(1..quoted.len().saturating_sub(1)).unwrap_or_default()
}

/// Normalize a dictionary key to its JSON object key
///
/// A string key whose content is a number literal becomes that number's
/// canonical text, so `["01"]` and `[1]` land on the same key as `"1"`.
/// Blank string keys count as zero.
fn key_text(key: Key<'_>) -> String {
    match key {
        Key::Name(name) => name.to_string(),
        Key::Number(text) => text.to_string(),
        Key::Str(quoted) => {
            let content = unquote(quoted);
            let trimmed = content.trim();
            if trimmed.is_empty() {
                return "0".to_string();
            }
            let is_number = scan_number(trimmed.as_bytes(), 0) == Some(trimmed.len());
            match is_number.then(|| parse_number(trimmed)).flatten() {
                Some(number) => number_key(number),
                None => content.to_string(),
            }
        }
    }
}

/// Parse a number literal the way a JavaScript `Number()` call would
fn parse_number(text: &str) -> Option<f64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let magnitude = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16).ok()? as f64,
        None => unsigned.parse::<f64>().ok()?,
    };

    magnitude.is_finite().then_some(if negative { -magnitude } else { magnitude })
}

fn number_key(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

/// Convert a number literal to a JSON number
///
/// Integral values become JSON integers, as older versions of the site
/// serialized them (`1.0` and `1` are the same number there).
fn number_value(text: &str, start: usize) -> LegacyResult<Value> {
    if let Ok(integer) = text.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    if let Ok(integer) = text.parse::<u64>() {
        return Ok(Value::from(integer));
    }

    let number = parse_number(text).ok_or_else(|| LegacyParseError::InvalidNumber {
        text: text.to_string(),
        position: start,
    })?;

    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        return Ok(Value::from(number as i64));
    }

    Number::from_f64(number)
        .map(Value::Number)
        .ok_or_else(|| LegacyParseError::InvalidNumber {
            text: text.to_string(),
            position: start,
        })
}
