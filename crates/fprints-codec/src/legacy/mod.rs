//! Decoding of 0.14-era Lua table blueprints
//!
//! ```
//! use fprints_codec::legacy;
//! use serde_json::json;
//!
//! let value = legacy::parse(r#"{name="Smelter",entities={{name="stone-furnace",position={x=0,y=0}}}}"#)
//!     .expect("parse");
//! assert_eq!(value["entities"][0]["name"], json!("stone-furnace"));
//!
//! let current = legacy::upgrade(&value).expect("upgrade");
//! assert_eq!(current["blueprint"]["label"], json!("Smelter"));
//! ```

mod envelope;
mod error;
mod lexer;
mod parser;
mod upgrade;
mod visitor;

pub use envelope::{ENVELOPE_PREFIX, extract_table, is_envelope, looks_like_table, unwrap_envelope};
pub use error::{LegacyParseError, LegacyResult};
pub use lexer::{TokKind, Token, tokenize};
pub use parser::{Field, Key, LuaNode, MAX_DEPTH, Parser};
pub use upgrade::{LEGACY_VERSION, is_legacy_book, upgrade};
pub use visitor::{LuaTableToJson, ParseOptions};

use serde_json::Value;
use tracing::trace;

/// Parse Lua table text into JSON with default options
pub fn parse(lua: &str) -> LegacyResult<Value> {
    parse_with(lua, ParseOptions::default())
}

/// Parse Lua table text into JSON
///
/// The text must be a single table literal with keyed fields at the top
/// level. Nested tables become JSON arrays when they hold bare values and
/// objects when they hold `key = value` fields.
pub fn parse_with(lua: &str, options: ParseOptions) -> LegacyResult<Value> {
    let tree = Parser::new(lua)?.parse()?;
    trace!(bytes = lua.len(), "parsed Lua table");
    LuaTableToJson::new(options).visit(&tree)
}
