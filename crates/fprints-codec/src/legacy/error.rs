//! Legacy parser error types

use crate::codec::DecodeError;
use thiserror::Error;

/// Lua table parsing, envelope and upgrade errors
#[derive(Debug, Error)]
pub enum LegacyParseError {
    /// Empty input string
    #[error("empty Lua table text")]
    EmptyInput,

    /// Character that starts no token
    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar {
        /// Character found
        found: char,
        /// Byte offset in the input
        position: usize,
    },

    /// String literal without its closing quote
    #[error("unterminated string starting at position {0}")]
    UnterminatedString(usize),

    /// Malformed number literal
    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber {
        /// Literal text
        text: String,
        /// Byte offset in the input
        position: usize,
    },

    /// Token that does not fit the grammar here
    #[error("expected {expected} at position {position}, found '{found}'")]
    UnexpectedToken {
        /// What the grammar allows here
        expected: &'static str,
        /// Source text of the token found
        found: String,
        /// Byte offset in the input
        position: usize,
    },

    /// Input ends inside a table
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    /// Table with both keyed fields and bare values
    #[error("table at position {0} mixes keyed fields and bare values")]
    MixedTable(usize),

    /// Tables nested deeper than the parser allows
    #[error("tables nested deeper than {0} levels")]
    TooDeep(usize),

    /// Top-level table is a list, not a dictionary
    #[error("top-level table must have keyed fields")]
    NotADictionary,

    /// Input continues after the top-level table
    #[error("unexpected input after the table at position {0}")]
    TrailingInput(usize),

    /// The 0.14 envelope could not be unpacked
    #[error("invalid legacy envelope: {0}")]
    Envelope(#[from] DecodeError),

    /// The unpacked envelope is not a `do local _=...;return _;end` script
    #[error("legacy envelope does not contain a table assignment")]
    MissingAssignment,

    /// The decoded tree does not have the 0.14 blueprint layout
    #[error("cannot upgrade legacy blueprint: {0}")]
    Upgrade(String),
}

/// Result type for legacy operations
pub type LegacyResult<T> = Result<T, LegacyParseError>;
