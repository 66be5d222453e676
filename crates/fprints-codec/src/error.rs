//! Crate-level error type

use crate::book::BookPathError;
use crate::codec::{DecodeError, EncodeError};
use crate::legacy::LegacyParseError;
use crate::variant::UnrecognizedVariant;
use thiserror::Error;

/// Any failure while turning a blueprint string into a tree or back
#[derive(Debug, Error)]
pub enum BlueprintError {
    /// Base64, decompression or JSON failure in the current format
    #[error("could not decode blueprint: {0}")]
    Decode(#[from] DecodeError),

    /// Serialization or compression failure while encoding
    #[error("could not encode blueprint: {0}")]
    Encode(#[from] EncodeError),

    /// The legacy Lua table text or its envelope is malformed
    #[error("could not parse legacy blueprint: {0}")]
    LegacyParse(#[from] LegacyParseError),

    /// The tree is none of the four known variants
    #[error("unrecognized blueprint format: {0}")]
    UnrecognizedVariant(#[from] UnrecognizedVariant),

    /// A book path does not lead to a blueprint
    #[error(transparent)]
    BookPath(#[from] BookPathError),
}

/// Result type for crate-level operations
pub type BlueprintResult<T> = Result<T, BlueprintError>;
