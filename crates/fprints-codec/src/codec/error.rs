//! Codec error types

use thiserror::Error;

/// Failure to decode a current-format blueprint string
///
/// Every step of the decode path reports through this one type so callers
/// can treat "not a current blueprint string" as a single category.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Nothing to decode after trimming and removing the version marker
    #[error("empty blueprint string")]
    EmptyInput,

    /// Payload is not valid base64
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Compressed stream is corrupt
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// Compressed stream stops before its end marker and checksum
    #[error("compressed stream is truncated after {consumed} bytes")]
    Truncated {
        /// Bytes consumed before the stream stalled
        consumed: usize,
    },

    /// Bytes follow the end of the compressed stream
    #[error("{trailing} unexpected bytes after the compressed stream")]
    TrailingData {
        /// Number of bytes left over
        trailing: usize,
    },

    /// Decompressed output would exceed the size limit
    #[error("decompressed size exceeds limit of {limit} bytes")]
    TooLarge {
        /// Limit that was hit
        limit: usize,
    },

    /// Payload text is not UTF-8 (only with [`super::TextEncoding::Utf8`])
    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Payload text is not JSON
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to encode a tree as a blueprint string
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The tree could not be serialized
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A character does not fit in one byte
    #[error("character {ch:?} at position {position} cannot be stored as a single byte")]
    UnrepresentableChar {
        /// Offending character
        ch: char,
        /// Character index in the serialized JSON
        position: usize,
    },

    /// Compression level outside 0-9
    #[error("invalid compression level {0}, must be 0-9")]
    InvalidLevel(u32),

    /// Compressor I/O failure
    #[error("compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encode operations
pub type EncodeResult<T> = Result<T, EncodeError>;
