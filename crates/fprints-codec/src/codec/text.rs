//! Conversion between payload bytes and JSON text

use super::error::{DecodeResult, EncodeError, EncodeResult};

/// How payload bytes map onto the characters of the JSON text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// One byte per character, code points 0-255
    #[default]
    Latin1,
    /// UTF-8, as written by the site's newer serializer
    Utf8,
}

impl TextEncoding {
    /// Turn inflated payload bytes into text
    pub fn decode(self, bytes: Vec<u8>) -> DecodeResult<String> {
        match self {
            Self::Latin1 => Ok(latin1_to_string(&bytes)),
            Self::Utf8 => Ok(String::from_utf8(bytes)?),
        }
    }

    /// Turn JSON text into payload bytes
    pub fn encode(self, text: &str) -> EncodeResult<Vec<u8>> {
        match self {
            Self::Latin1 => string_to_latin1(text),
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
        }
    }
}

/// Map every byte to the char with the same code point
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Map every char to a single byte, failing on code points above U+00FF
pub fn string_to_latin1(text: &str) -> EncodeResult<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(position, ch)| {
            u8::try_from(ch).map_err(|_| EncodeError::UnrepresentableChar { ch, position })
        })
        .collect()
}
