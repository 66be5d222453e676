//! Tokenizer for Lua table literals

use super::error::{LegacyParseError, LegacyResult};

/// Classification of a Lua token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `=`
    Equals,
    /// `,` or `;`
    Separator,
    /// Identifier that is not a keyword
    Name,
    /// `nil`
    Nil,
    /// `true`
    True,
    /// `false`
    False,
    /// Numeric literal
    Number,
    /// Quoted string literal, quotes included
    Str,
}

impl TokKind {
    /// Human readable name for error messages
    pub const fn describe(self) -> &'static str {
        match self {
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Equals => "'='",
            Self::Separator => "',' or ';'",
            Self::Name => "name",
            Self::Nil => "'nil'",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Number => "number",
            Self::Str => "string",
        }
    }
}

/// A token borrowing its text from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token classification
    pub kind: TokKind,
    /// Source text, `&input[start..start + text.len()]`
    pub text: &'a str,
    /// Byte offset of the first character
    pub start: usize,
}

/// Split Lua table text into tokens
///
/// Whitespace and `--` line comments are skipped.
pub fn tokenize(input: &str) -> LegacyResult<Vec<Token<'_>>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let kind = match bytes[pos] {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
                continue;
            }
            b'-' if bytes.get(pos + 1) == Some(&b'-') => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
                continue;
            }
            b'{' => {
                pos += 1;
                TokKind::LBrace
            }
            b'}' => {
                pos += 1;
                TokKind::RBrace
            }
            b'[' => {
                pos += 1;
                TokKind::LBracket
            }
            b']' => {
                pos += 1;
                TokKind::RBracket
            }
            b'=' => {
                pos += 1;
                TokKind::Equals
            }
            b',' | b';' => {
                pos += 1;
                TokKind::Separator
            }
            quote @ (b'"' | b'\'') => {
                pos = scan_string(bytes, pos, quote)?;
                TokKind::Str
            }
            b'-' | b'.' | b'0'..=b'9' => {
                pos = scan_number(bytes, pos).ok_or_else(|| LegacyParseError::InvalidNumber {
                    text: input[start..].chars().take(16).collect(),
                    position: start,
                })?;
                TokKind::Number
            }
            b if b.is_ascii_alphabetic() || b == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                    pos += 1;
                }
                match &input[start..pos] {
                    "nil" => TokKind::Nil,
                    "true" => TokKind::True,
                    "false" => TokKind::False,
                    _ => TokKind::Name,
                }
            }
            _ => {
                return Err(LegacyParseError::UnexpectedChar {
                    found: input[pos..].chars().next().unwrap_or('?'),
                    position: pos,
                });
            }
        };

        tokens.push(Token {
            kind,
            text: &input[start..pos],
            start,
        });
    }

    Ok(tokens)
}

/// Find the end of a quoted string, returning the offset after the closing quote
///
/// A backslash skips the following byte so escaped quotes stay inside the
/// literal. Escapes are not otherwise interpreted.
fn scan_string(bytes: &[u8], start: usize, quote: u8) -> LegacyResult<usize> {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b if b == quote => return Ok(pos + 1),
            _ => pos += 1,
        }
    }
    Err(LegacyParseError::UnterminatedString(start))
}

/// Find the end of a number literal
///
/// Accepts an optional minus sign followed by a `0x` hex literal or decimal
/// digits with optional fraction and exponent. Returns `None` when no digits
/// are present.
pub(crate) fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }

    if bytes.get(pos) == Some(&b'0') && matches!(bytes.get(pos + 1), Some(b'x' | b'X')) {
        let digits = pos + 2;
        pos = digits;
        while bytes.get(pos).is_some_and(u8::is_ascii_hexdigit) {
            pos += 1;
        }
        return (pos > digits).then_some(pos);
    }

    let mut digits = 0;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
        digits += 1;
    }
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = exp;
        while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            exp += 1;
        }
        if exp == exp_digits {
            return None;
        }
        pos = exp;
    }

    Some(pos)
}
