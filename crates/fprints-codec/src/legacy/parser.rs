//! Recursive descent parser producing a [`LuaNode`] tree

use super::error::{LegacyParseError, LegacyResult};
use super::lexer::{TokKind, Token, tokenize};

/// Maximum table nesting accepted by the parser
pub const MAX_DEPTH: usize = 256;

/// Parsed Lua value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LuaNode<'a> {
    /// `{key = value, ...}`
    Dictionary(Vec<Field<'a>>),
    /// `{value, ...}`
    Array(Vec<LuaNode<'a>>),
    /// `nil`
    Nil,
    /// `true` or `false`
    Bool(bool),
    /// Number literal text and its byte offset in the input
    Number {
        /// Literal text
        text: &'a str,
        /// Byte offset of the literal
        start: usize,
    },
    /// String literal text, quotes included
    Str(&'a str),
}

/// One `key = value` entry of a dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    /// Field key
    pub key: Key<'a>,
    /// Field value
    pub value: LuaNode<'a>,
}

/// Dictionary key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    /// Bare identifier
    Name(&'a str),
    /// Quoted string, quotes included, bare or in brackets
    Str(&'a str),
    /// Number literal in brackets
    Number(&'a str),
}

/// Parser for Lua table literals
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Tokenize the input and create a parser over it
    pub fn new(input: &'a str) -> LegacyResult<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            depth: 0,
        })
    }

    /// Parse the input as a single top-level dictionary
    pub fn parse(mut self) -> LegacyResult<LuaNode<'a>> {
        if self.tokens.is_empty() {
            return Err(LegacyParseError::EmptyInput);
        }

        let node = self.parse_table()?;
        if matches!(node, LuaNode::Array(_)) {
            return Err(LegacyParseError::NotADictionary);
        }

        // Ensure we consumed all input
        if let Some(token) = self.peek() {
            return Err(LegacyParseError::TrailingInput(token.start));
        }
        Ok(node)
    }

    /// Peek at the current token without consuming it
    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self, offset: usize) -> Option<TokKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    /// Consume the next token, returning it
    fn next(&mut self, expected: &'static str) -> LegacyResult<Token<'a>> {
        let token = *self
            .tokens
            .get(self.pos)
            .ok_or(LegacyParseError::UnexpectedEnd(expected))?;
        self.pos += 1;
        Ok(token)
    }

    /// Consume a token of a specific kind
    fn consume(&mut self, kind: TokKind) -> LegacyResult<Token<'a>> {
        let token = self.next(kind.describe())?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(kind.describe(), &token))
        }
    }

    /// Whether the upcoming tokens start a `key = value` field
    fn at_field(&self) -> bool {
        match self.peek_kind(0) {
            Some(TokKind::LBracket) => true,
            Some(TokKind::Name | TokKind::Str) => self.peek_kind(1) == Some(TokKind::Equals),
            _ => false,
        }
    }

    /// Parse a braced table, deciding between dictionary and array
    fn parse_table(&mut self) -> LegacyResult<LuaNode<'a>> {
        let open = self.consume(TokKind::LBrace)?;
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(LegacyParseError::TooDeep(MAX_DEPTH));
        }

        let node = if self.peek_kind(0) == Some(TokKind::RBrace) || self.at_field() {
            self.parse_dictionary(open.start)?
        } else {
            self.parse_array(open.start)?
        };

        self.consume(TokKind::RBrace)?;
        self.depth -= 1;
        Ok(node)
    }

    /// Parse dictionary fields up to (not including) the closing brace
    fn parse_dictionary(&mut self, start: usize) -> LegacyResult<LuaNode<'a>> {
        let mut fields = Vec::new();
        while self.peek_kind(0) != Some(TokKind::RBrace) {
            if !self.at_field() {
                if self.peek().is_some() {
                    return Err(LegacyParseError::MixedTable(start));
                }
                return Err(LegacyParseError::UnexpectedEnd("'}'"));
            }
            fields.push(self.parse_field()?);
            if !self.parse_separator()? {
                break;
            }
        }
        Ok(LuaNode::Dictionary(fields))
    }

    /// Parse array values up to (not including) the closing brace
    fn parse_array(&mut self, start: usize) -> LegacyResult<LuaNode<'a>> {
        let mut values = Vec::new();
        while self.peek_kind(0) != Some(TokKind::RBrace) {
            if self.at_field() {
                return Err(LegacyParseError::MixedTable(start));
            }
            values.push(self.parse_value()?);
            if !self.parse_separator()? {
                break;
            }
        }
        Ok(LuaNode::Array(values))
    }

    /// Consume a separator if present
    ///
    /// Returns `false` when the table must end here.
    fn parse_separator(&mut self) -> LegacyResult<bool> {
        match self.peek_kind(0) {
            Some(TokKind::Separator) => {
                self.pos += 1;
                Ok(true)
            }
            Some(TokKind::RBrace) => Ok(false),
            Some(_) => {
                let token = self.next("',' or '}'")?;
                Err(unexpected("',' or '}'", &token))
            }
            None => Err(LegacyParseError::UnexpectedEnd("'}'")),
        }
    }

    fn parse_field(&mut self) -> LegacyResult<Field<'a>> {
        let key = self.parse_key()?;
        self.consume(TokKind::Equals)?;
        let value = self.parse_value()?;
        Ok(Field { key, value })
    }

    fn parse_key(&mut self) -> LegacyResult<Key<'a>> {
        let token = self.next("key")?;
        match token.kind {
            TokKind::Name => Ok(Key::Name(token.text)),
            TokKind::Str => Ok(Key::Str(token.text)),
            TokKind::LBracket => {
                let inner = self.next("string or number key")?;
                let key = match inner.kind {
                    TokKind::Str => Key::Str(inner.text),
                    TokKind::Number => Key::Number(inner.text),
                    _ => return Err(unexpected("string or number key", &inner)),
                };
                self.consume(TokKind::RBracket)?;
                Ok(key)
            }
            _ => Err(unexpected("key", &token)),
        }
    }

    fn parse_value(&mut self) -> LegacyResult<LuaNode<'a>> {
        if self.peek_kind(0) == Some(TokKind::LBrace) {
            return self.parse_table();
        }

        let token = self.next("value")?;
        match token.kind {
            TokKind::Nil => Ok(LuaNode::Nil),
            TokKind::True => Ok(LuaNode::Bool(true)),
            TokKind::False => Ok(LuaNode::Bool(false)),
            TokKind::Number => Ok(LuaNode::Number {
                text: token.text,
                start: token.start,
            }),
            TokKind::Str => Ok(LuaNode::Str(token.text)),
            _ => Err(unexpected("value", &token)),
        }
    }
}

fn unexpected(expected: &'static str, token: &Token<'_>) -> LegacyParseError {
    LegacyParseError::UnexpectedToken {
        expected,
        found: token.text.to_string(),
        position: token.start,
    }
}
