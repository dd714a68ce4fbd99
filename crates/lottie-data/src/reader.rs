//! Pull-based token stream over a Lottie document.
//!
//! Parsers in `lottie-core` only depend on the [`TokenReader`] trait. The
//! [`JsonTokenReader`] implementation walks a `serde_json` document that has
//! been flattened into a token list, so object keys keep their document order.

use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

/// The kind of the next token in the stream, as returned by [`TokenReader::peek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Name,
    String,
    Number,
    Bool,
    Null,
    EndDocument,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::BeginObject => "object",
            TokenKind::EndObject => "end of object",
            TokenKind::BeginArray => "array",
            TokenKind::EndArray => "end of array",
            TokenKind::Name => "name",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Bool => "boolean",
            TokenKind::Null => "null",
            TokenKind::EndDocument => "end of document",
        }
    }

    /// True for tokens that close a container or the document.
    pub fn is_end(self) -> bool {
        matches!(
            self,
            TokenKind::EndObject | TokenKind::EndArray | TokenKind::EndDocument
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("expected {expected} but found {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },

    #[error("expected a value but found {found}")]
    NoValue { found: TokenKind },

    #[error("expected an integer but found {0}")]
    NotAnInteger(f64),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pull-based, skippable access to a hierarchical document.
pub trait TokenReader {
    /// Kind of the next token, without consuming it.
    fn peek(&self) -> TokenKind;

    fn begin_object(&mut self) -> Result<(), ReaderError>;
    fn end_object(&mut self) -> Result<(), ReaderError>;
    fn begin_array(&mut self) -> Result<(), ReaderError>;
    fn end_array(&mut self) -> Result<(), ReaderError>;

    /// Consumes the next object key.
    fn next_name(&mut self) -> Result<String, ReaderError>;
    fn next_number(&mut self) -> Result<f64, ReaderError>;
    fn next_string(&mut self) -> Result<String, ReaderError>;
    fn next_bool(&mut self) -> Result<bool, ReaderError>;

    /// Consumes and discards the next value node, whatever its shape.
    /// When positioned at a name, the name and its value are both skipped.
    fn skip_value(&mut self) -> Result<(), ReaderError>;

    /// Whether the current container has more elements.
    fn has_next(&self) -> bool {
        !self.peek().is_end()
    }

    fn next_long(&mut self) -> Result<i64, ReaderError> {
        let n = self.next_number()?;
        if !n.is_finite() || n.fract() != 0.0 || n < i64::MIN as f64 || n > i64::MAX as f64 {
            return Err(ReaderError::NotAnInteger(n));
        }
        Ok(n as i64)
    }

    fn next_int(&mut self) -> Result<i32, ReaderError> {
        let n = self.next_number()?;
        if !n.is_finite() || n.fract() != 0.0 || n < i32::MIN as f64 || n > i32::MAX as f64 {
            return Err(ReaderError::NotAnInteger(n));
        }
        Ok(n as i32)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Name(String),
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl Token {
    fn kind(&self) -> TokenKind {
        match self {
            Token::BeginObject => TokenKind::BeginObject,
            Token::EndObject => TokenKind::EndObject,
            Token::BeginArray => TokenKind::BeginArray,
            Token::EndArray => TokenKind::EndArray,
            Token::Name(_) => TokenKind::Name,
            Token::String(_) => TokenKind::String,
            Token::Number(_) => TokenKind::Number,
            Token::Bool(_) => TokenKind::Bool,
            Token::Null => TokenKind::Null,
        }
    }
}

/// [`TokenReader`] over an in-memory JSON document.
#[derive(Debug, Clone)]
pub struct JsonTokenReader {
    tokens: Vec<Token>,
    pos: usize,
}

impl JsonTokenReader {
    pub fn new(value: &JsonValue) -> Self {
        let mut tokens = Vec::new();
        flatten(value, &mut tokens);
        Self { tokens, pos: 0 }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ReaderError> {
        let value: JsonValue = serde_json::from_str(json)?;
        Ok(Self::new(&value))
    }

    /// Number of tokens not consumed yet.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), ReaderError> {
        let found = self.peek();
        if found != expected {
            return Err(ReaderError::UnexpectedToken { expected, found });
        }
        self.pos += 1;
        Ok(())
    }
}

fn flatten(value: &JsonValue, tokens: &mut Vec<Token>) {
    match value {
        JsonValue::Null => tokens.push(Token::Null),
        JsonValue::Bool(b) => tokens.push(Token::Bool(*b)),
        // Without arbitrary_precision every number has an f64 view.
        JsonValue::Number(n) => tokens.push(Token::Number(n.as_f64().unwrap_or(f64::NAN))),
        JsonValue::String(s) => tokens.push(Token::String(s.clone())),
        JsonValue::Array(items) => {
            tokens.push(Token::BeginArray);
            for item in items {
                flatten(item, tokens);
            }
            tokens.push(Token::EndArray);
        }
        JsonValue::Object(map) => {
            tokens.push(Token::BeginObject);
            for (key, item) in map {
                tokens.push(Token::Name(key.clone()));
                flatten(item, tokens);
            }
            tokens.push(Token::EndObject);
        }
    }
}

impl TokenReader for JsonTokenReader {
    fn peek(&self) -> TokenKind {
        self.current()
            .map(Token::kind)
            .unwrap_or(TokenKind::EndDocument)
    }

    fn begin_object(&mut self) -> Result<(), ReaderError> {
        self.expect(TokenKind::BeginObject)
    }

    fn end_object(&mut self) -> Result<(), ReaderError> {
        self.expect(TokenKind::EndObject)
    }

    fn begin_array(&mut self) -> Result<(), ReaderError> {
        self.expect(TokenKind::BeginArray)
    }

    fn end_array(&mut self) -> Result<(), ReaderError> {
        self.expect(TokenKind::EndArray)
    }

    fn next_name(&mut self) -> Result<String, ReaderError> {
        match self.current() {
            Some(Token::Name(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(ReaderError::UnexpectedToken {
                expected: TokenKind::Name,
                found: self.peek(),
            }),
        }
    }

    fn next_number(&mut self) -> Result<f64, ReaderError> {
        match self.current() {
            Some(Token::Number(n)) => {
                let n = *n;
                self.pos += 1;
                Ok(n)
            }
            _ => Err(ReaderError::UnexpectedToken {
                expected: TokenKind::Number,
                found: self.peek(),
            }),
        }
    }

    fn next_string(&mut self) -> Result<String, ReaderError> {
        match self.current() {
            Some(Token::String(s)) => {
                let s = s.clone();
                self.pos += 1;
                Ok(s)
            }
            _ => Err(ReaderError::UnexpectedToken {
                expected: TokenKind::String,
                found: self.peek(),
            }),
        }
    }

    fn next_bool(&mut self) -> Result<bool, ReaderError> {
        match self.current() {
            Some(Token::Bool(b)) => {
                let b = *b;
                self.pos += 1;
                Ok(b)
            }
            _ => Err(ReaderError::UnexpectedToken {
                expected: TokenKind::Bool,
                found: self.peek(),
            }),
        }
    }

    fn skip_value(&mut self) -> Result<(), ReaderError> {
        match self.peek() {
            TokenKind::Name => {
                self.pos += 1;
                self.skip_value()
            }
            TokenKind::BeginObject | TokenKind::BeginArray => {
                let mut depth = 0usize;
                loop {
                    match self.peek() {
                        TokenKind::BeginObject | TokenKind::BeginArray => depth += 1,
                        TokenKind::EndObject | TokenKind::EndArray => depth -= 1,
                        TokenKind::EndDocument => {
                            return Err(ReaderError::NoValue {
                                found: TokenKind::EndDocument,
                            })
                        }
                        _ => {}
                    }
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
            }
            found if found.is_end() => Err(ReaderError::NoValue { found }),
            _ => {
                self.pos += 1;
                Ok(())
            }
        }
    }
}
