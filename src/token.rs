//! Token store: typed tokens and the string pool backing their text.
//!
//! Tokens are small `Copy` values. Variable-length text (comments, strings,
//! keywords) lives in a single append-only [`StringPool`]; a text-carrying
//! token stores the byte offset where its NUL-terminated run starts.
//!
//! ## Examples
//!
//! ```rust
//! use gendoc::{StringPool, Token, TokenType};
//!
//! let mut pool = StringPool::new();
//! let offset = pool.push(b"wheels");
//! let token = Token::Keyword(offset);
//!
//! assert_eq!(token.kind(), TokenType::Keyword);
//! assert_eq!(pool.get(offset), b"wheels");
//! ```

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Classification of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    LineBreak,
    Comment,
    String,
    Number,
    Bool,
    Keyword,
}

impl TokenType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenType::LineBreak => "linebreak",
            TokenType::Comment => "comment",
            TokenType::String => "string",
            TokenType::Number => "number",
            TokenType::Bool => "bool",
            TokenType::Keyword => "keyword",
        }
    }

    /// True for the kinds that carry a value a reader would extract
    /// (strings, numbers, booleans, keywords).
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            TokenType::String | TokenType::Number | TokenType::Bool | TokenType::Keyword
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token. Text payloads are offsets into the owning [`StringPool`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    LineBreak,
    Comment(usize),
    String(usize),
    Number(f32),
    Bool(bool),
    Keyword(usize),
}

impl Token {
    #[must_use]
    pub const fn kind(&self) -> TokenType {
        match self {
            Token::LineBreak => TokenType::LineBreak,
            Token::Comment(_) => TokenType::Comment,
            Token::String(_) => TokenType::String,
            Token::Number(_) => TokenType::Number,
            Token::Bool(_) => TokenType::Bool,
            Token::Keyword(_) => TokenType::Keyword,
        }
    }

    /// Pool offset of the token's text, if it carries any.
    #[must_use]
    pub const fn pool_offset(&self) -> Option<usize> {
        match self {
            Token::Comment(offset) | Token::String(offset) | Token::Keyword(offset) => {
                Some(*offset)
            }
            _ => None,
        }
    }

    /// Numeric payload. Booleans read as `1.0`/`0.0`.
    #[must_use]
    pub fn number(&self) -> Option<f32> {
        match self {
            Token::Number(n) => Some(*n),
            Token::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

/// Append-only arena of NUL-terminated byte runs.
///
/// Offsets returned by [`StringPool::push`] stay valid until [`StringPool::clear`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringPool {
    bytes: Vec<u8>,
}

impl StringPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `run` plus a terminating NUL into the pool and returns
    /// the offset of its first byte.
    pub fn push(&mut self, run: &[u8]) -> usize {
        let offset = self.bytes.len();
        self.bytes.reserve(run.len() + 1);
        self.bytes.extend_from_slice(run);
        self.bytes.push(0);
        offset
    }

    /// Returns the run starting at `offset`, up to (not including) its NUL.
    ///
    /// An offset outside the pool yields an empty slice.
    #[must_use]
    pub fn get(&self, offset: usize) -> &[u8] {
        let tail = self.bytes.get(offset..).unwrap_or_default();
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        &tail[..end]
    }

    /// Returns the run at `offset` as text, replacing invalid UTF-8.
    #[must_use]
    pub fn get_str(&self, offset: usize) -> Cow<'_, str> {
        String::from_utf8_lossy(self.get(offset))
    }

    /// Total bytes stored, terminators included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

/// A token resolved against its pool: what a reader actually sees.
///
/// Serializes as an externally tagged enum, so a document can be dumped
/// with any serde format.
///
/// # Examples
///
/// ```rust
/// use gendoc::{from_str, TokenValue};
///
/// let doc = from_str("mass 1500\n");
/// let values: Vec<TokenValue> = doc.values().collect();
/// assert_eq!(values[0], TokenValue::Keyword("mass".into()));
/// assert_eq!(values[1], TokenValue::Number(1500.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue<'a> {
    LineBreak,
    Comment(Cow<'a, str>),
    String(Cow<'a, str>),
    Number(f32),
    Bool(bool),
    Keyword(Cow<'a, str>),
}

impl<'a> TokenValue<'a> {
    /// Resolves `token` against `pool`.
    #[must_use]
    pub fn resolve(token: Token, pool: &'a StringPool) -> Self {
        match token {
            Token::LineBreak => TokenValue::LineBreak,
            Token::Comment(offset) => TokenValue::Comment(pool.get_str(offset)),
            Token::String(offset) => TokenValue::String(pool.get_str(offset)),
            Token::Number(n) => TokenValue::Number(n),
            Token::Bool(b) => TokenValue::Bool(b),
            Token::Keyword(offset) => TokenValue::Keyword(pool.get_str(offset)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> TokenType {
        match self {
            TokenValue::LineBreak => TokenType::LineBreak,
            TokenValue::Comment(_) => TokenType::Comment,
            TokenValue::String(_) => TokenType::String,
            TokenValue::Number(_) => TokenType::Number,
            TokenValue::Bool(_) => TokenType::Bool,
            TokenValue::Keyword(_) => TokenType::Keyword,
        }
    }

    /// Detaches the value from the pool it borrows.
    #[must_use]
    pub fn into_owned(self) -> TokenValue<'static> {
        match self {
            TokenValue::LineBreak => TokenValue::LineBreak,
            TokenValue::Comment(s) => TokenValue::Comment(Cow::Owned(s.into_owned())),
            TokenValue::String(s) => TokenValue::String(Cow::Owned(s.into_owned())),
            TokenValue::Number(n) => TokenValue::Number(n),
            TokenValue::Bool(b) => TokenValue::Bool(b),
            TokenValue::Keyword(s) => TokenValue::Keyword(Cow::Owned(s.into_owned())),
        }
    }
}

impl Serialize for TokenValue<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TokenValue::LineBreak => serializer.serialize_unit_variant("TokenValue", 0, "LineBreak"),
            TokenValue::Comment(s) => {
                serializer.serialize_newtype_variant("TokenValue", 1, "Comment", s.as_ref())
            }
            TokenValue::String(s) => {
                serializer.serialize_newtype_variant("TokenValue", 2, "String", s.as_ref())
            }
            TokenValue::Number(n) => {
                serializer.serialize_newtype_variant("TokenValue", 3, "Number", n)
            }
            TokenValue::Bool(b) => serializer.serialize_newtype_variant("TokenValue", 4, "Bool", b),
            TokenValue::Keyword(s) => {
                serializer.serialize_newtype_variant("TokenValue", 5, "Keyword", s.as_ref())
            }
        }
    }
}
