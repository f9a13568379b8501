//! Sequential cursor over a document's tokens.
//!
//! [`DocReader`] borrows a [`Document`] and walks it forward one token at a
//! time. Line-oriented helpers let a structured reader skip to the next line
//! that carries data and size up the current one.
//!
//! ## Examples
//!
//! ```rust
//! use gendoc::from_str;
//!
//! let doc = from_str("; header\n\nnode 1, 2, 3\nbeam 1, 2\n");
//! let mut reader = doc.reader();
//!
//! reader.seek_next_line();
//! assert_eq!(reader.keyword_value().as_deref(), Some("node"));
//! assert_eq!(reader.count_line_args(), 4);
//!
//! reader.seek_next_line();
//! assert_eq!(reader.keyword_value().as_deref(), Some("beam"));
//! ```

use crate::token::{Token, TokenType, TokenValue};
use crate::Document;
use std::borrow::Cow;

/// Forward-only read position into a [`Document`].
#[derive(Clone, Debug)]
pub struct DocReader<'a> {
    doc: &'a Document,
    pos: usize,
}

impl<'a> DocReader<'a> {
    #[must_use]
    pub fn new(doc: &'a Document) -> Self {
        DocReader { doc, pos: 0 }
    }

    /// Index of the current token.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Advances one token. Does nothing at end of file.
    pub fn move_next(&mut self) {
        if self.pos < self.doc.len() {
            self.pos += 1;
        }
    }

    #[must_use]
    pub fn end_of_file(&self) -> bool {
        self.end_of_file_at(0)
    }

    /// True if there is no token `offset` positions ahead.
    #[must_use]
    pub fn end_of_file_at(&self, offset: usize) -> bool {
        self.pos + offset >= self.doc.len()
    }

    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.token_at(0)
    }

    #[must_use]
    pub fn token_at(&self, offset: usize) -> Option<Token> {
        self.doc.token(self.pos + offset)
    }

    /// Type of the current token, `None` at end of file.
    #[must_use]
    pub fn token_type(&self) -> Option<TokenType> {
        self.token_type_at(0)
    }

    #[must_use]
    pub fn token_type_at(&self, offset: usize) -> Option<TokenType> {
        self.token_at(offset).map(|token| token.kind())
    }

    #[must_use]
    pub fn value(&self) -> Option<TokenValue<'a>> {
        self.value_at(0)
    }

    #[must_use]
    pub fn value_at(&self, offset: usize) -> Option<TokenValue<'a>> {
        self.doc.value(self.pos + offset)
    }

    #[must_use]
    pub fn is_line_break(&self) -> bool {
        self.token_type() == Some(TokenType::LineBreak)
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.token_type() == Some(TokenType::Comment)
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        self.is_string_at(0)
    }

    #[must_use]
    pub fn is_string_at(&self, offset: usize) -> bool {
        self.token_type_at(offset) == Some(TokenType::String)
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        self.is_number_at(0)
    }

    #[must_use]
    pub fn is_number_at(&self, offset: usize) -> bool {
        self.token_type_at(offset) == Some(TokenType::Number)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.is_bool_at(0)
    }

    #[must_use]
    pub fn is_bool_at(&self, offset: usize) -> bool {
        self.token_type_at(offset) == Some(TokenType::Bool)
    }

    #[must_use]
    pub fn is_keyword(&self) -> bool {
        self.is_keyword_at(0)
    }

    #[must_use]
    pub fn is_keyword_at(&self, offset: usize) -> bool {
        self.token_type_at(offset) == Some(TokenType::Keyword)
    }

    #[must_use]
    pub fn string_value(&self) -> Option<Cow<'a, str>> {
        self.string_value_at(0)
    }

    #[must_use]
    pub fn string_value_at(&self, offset: usize) -> Option<Cow<'a, str>> {
        match self.token_at(offset)? {
            Token::String(p) => Some(self.doc.string_at(p)),
            _ => None,
        }
    }

    #[must_use]
    pub fn number_value(&self) -> Option<f32> {
        self.number_value_at(0)
    }

    #[must_use]
    pub fn number_value_at(&self, offset: usize) -> Option<f32> {
        match self.token_at(offset)? {
            Token::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn bool_value(&self) -> Option<bool> {
        self.bool_value_at(0)
    }

    #[must_use]
    pub fn bool_value_at(&self, offset: usize) -> Option<bool> {
        match self.token_at(offset)? {
            Token::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn keyword_value(&self) -> Option<Cow<'a, str>> {
        self.keyword_value_at(0)
    }

    #[must_use]
    pub fn keyword_value_at(&self, offset: usize) -> Option<Cow<'a, str>> {
        match self.token_at(offset)? {
            Token::Keyword(p) => Some(self.doc.string_at(p)),
            _ => None,
        }
    }

    #[must_use]
    pub fn comment_value(&self) -> Option<Cow<'a, str>> {
        match self.token()? {
            Token::Comment(p) => Some(self.doc.string_at(p)),
            _ => None,
        }
    }

    /// Skips the rest of the current line, then any blank or comment-only
    /// lines. Returns true if the end of file was reached.
    pub fn seek_next_line(&mut self) -> bool {
        while !self.end_of_file() && !self.is_line_break() {
            self.move_next();
        }

        while !self.end_of_file()
            && !self.token_type().is_some_and(TokenType::is_value)
        {
            self.move_next();
        }

        self.end_of_file()
    }

    /// Number of tokens from the current position up to the next linebreak.
    #[must_use]
    pub fn count_line_args(&self) -> usize {
        let mut count = 0;
        while !self.end_of_file_at(count) && self.token_type_at(count) != Some(TokenType::LineBreak) {
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostics, ParseOptions};

    fn parse(text: &str, options: ParseOptions) -> Document {
        let mut doc = Document::new();
        doc.load_from_str(text, "reader", options, Diagnostics::new());
        doc
    }

    #[test]
    fn test_count_line_args() {
        let doc = parse("kw a b c\n\n", ParseOptions::ALLOW_NAKED_STRINGS);
        let mut reader = doc.reader();
        reader.move_next();
        assert_eq!(reader.count_line_args(), 3);

        for _ in 0..4 {
            reader.move_next();
        }
        assert!(reader.is_line_break());
        assert_eq!(reader.count_line_args(), 0);
    }

    #[test]
    fn test_seek_skips_comments_and_blanks() {
        let doc = parse("kw 1 2\n; one\n\n; two\nnext 3\n", ParseOptions::NONE);
        let mut reader = doc.reader();
        reader.move_next();

        assert!(!reader.seek_next_line());
        assert_eq!(reader.keyword_value().as_deref(), Some("next"));
        assert_eq!(reader.number_value_at(1), Some(3.0));

        assert!(reader.seek_next_line());
        assert!(reader.end_of_file());
        assert_eq!(reader.token_type(), None);
    }

    #[test]
    fn test_seek_from_line_break() {
        let doc = parse("a\nb\n", ParseOptions::NONE);
        let mut reader = doc.reader();
        reader.move_next();
        assert!(reader.is_line_break());
        reader.seek_next_line();
        assert_eq!(reader.keyword_value().as_deref(), Some("b"));
    }

    #[test]
    fn test_typed_accessors() {
        let doc = parse("kw \"s\" 2.5 false\n", ParseOptions::NONE);
        let reader = doc.reader();

        assert!(reader.is_keyword());
        assert!(reader.is_string_at(1));
        assert!(reader.is_number_at(2));
        assert!(reader.is_bool_at(3));
        assert_eq!(reader.string_value_at(1).as_deref(), Some("s"));
        assert_eq!(reader.number_value_at(2), Some(2.5));
        assert_eq!(reader.bool_value_at(3), Some(false));
        assert_eq!(reader.number_value_at(1), None);
        assert_eq!(reader.string_value(), None);
        assert!(!reader.end_of_file_at(4));
        assert!(reader.end_of_file_at(5));
    }

    #[test]
    fn test_comment_accessors() {
        let doc = parse("; header\nkw 1 ; trailing\n", ParseOptions::NONE);
        let mut reader = doc.reader();
        assert!(std::ptr::eq(reader.document(), &doc));

        assert!(reader.is_comment());
        assert_eq!(reader.comment_value().as_deref(), Some("header"));

        reader.seek_next_line();
        assert!(!reader.is_comment());
        assert_eq!(reader.comment_value(), None);
        assert_eq!(reader.count_line_args(), 3);

        reader.move_next();
        reader.move_next();
        assert!(reader.is_comment());
        assert_eq!(reader.comment_value().as_deref(), Some("trailing"));
    }

    #[test]
    fn test_move_next_saturates() {
        let doc = parse("", ParseOptions::NONE);
        let mut reader = doc.reader();
        reader.move_next();
        reader.move_next();
        assert_eq!(reader.position(), 1);
        assert!(reader.end_of_file());
    }
}
