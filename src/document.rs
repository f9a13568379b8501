//! The document: an owned token sequence and its string pool.
//!
//! A [`Document`] is rebuilt from scratch on every load. Loading never fails
//! on malformed text; only the stream boundary can fail (see [`Error`]).
//!
//! ## Examples
//!
//! ```rust
//! use gendoc::{Document, Diagnostics, ParseOptions, TokenValue};
//!
//! let mut doc = Document::new();
//! let mut diags = Diagnostics::new();
//! doc.load_from_str("engine 1500, 2.5, \"v8\"\n", "inline", ParseOptions::NONE, &mut diags);
//!
//! assert!(diags.is_empty());
//! assert_eq!(doc.value(0), Some(TokenValue::Keyword("engine".into())));
//! assert_eq!(doc.len(), 5);
//! ```

use crate::diag::{Category, DiagnosticSink, Severity};
use crate::parser::DocumentParser;
use crate::reader::DocReader;
use crate::ser::Serializer;
use crate::stream::{read_chunk, DataStream, ResourceProvider, READ_CHUNK_SIZE};
use crate::token::{StringPool, Token, TokenValue};
use crate::{Error, ParseOptions, Result};
use std::borrow::Cow;
use std::io::Write;

/// Ordered tokens plus the pool holding their text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pool: StringPool,
    pub(crate) title: Option<usize>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all tokens and pooled text.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.pool.clear();
        self.title = None;
    }

    /// Replaces the content with the tokens read from `stream`.
    ///
    /// The stream is consumed in chunks of [`READ_CHUNK_SIZE`] bytes until a
    /// read returns 0. Anomalies in the text go to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a read fails. The tokens parsed up to that
    /// point are kept and still end in a linebreak.
    pub fn load_from_stream<D, S>(&mut self, mut stream: D, options: ParseOptions, sink: S) -> Result<()>
    where
        D: DataStream,
        S: DiagnosticSink,
    {
        self.clear();

        let name = stream.name().to_string();
        let mut parser = DocumentParser::new(self, options, name.as_str(), sink);
        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        let result = loop {
            match read_chunk(&mut stream, &mut buf) {
                Ok(0) => break Ok(()),
                Ok(n) => parser.feed_bytes(&buf[..n]),
                Err(e) => break Err(e),
            }
        };
        parser.finish();

        log::debug!(
            target: "gendoc",
            "loaded '{}': {} tokens, {} pool bytes",
            name,
            self.tokens.len(),
            self.pool.len()
        );
        result
    }

    /// Replaces the content with the tokens of an in-memory buffer.
    pub fn load_from_slice<S: DiagnosticSink>(
        &mut self,
        bytes: &[u8],
        name: &str,
        options: ParseOptions,
        sink: S,
    ) {
        self.clear();
        let mut parser = DocumentParser::new(self, options, name, sink);
        parser.feed_bytes(bytes);
        parser.finish();
    }

    pub fn load_from_str<S: DiagnosticSink>(
        &mut self,
        text: &str,
        name: &str,
        options: ParseOptions,
        sink: S,
    ) {
        self.load_from_slice(text.as_bytes(), name, options, sink);
    }

    /// Opens `name` in `group` through `provider` and loads it.
    ///
    /// # Errors
    ///
    /// If the resource cannot be opened, an error diagnostic is reported,
    /// [`Error::ResourceOpen`] is returned and the current content is left
    /// untouched.
    pub fn load_from_resource<P, S>(
        &mut self,
        provider: &P,
        name: &str,
        group: &str,
        options: ParseOptions,
        mut sink: S,
    ) -> Result<()>
    where
        P: ResourceProvider,
        S: DiagnosticSink,
    {
        let stream = match provider.open_resource(name, group) {
            Ok(stream) => stream,
            Err(err) => {
                let err = match err {
                    Error::ResourceOpen { .. } => err,
                    other => Error::resource_open(name, group, &other.to_string()),
                };
                sink.report(Severity::Error, Category::Resource, &err.to_string());
                return Err(err);
            }
        };
        self.load_from_stream(stream, options, sink)
    }

    /// Writes the canonical text form to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut serializer = Serializer::new(writer);
        serializer.serialize_document(self)
    }

    /// Creates `name` in `group` through `provider` and saves into it.
    ///
    /// # Errors
    ///
    /// If the resource cannot be created, an error diagnostic is reported
    /// and [`Error::ResourceCreate`] is returned. Write failures are returned as [`Error::Io`].
    pub fn save_to_resource<P, S>(&self, provider: &P, name: &str, group: &str, mut sink: S) -> Result<()>
    where
        P: ResourceProvider,
        S: DiagnosticSink,
    {
        let writer = match provider.create_resource(name, group) {
            Ok(writer) => writer,
            Err(err) => {
                let err = match err {
                    Error::ResourceCreate { .. } => err,
                    other => Error::resource_create(name, group, &other.to_string()),
                };
                sink.report(Severity::Error, Category::Resource, &err.to_string());
                return Err(err);
            }
        };
        self.save_to_writer(writer)
    }

    /// A cursor positioned at the first token.
    #[must_use]
    pub fn reader(&self) -> DocReader<'_> {
        DocReader::new(self)
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn pool(&self) -> &StringPool {
        &self.pool
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn token(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).copied()
    }

    /// The token at `index` resolved against the pool.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<TokenValue<'_>> {
        self.token(index).map(|token| TokenValue::resolve(token, &self.pool))
    }

    /// All tokens resolved against the pool, in order.
    pub fn values(&self) -> impl Iterator<Item = TokenValue<'_>> + '_ {
        self.tokens
            .iter()
            .map(move |&token| TokenValue::resolve(token, &self.pool))
    }

    /// Text stored at a pool offset.
    #[must_use]
    pub fn string_at(&self, offset: usize) -> Cow<'_, str> {
        self.pool.get_str(offset)
    }

    /// Index of the title token captured with
    /// [`ParseOptions::FIRST_LINE_IS_TITLE`], if any.
    #[must_use]
    pub fn title(&self) -> Option<usize> {
        self.title
    }

    #[must_use]
    pub fn title_text(&self) -> Option<Cow<'_, str>> {
        let offset = self.token(self.title?)?.pool_offset()?;
        Some(self.string_at(offset))
    }

    pub fn push_line_break(&mut self) {
        self.tokens.push(Token::LineBreak);
    }

    pub fn push_comment(&mut self, text: &str) {
        let offset = self.pool.push(text.as_bytes());
        self.tokens.push(Token::Comment(offset));
    }

    /// Appends a string value. The text is written quoted on save, so it
    /// should not contain `"` or line breaks.
    pub fn push_string(&mut self, text: &str) {
        let offset = self.pool.push(text.as_bytes());
        self.tokens.push(Token::String(offset));
    }

    pub fn push_number(&mut self, value: f32) {
        self.tokens.push(Token::Number(value));
    }

    pub fn push_bool(&mut self, value: bool) {
        self.tokens.push(Token::Bool(value));
    }

    pub fn push_keyword(&mut self, text: &str) {
        let offset = self.pool.push(text.as_bytes());
        self.tokens.push(Token::Keyword(offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Diagnostics;
    use crate::stream::NamedStream;
    use std::io::{self, Cursor, Read};

    struct FailAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "gone"));
            }
            Ok(n)
        }
    }

    #[test]
    fn test_reload_resets() {
        let mut doc = Document::new();
        let mut diags = Diagnostics::new();
        doc.load_from_str("alpha 1 2 3\n", "a", ParseOptions::NONE, &mut diags);
        assert_eq!(doc.len(), 5);

        doc.load_from_str("second\n", "b", ParseOptions::NONE, &mut diags);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.value(0), Some(TokenValue::Keyword("second".into())));
        assert_eq!(doc.pool().len(), "second".len() + 1);
    }

    #[test]
    fn test_stream_in_chunks() {
        // Spans several read chunks.
        let line = "node 1.5, -2, 0.25\n";
        let text = line.repeat(READ_CHUNK_SIZE / line.len() * 3);
        let stream = NamedStream::new("big", Cursor::new(text.clone().into_bytes()));

        let mut doc = Document::new();
        let mut diags = Diagnostics::new();
        doc.load_from_stream(stream, ParseOptions::NONE, &mut diags).unwrap();

        assert!(diags.is_empty());
        assert_eq!(doc.len(), text.lines().count() * 5);
    }

    #[test]
    fn test_read_failure_keeps_partial() {
        let stream = NamedStream::new(
            "broken",
            FailAfter {
                data: Cursor::new(b"kw 1\nkw 2".to_vec()),
            },
        );
        let mut doc = Document::new();
        let result = doc.load_from_stream(stream, ParseOptions::NONE, Diagnostics::new());

        match result {
            Err(Error::Io(msg)) => assert!(msg.contains("broken")),
            other => panic!("expected io error, got {:?}", other),
        }
        assert_eq!(doc.tokens().last(), Some(&Token::LineBreak));
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn test_push_tokens() {
        let mut doc = Document::new();
        doc.push_keyword("mass");
        doc.push_number(1200.0);
        doc.push_line_break();
        doc.push_comment("done");
        doc.push_line_break();

        let values: Vec<TokenValue> = doc.values().collect();
        assert_eq!(
            values,
            vec![
                TokenValue::Keyword("mass".into()),
                TokenValue::Number(1200.0),
                TokenValue::LineBreak,
                TokenValue::Comment("done".into()),
                TokenValue::LineBreak,
            ]
        );
    }

    #[test]
    fn test_title_text() {
        let mut doc = Document::new();
        doc.load_from_str(
            "Heavy hauler, 6x6\nwheels 4\n",
            "t",
            ParseOptions::FIRST_LINE_IS_TITLE,
            Diagnostics::new(),
        );
        assert_eq!(doc.title(), Some(0));
        assert_eq!(doc.title_text().as_deref(), Some("Heavy hauler, 6x6"));
    }
}
