//! # gendoc
//!
//! A streaming tokenizer and serializer for line-oriented, loosely-typed
//! configuration documents.
//!
//! ## The Format
//!
//! Each line holds a keyword and/or values separated by commas, spaces or
//! tabs. Values are quoted strings, numbers and the literals `true`/`false`.
//! Comments start with `;` (optionally `//`). The first line may be a free
//! text title.
//!
//! ```text
//! Heavy hauler 6x6
//! ; chassis
//! mass 12500
//! wheels 6, 0.55, true, "offroad"
//! ```
//!
//! ## Key Features
//!
//! - **Streaming**: input is read in fixed-size chunks and tokenized in a
//!   single pass, one byte at a time
//! - **Forgiving**: malformed text is reported to a [`DiagnosticSink`] and
//!   skipped; loading never fails on content
//! - **Compact**: tokens are `Copy` values, text lives in one string pool
//! - **Round-trip**: documents serialize back to canonical text
//!
//! ## Quick Start
//!
//! ```rust
//! use gendoc::{from_str, to_string};
//!
//! let doc = from_str("mass 12500\nwheels 6, 0.55, true\n");
//!
//! let mut reader = doc.reader();
//! assert_eq!(reader.keyword_value().as_deref(), Some("mass"));
//! reader.seek_next_line();
//! assert_eq!(reader.count_line_args(), 4);
//!
//! let text = to_string(&doc).unwrap();
//! assert_eq!(text, "mass 12500.000000\nwheels 6.000000,0.550000,true\n");
//! ```
//!
//! ### Options
//!
//! ```rust
//! use gendoc::{from_str_with_options, ParseOptions, TokenValue};
//!
//! let options = ParseOptions::ALLOW_SLASH_COMMENTS | ParseOptions::ALLOW_NAKED_STRINGS;
//! let doc = from_str_with_options("// rims\nrim chrome-16\n", options);
//!
//! let values: Vec<TokenValue> = doc.values().collect();
//! assert_eq!(values[0], TokenValue::Comment("rims".into()));
//! assert_eq!(values[3], TokenValue::String("chrome-16".into()));
//! ```
//!
//! ### Diagnostics
//!
//! The convenience functions log through the [`log`] facade. Pass a
//! [`Diagnostics`] to the [`Document`] loaders to inspect anomalies instead:
//!
//! ```rust
//! use gendoc::{Diagnostics, Document, ParseOptions};
//!
//! let mut diags = Diagnostics::new();
//! let mut doc = Document::new();
//! doc.load_from_str("kw \"open\n", "inline", ParseOptions::NONE, &mut diags);
//! assert!(diags.mentions("quoted string interrupted by newline"));
//! ```

pub mod diag;
pub mod document;
pub mod error;
pub mod options;
mod parser;
pub mod reader;
pub mod ser;
pub mod stream;
pub mod token;

pub use diag::{Category, Diagnostic, DiagnosticSink, Diagnostics, LogSink, Severity};
pub use document::Document;
pub use error::{Error, Result};
pub use options::ParseOptions;
pub use reader::DocReader;
pub use ser::{Serializer, EOL};
pub use stream::{DataStream, FsResources, NamedStream, ResourceProvider, READ_CHUNK_SIZE};
pub use token::{StringPool, Token, TokenType, TokenValue};

use std::io;

/// Tokenizes `s` with strict options, logging anomalies.
///
/// # Examples
///
/// ```rust
/// use gendoc::{from_str, TokenType};
///
/// let doc = from_str("kw 1");
/// assert_eq!(doc.len(), 3);
/// assert_eq!(doc.tokens()[2].kind(), TokenType::LineBreak);
/// ```
#[must_use]
pub fn from_str(s: &str) -> Document {
    from_str_with_options(s, ParseOptions::NONE)
}

/// Tokenizes `s` with custom options, logging anomalies.
#[must_use]
pub fn from_str_with_options(s: &str, options: ParseOptions) -> Document {
    from_slice(s.as_bytes(), options)
}

/// Tokenizes raw bytes, logging anomalies.
#[must_use]
pub fn from_slice(v: &[u8], options: ParseOptions) -> Document {
    let mut doc = Document::new();
    doc.load_from_slice(v, "<memory>", options, LogSink);
    doc
}

/// Tokenizes everything readable from `reader`, logging anomalies.
///
/// # Examples
///
/// ```rust
/// use gendoc::{from_reader, ParseOptions};
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"kw 1\n"), ParseOptions::NONE).unwrap();
/// assert_eq!(doc.len(), 3);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R, options: ParseOptions) -> Result<Document>
where
    R: io::Read,
{
    let mut doc = Document::new();
    doc.load_from_stream(NamedStream::new("<reader>", reader), options, LogSink)?;
    Ok(doc)
}

/// Serializes `doc` to canonical text.
///
/// # Errors
///
/// Never fails for valid UTF-8 content; invalid sequences are replaced.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(doc: &Document) -> Result<String> {
    let bytes = to_vec(doc)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Serializes `doc` to canonical bytes.
///
/// # Errors
///
/// Writing to a `Vec` does not fail; the `Result` mirrors [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(doc: &Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(doc.pool().len() + doc.len() * 4);
    to_writer(&mut buffer, doc)?;
    Ok(buffer)
}

/// Serializes `doc` to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, doc: &Document) -> Result<()>
where
    W: io::Write,
{
    doc.save_to_writer(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_text() {
        let text = "wheels 4.000000,\"rim\",true\n;done\n";
        let doc = from_str(text);
        assert_eq!(to_string(&doc).unwrap().replace("\r\n", "\n"), text);
    }

    #[test]
    fn test_from_reader() {
        let doc = from_reader(io::Cursor::new(b"a 1\nb 2\n".to_vec()), ParseOptions::NONE).unwrap();
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn test_to_writer() {
        let doc = from_str("kw 2");
        let mut out = Vec::new();
        to_writer(&mut out, &doc).unwrap();
        assert_eq!(out, format!("kw 2.000000{}", EOL).into_bytes());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let doc = from_slice(b"kw \"\xff\"\n", ParseOptions::NONE);
        let text = to_string(&doc).unwrap();
        assert!(text.contains('\u{fffd}'));
    }
}
