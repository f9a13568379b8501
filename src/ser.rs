//! Document serialization.
//!
//! The [`Serializer`] re-emits a [`Document`] as canonical text. No layout
//! is stored per token; separators are rebuilt from token adjacency:
//!
//! - a keyword is followed by a single space
//! - values on the same line are separated by `,`
//! - a linebreak resets the pending separator
//! - comments are written with a `;` marker
//!
//! Strings are written quoted, except the captured title line which is
//! written verbatim. Numbers use six fractional digits.
//!
//! ## Examples
//!
//! ```rust
//! use gendoc::{from_str, to_string};
//!
//! let doc = from_str("; wheels\nwheels 4 0.5 true \"rim\"\n");
//! let text = to_string(&doc).unwrap();
//! assert_eq!(text, ";wheels\nwheels 4.000000,0.500000,true,\"rim\"\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use gendoc::{Document, Serializer};
//!
//! let mut doc = Document::new();
//! doc.push_keyword("mass");
//! doc.push_number(1.25);
//! doc.push_line_break();
//!
//! let mut serializer = Serializer::new(Vec::new());
//! serializer.serialize_document(&doc).unwrap();
//! assert_eq!(serializer.into_inner(), b"mass 1.250000\n");
//! ```

use crate::token::Token;
use crate::{Document, Result};
use std::io::Write;

/// Line terminator written after each line: CR+LF on Windows, LF elsewhere.
#[cfg(windows)]
pub const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub const EOL: &str = "\n";

/// Writes documents to an [`std::io::Write`].
pub struct Serializer<W> {
    writer: W,
    separator: &'static str,
}

impl<W: Write> Serializer<W> {
    pub fn new(writer: W) -> Self {
        Serializer {
            writer,
            separator: "",
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes every token of `doc` and flushes the writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
    pub fn serialize_document(&mut self, doc: &Document) -> Result<()> {
        self.separator = "";
        for (index, &token) in doc.tokens().iter().enumerate() {
            let verbatim = doc.title() == Some(index);
            self.serialize_token(doc, token, verbatim)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn serialize_token(&mut self, doc: &Document, token: Token, verbatim: bool) -> Result<()> {
        match token {
            Token::LineBreak => {
                self.writer.write_all(EOL.as_bytes())?;
                self.separator = "";
            }

            Token::Comment(offset) => {
                // Mid-line comments need a gap so the marker is not read as part of a value.
                if !self.separator.is_empty() {
                    self.writer.write_all(b" ")?;
                }
                self.writer.write_all(b";")?;
                self.writer.write_all(doc.pool().get(offset))?;
            }

            Token::String(offset) => {
                self.writer.write_all(self.separator.as_bytes())?;
                if verbatim {
                    self.writer.write_all(doc.pool().get(offset))?;
                } else {
                    self.writer.write_all(b"\"")?;
                    self.writer.write_all(doc.pool().get(offset))?;
                    self.writer.write_all(b"\"")?;
                }
                self.separator = ",";
            }

            Token::Number(value) => {
                self.writer.write_all(self.separator.as_bytes())?;
                write!(self.writer, "{:.6}", value)?;
                self.separator = ",";
            }

            Token::Bool(value) => {
                self.writer.write_all(self.separator.as_bytes())?;
                self.writer
                    .write_all(if value { b"true".as_slice() } else { b"false".as_slice() })?;
                self.separator = ",";
            }

            Token::Keyword(offset) => {
                self.writer.write_all(doc.pool().get(offset))?;
                self.separator = " ";
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostics, ParseOptions};

    fn render(doc: &Document) -> String {
        let mut out = Vec::new();
        doc.save_to_writer(&mut out).unwrap();
        String::from_utf8(out).unwrap().replace("\r\n", "\n")
    }

    fn parse(text: &str, options: ParseOptions) -> Document {
        let mut doc = Document::new();
        doc.load_from_str(text, "ser", options, Diagnostics::new());
        doc
    }

    #[test]
    fn test_separators() {
        let doc = parse("beam 1 2,3\nnode\n-1 -2\n", ParseOptions::NONE);
        assert_eq!(
            render(&doc),
            "beam 1.000000,2.000000,3.000000\nnode\n-1.000000,-2.000000\n"
        );
    }

    #[test]
    fn test_comment_style_normalised() {
        let doc = parse("// slash\n; semi\n", ParseOptions::ALLOW_SLASH_COMMENTS);
        assert_eq!(render(&doc), ";slash\n;semi\n");
    }

    #[test]
    fn test_mid_line_comment_gap() {
        let doc = parse("kw 1 ;note\n", ParseOptions::NONE);
        assert_eq!(render(&doc), "kw 1.000000 ;note\n");
    }

    #[test]
    fn test_naked_strings_quoted() {
        let doc = parse("kw a/b c\n", ParseOptions::ALLOW_NAKED_STRINGS);
        assert_eq!(render(&doc), "kw \"a/b\",\"c\"\n");
    }

    #[test]
    fn test_title_verbatim() {
        let doc = parse("My truck, v2\nkw \"x\"\n", ParseOptions::FIRST_LINE_IS_TITLE);
        assert_eq!(render(&doc), "My truck, v2\nkw \"x\"\n");
    }

    #[test]
    fn test_booleans() {
        let doc = parse("kw true false\n", ParseOptions::NONE);
        assert_eq!(render(&doc), "kw true,false\n");
    }

    #[test]
    fn test_empty_document() {
        let doc = parse("", ParseOptions::NONE);
        assert_eq!(render(&doc), "\n");
    }
}
