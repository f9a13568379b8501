//! Tokenizer: a per-byte finite-state machine.
//!
//! [`DocumentParser`] is fed one byte at a time. The kind of token being
//! accumulated is tracked in [`PartialToken`]; [`DocumentParser::feed`]
//! dispatches each byte to the update routine for the current state. When a
//! token completes it is appended to the document, text payloads going
//! through the string pool.
//!
//! Malformed input never aborts the parse. Bytes that do not fit the current
//! token turn it into [`PartialToken::Garbage`], which is reported and then
//! dropped at the next delimiter.
//!
//! ## Grammar summary
//!
//! | First byte (line start)   | First byte (mid line)          | Token            |
//! |---------------------------|--------------------------------|------------------|
//! | `;`                       | `;`                            | comment          |
//! | `//` (option)             | `//` (option)                  | comment          |
//! | `"`                       | `"`                            | quoted string    |
//! | digit, `-`, `.`           | digit, `-`, `.`                | number           |
//! | `t`, `f`                  | `t`, `f`                       | boolean literal  |
//! | other letter              | other (option)                 | keyword / naked string |
//!
//! Separators are space, tab and comma. `\r` is ignored everywhere.

use crate::diag::{Category, DiagnosticSink, Severity};
use crate::document::Document;
use crate::options::ParseOptions;
use crate::token::Token;

/// Classification of the token currently being accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PartialToken {
    /// Between tokens.
    None,
    /// Comment starting with `;`.
    CommentSemicolon,
    /// Comment starting with `//`.
    CommentSlash,
    /// String opened by `"`.
    StringQuoted,
    /// Unquoted string.
    StringNaked,
    /// The whole first line, separators included.
    TitleString,
    /// Digits with an optional leading `-`.
    Number,
    /// Like `Number`, already past the decimal point.
    NumberDot,
    /// Alphanumeric run at the start of a line.
    Keyword,
    /// Prefix of `true`.
    BoolTrue,
    /// Prefix of `false`.
    BoolFalse,
    /// Text fitting no category; discarded at the next delimiter.
    Garbage,
}

/// Transient tokenizer state for a single load.
pub(crate) struct DocumentParser<'d, S> {
    doc: &'d mut Document,
    options: ParseOptions,
    stream_name: String,
    sink: S,

    tok: Vec<u8>,
    line_num: usize,
    line_pos: usize,
    state: PartialToken,
    title_found: bool,
}

impl<'d, S: DiagnosticSink> DocumentParser<'d, S> {
    /// Starts a parse that appends to `doc`. The document is not cleared here.
    pub(crate) fn new(
        doc: &'d mut Document,
        options: ParseOptions,
        stream_name: impl Into<String>,
        sink: S,
    ) -> Self {
        DocumentParser {
            doc,
            options,
            stream_name: stream_name.into(),
            sink,
            tok: Vec::with_capacity(64),
            line_num: 1,
            line_pos: 0,
            state: PartialToken::None,
            title_found: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> PartialToken {
        self.state
    }

    pub(crate) fn feed_bytes(&mut self, bytes: &[u8]) {
        for &c in bytes {
            self.feed(c);
        }
    }

    /// Advances the state machine by one byte.
    pub(crate) fn feed(&mut self, c: u8) {
        // The pool is NUL-terminated, so a NUL would cut the run short.
        if c == 0 {
            self.stray(c, " skipped");
            self.line_pos += 1;
            return;
        }

        match self.state {
            PartialToken::None => self.begin_token(c),
            PartialToken::CommentSemicolon | PartialToken::CommentSlash => self.update_comment(c),
            PartialToken::StringQuoted | PartialToken::StringNaked => self.update_string(c),
            PartialToken::Number | PartialToken::NumberDot => self.update_number(c),
            PartialToken::BoolTrue | PartialToken::BoolFalse => self.update_bool(c),
            PartialToken::Keyword => self.update_keyword(c),
            PartialToken::TitleString => self.update_title(c),
            PartialToken::Garbage => self.update_garbage(c),
        }

        match c {
            b'\n' => {
                self.line_num += 1;
                self.line_pos = 0;
            }
            b'\r' => {}
            _ => self.line_pos += 1,
        }
    }

    /// Completes the parse: a pending token is finished as if the stream
    /// ended with a newline, and the token sequence always ends in a linebreak.
    pub(crate) fn finish(mut self) {
        if self.state != PartialToken::None {
            self.feed(b'\n');
        }
        if !matches!(self.doc.tokens.last(), Some(Token::LineBreak)) {
            self.doc.tokens.push(Token::LineBreak);
        }
    }

    fn begin_token(&mut self, c: u8) {
        match c {
            b'\r' | b' ' | b',' | b'\t' => {}

            b'\n' => self.doc.tokens.push(Token::LineBreak),

            b';' => self.state = PartialToken::CommentSemicolon,

            b'/' => {
                if self.options.allows_slash_comments() {
                    self.state = PartialToken::CommentSlash;
                } else if self.options.allows_naked_strings() && !self.at_line_start() {
                    self.tok.push(c);
                    self.state = PartialToken::StringNaked;
                } else {
                    self.tok.push(c);
                    self.state = PartialToken::Garbage;
                }
            }

            b'"' => self.state = PartialToken::StringQuoted,

            b'.' => {
                self.tok.push(c);
                self.state = PartialToken::NumberDot;
            }

            b'-' => {
                self.tok.push(c);
                self.state = PartialToken::Number;
            }

            b't' => {
                self.tok.push(c);
                self.state = PartialToken::BoolTrue;
            }

            b'f' => {
                self.tok.push(c);
                self.state = PartialToken::BoolFalse;
            }

            _ if c.is_ascii_digit() => {
                self.tok.push(c);
                self.state = PartialToken::Number;
            }

            _ if c.is_ascii_alphabetic() && self.at_line_start() => {
                self.tok.push(c);
                self.state = PartialToken::Keyword;
            }

            _ => {
                self.tok.push(c);
                self.state = if self.options.allows_naked_strings() {
                    PartialToken::StringNaked
                } else {
                    PartialToken::Garbage
                };
            }
        }

        if self.options.first_line_is_title()
            && !self.title_found
            && self.at_line_start()
            && !matches!(
                self.state,
                PartialToken::None | PartialToken::CommentSemicolon | PartialToken::CommentSlash
            )
        {
            // The title is verbatim, so the opening byte is kept even if it was a quote.
            self.title_found = true;
            self.tok.clear();
            self.tok.push(c);
            self.state = PartialToken::TitleString;
        }

        if self.state == PartialToken::Garbage {
            self.stray(c, "");
        }
    }

    fn update_comment(&mut self, c: u8) {
        match c {
            b'\r' => {}

            b'\n' => {
                self.flush_text(Token::Comment);
                self.break_line();
            }

            b' ' | b'\t' if self.tok.is_empty() => {}

            b'/' if self.state == PartialToken::CommentSlash && self.tok.is_empty() => {}

            _ => self.tok.push(c),
        }
    }

    fn update_string(&mut self, c: u8) {
        let quoted = self.state == PartialToken::StringQuoted;
        match c {
            b'\r' => {}

            b' ' | b',' | b'\t' => {
                if quoted {
                    self.tok.push(c);
                } else {
                    self.flush_text(Token::String);
                }
            }

            b'\n' => {
                if quoted {
                    self.warn("quoted string interrupted by newline");
                }
                self.flush_text(Token::String);
                self.break_line();
            }

            b'"' => {
                if quoted {
                    self.flush_text(Token::String);
                } else {
                    self.tok.push(c);
                    self.state = PartialToken::Garbage;
                    self.stray(c, " in string");
                }
            }

            _ => self.tok.push(c),
        }
    }

    fn update_number(&mut self, c: u8) {
        match c {
            b'\r' => {}

            b' ' | b',' | b'\t' => self.flush_number(),

            b'\n' => {
                self.flush_number();
                self.break_line();
            }

            b'.' if self.state == PartialToken::Number => {
                self.tok.push(c);
                self.state = PartialToken::NumberDot;
            }

            _ if c.is_ascii_digit() => self.tok.push(c),

            _ => {
                self.tok.push(c);
                self.state = PartialToken::Garbage;
                self.stray(c, " in number");
            }
        }
    }

    fn update_bool(&mut self, c: u8) {
        match c {
            b'\r' => {}

            b' ' | b',' | b'\t' => self.abandon_bool(),

            b'\n' => {
                self.abandon_bool();
                self.break_line();
            }

            b'"' => {
                self.tok.push(c);
                self.state = PartialToken::Garbage;
                self.stray(c, " in boolean");
            }

            _ => {
                let value = self.state == PartialToken::BoolTrue;
                let literal = if value {
                    b"true".as_slice()
                } else {
                    b"false".as_slice()
                };

                let pos = self.tok.len();
                if literal.get(pos) == Some(&c) {
                    if pos + 1 == literal.len() {
                        self.doc.tokens.push(Token::Bool(value));
                        self.tok.clear();
                        self.state = PartialToken::None;
                    } else {
                        self.tok.push(c);
                    }
                } else {
                    self.tok.push(c);
                    if self.options.allows_naked_strings() {
                        self.state = PartialToken::StringNaked;
                    } else {
                        self.state = PartialToken::Garbage;
                        self.stray(c, " in boolean");
                    }
                }
            }
        }
    }

    fn update_keyword(&mut self, c: u8) {
        match c {
            b'\r' => {}

            b' ' | b',' | b'\t' => self.flush_text(Token::Keyword),

            b'\n' => {
                self.flush_text(Token::Keyword);
                self.break_line();
            }

            _ => {
                self.tok.push(c);
                if !c.is_ascii_alphanumeric() {
                    self.state = PartialToken::Garbage;
                    self.stray(c, " in keyword");
                }
            }
        }
    }

    fn update_title(&mut self, c: u8) {
        match c {
            b'\r' => {}

            b'\n' => {
                self.doc.title = Some(self.doc.tokens.len());
                self.flush_text(Token::String);
                self.break_line();
            }

            _ => self.tok.push(c),
        }
    }

    fn update_garbage(&mut self, c: u8) {
        match c {
            b'\r' => {}

            b' ' | b',' | b'\t' => self.discard("garbage token"),

            b'\n' => {
                self.discard("garbage token");
                self.break_line();
            }

            _ => self.tok.push(c),
        }
    }

    fn at_line_start(&self) -> bool {
        matches!(self.doc.tokens.last(), None | Some(Token::LineBreak))
    }

    /// Moves the buffered run into the pool and emits a token pointing at it.
    fn flush_text(&mut self, make: fn(usize) -> Token) {
        let offset = self.doc.pool.push(&self.tok);
        self.doc.tokens.push(make(offset));
        self.tok.clear();
        self.state = PartialToken::None;
    }

    fn flush_number(&mut self) {
        if !self.tok.iter().any(u8::is_ascii_digit) {
            self.discard("garbage token");
            return;
        }

        let value = std::str::from_utf8(&self.tok)
            .ok()
            .and_then(|text| text.parse::<f32>().ok())
            .unwrap_or_default();
        if !value.is_finite() {
            self.discard("out-of-range number");
            return;
        }
        self.doc.tokens.push(Token::Number(value));
        self.tok.clear();
        self.state = PartialToken::None;
    }

    fn abandon_bool(&mut self) {
        if self.options.allows_naked_strings() {
            self.flush_text(Token::String);
        } else {
            self.discard("incomplete boolean token");
        }
    }

    fn break_line(&mut self) {
        self.doc.tokens.push(Token::LineBreak);
        self.state = PartialToken::None;
    }

    fn discard(&mut self, what: &str) {
        let message = format!("discarding {} '{}'", what, String::from_utf8_lossy(&self.tok));
        self.warn(&message);
        self.tok.clear();
        self.state = PartialToken::None;
    }

    fn stray(&mut self, c: u8, context: &str) {
        let shown = if c.is_ascii_graphic() {
            char::from(c).to_string()
        } else {
            c.escape_ascii().to_string()
        };
        let message = format!("stray character '{}'{}", shown, context);
        self.warn(&message);
    }

    fn warn(&mut self, message: &str) {
        let message = format!(
            "{}, line {}, pos {}: {}",
            self.stream_name,
            self.line_num,
            self.line_pos + 1,
            message
        );
        self.sink.report(Severity::Warning, Category::Syntax, &message);
    }
}
