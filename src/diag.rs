//! Diagnostic reporting.
//!
//! The tokenizer never fails on malformed text. Instead it reports each
//! anomaly (stray character, abandoned boolean, unterminated quote) to a
//! [`DiagnosticSink`] passed in by the caller. Resource failures are
//! reported here as well before being returned as an [`Error`](crate::Error).
//!
//! Two sinks are provided:
//!
//! - [`LogSink`]: forwards to the [`log`] facade (target `gendoc`)
//! - [`Diagnostics`]: keeps every record in memory
//!
//! ## Examples
//!
//! ```rust
//! use gendoc::{Diagnostics, Document, ParseOptions, Severity};
//!
//! let mut diags = Diagnostics::new();
//! let mut doc = Document::new();
//! doc.load_from_slice(b"kw 1-2\n", "inline", ParseOptions::NONE, &mut diags);
//!
//! assert!(diags.iter().any(|d| d.severity == Severity::Warning));
//! ```

use serde::Serialize;
use std::fmt;

/// How serious a reported anomaly is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Which layer raised the diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Tokenizer anomalies in the document text.
    Syntax,
    /// Opening or creating a named resource.
    Resource,
}

/// Receives diagnostics. Implementations must not panic or block indefinitely.
pub trait DiagnosticSink {
    fn report(&mut self, severity: Severity, category: Category, message: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, severity: Severity, category: Category, message: &str) {
        (**self).report(severity, category, message);
    }
}

/// Forwards diagnostics to the `log` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, severity: Severity, category: Category, message: &str) {
        match severity {
            Severity::Info => log::info!(target: "gendoc", "[{}] {}", category, message),
            Severity::Warning => log::warn!(target: "gendoc", "[{}] {}", category, message),
            Severity::Error => log::error!(target: "gendoc", "[{}] {}", category, message),
        }
    }
}

/// A single recorded diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [{}]: {}", self.severity, self.category, self.message)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Syntax => f.write_str("syntax"),
            Category::Resource => f.write_str("resource"),
        }
    }
}

/// Collects diagnostics in memory.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.records.iter()
    }

    /// Number of records at `severity` or above.
    #[must_use]
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.records.iter().filter(|d| d.severity >= severity).count()
    }

    /// Returns true if any message contains `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.records.iter().any(|d| d.message.contains(needle))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.records
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, severity: Severity, category: Category, message: &str) {
        self.records.push(Diagnostic {
            severity,
            category,
            message: message.to_string(),
        });
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
