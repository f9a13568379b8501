//! Error types for loading and saving documents.
//!
//! Malformed text never produces an [`Error`]: the tokenizer reports every
//! anomaly to a [`DiagnosticSink`](crate::DiagnosticSink) and keeps going.
//! Errors are reserved for the stream boundary:
//!
//! - **I/O Errors**: a read or write on an already open stream failed
//! - **Resource Errors**: a named resource could not be opened or created
//!
//! ## Examples
//!
//! ```rust
//! use gendoc::{Document, Diagnostics, FsResources, ParseOptions};
//!
//! let resources = FsResources::new();
//! let mut doc = Document::new();
//! let mut diags = Diagnostics::new();
//!
//! let result = doc.load_from_resource(&resources, "truck.cfg", "missing", ParseOptions::NONE, &mut diags);
//! assert!(result.is_err());
//! assert_eq!(diags.len(), 1);
//! ```

use std::io;
use thiserror::Error;

/// Represents all failures that can be surfaced to the caller.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A resource could not be opened for reading
    #[error("could not load '{name}' from resource group '{group}': {msg}")]
    ResourceOpen {
        name: String,
        group: String,
        msg: String,
    },

    /// A resource could not be created for writing
    #[error("could not write '{name}' to resource group '{group}': {msg}")]
    ResourceCreate {
        name: String,
        group: String,
        msg: String,
    },

    /// The resource provider does not know the group
    #[error("unknown resource group '{0}'")]
    UnknownGroup(String),
}

impl Error {
    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a resource-open error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gendoc::Error;
    ///
    /// let err = Error::resource_open("a.cfg", "General", "not found");
    /// assert!(err.to_string().contains("resource group 'General'"));
    /// ```
    pub fn resource_open(name: &str, group: &str, msg: &str) -> Self {
        Error::ResourceOpen {
            name: name.to_string(),
            group: group.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a resource-create error.
    pub fn resource_create(name: &str, group: &str, msg: &str) -> Self {
        Error::ResourceCreate {
            name: name.to_string(),
            group: group.to_string(),
            msg: msg.to_string(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
