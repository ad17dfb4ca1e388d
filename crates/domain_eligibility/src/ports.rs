//! Rule storage port
//!
//! The rule store reads and writes provider documents through this trait so
//! the domain never touches the filesystem directly. Adapters live in the
//! `infra_rules` crate.

use std::sync::Arc;
use thiserror::Error;

/// One raw rule document as read from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDocument {
    /// Storage name used in error reports (e.g. `generali.json`)
    pub name: String,
    /// Raw JSON text
    pub contents: String,
}

impl RuleDocument {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Error type for storage operations
#[derive(Debug, Error)]
pub enum SourceError {
    /// The storage location itself cannot be used
    #[error("Rule source unavailable at {location}: {message}")]
    Unavailable {
        location: String,
        message: String,
    },

    /// Reading or writing a single document failed
    #[error("I/O error on {document}: {message}")]
    Io {
        document: String,
        message: String,
    },
}

/// Storage backend for provider rule documents
pub trait RuleSource: Send + Sync {
    /// Human readable description of where documents live
    fn location(&self) -> String;

    /// Reads every rule document currently in storage
    fn read_documents(&self) -> Result<Vec<RuleDocument>, SourceError>;

    /// Replaces the stored document named `document.name`
    ///
    /// The name is one previously returned by [`RuleSource::read_documents`].
    /// Implementations must either fully replace the document or leave the
    /// previous version untouched.
    fn write_document(&self, document: &RuleDocument) -> Result<(), SourceError>;
}

impl<T: RuleSource + ?Sized> RuleSource for Arc<T> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn read_documents(&self) -> Result<Vec<RuleDocument>, SourceError> {
        (**self).read_documents()
    }

    fn write_document(&self, document: &RuleDocument) -> Result<(), SourceError> {
        (**self).write_document(document)
    }
}
