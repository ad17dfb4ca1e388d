//! In-memory adapter
//!
//! Keeps documents in a map keyed by storage name. Used by tests and by
//! callers that build rules programmatically. Individual documents can be
//! made to fail on write to exercise error paths.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, PoisonError};

use domain_eligibility::{RuleDocument, RuleSource, SourceError};

/// Map-backed rule source
#[derive(Debug, Default)]
pub struct InMemorySource {
    documents: Mutex<BTreeMap<String, String>>,
    failing_writes: Mutex<BTreeSet<String>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document under an explicit storage name
    pub fn with_document(self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(name, contents);
        self
    }

    pub fn insert(&self, name: impl Into<String>, contents: impl Into<String>) {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), contents.into());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Returns the stored text of a document
    pub fn contents(&self, name: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Makes every later write to the document `name` fail
    pub fn fail_writes_for(&self, name: impl Into<String>) {
        self.failing_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into());
    }

    /// Stored document names in order
    pub fn names(&self) -> Vec<String> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl RuleSource for InMemorySource {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn read_documents(&self) -> Result<Vec<RuleDocument>, SourceError> {
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(documents
            .iter()
            .map(|(name, contents)| RuleDocument::new(name.clone(), contents.clone()))
            .collect())
    }

    fn write_document(&self, document: &RuleDocument) -> Result<(), SourceError> {
        let failing = self
            .failing_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&document.name);
        if failing {
            return Err(SourceError::Io {
                document: document.name.clone(),
                message: "write rejected".to_string(),
            });
        }

        self.insert(document.name.clone(), document.contents.clone());
        Ok(())
    }
}
