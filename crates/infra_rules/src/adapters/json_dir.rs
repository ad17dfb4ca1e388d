//! JSON directory adapter
//!
//! Stores one document per provider inside a single directory, usually as
//! `<provider_code>.json`. Files without a `.json` extension are ignored.
//! Updates are written back to the file the document was read from.
//!
//! Writes go to a temporary file in the same directory which then replaces
//! the target in one rename, so a crash mid-write leaves the previous
//! document intact.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_rules::JsonDirectorySource;
//! use domain_eligibility::RuleStore;
//!
//! let store = RuleStore::open(JsonDirectorySource::new("data/providers"))?;
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use domain_eligibility::{RuleDocument, RuleSource, SourceError};

use crate::error::StorageError;

const DOCUMENT_EXTENSION: &str = "json";

/// Filesystem-backed rule source
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    directory: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of a document inside the directory
    ///
    /// Only bare `.json` file names are accepted, so a write can never land
    /// outside the directory or under a name the next read would skip.
    pub fn document_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        let candidate = Path::new(name);
        let is_bare_name = candidate.file_name().map(|n| n == candidate.as_os_str()).unwrap_or(false);
        if !is_bare_name || !has_document_extension(candidate) {
            return Err(StorageError::InvalidDocumentName(name.to_string()));
        }
        Ok(self.directory.join(candidate))
    }

    fn ensure_directory(&self) -> Result<(), StorageError> {
        if !self.directory.exists() {
            return Err(StorageError::DirectoryNotFound(self.directory.clone()));
        }
        if !self.directory.is_dir() {
            return Err(StorageError::NotADirectory(self.directory.clone()));
        }
        Ok(())
    }

    /// Lists `.json` files in name order
    fn document_paths(&self) -> Result<Vec<PathBuf>, StorageError> {
        self.ensure_directory()?;

        let list_failed = |source| StorageError::ListFailed {
            path: self.directory.clone(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.directory).map_err(list_failed)? {
            let path = entry.map_err(list_failed)?.path();
            if path.is_file() && has_document_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read_all(&self) -> Result<Vec<RuleDocument>, StorageError> {
        self.document_paths()?
            .into_iter()
            .map(|path| {
                let contents = fs::read_to_string(&path).map_err(|source| StorageError::ReadFailed {
                    path: path.clone(),
                    source,
                })?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                debug!(document = %name, bytes = contents.len(), "Read rule document");
                Ok(RuleDocument::new(name, contents))
            })
            .collect()
    }

    fn write(&self, name: &str, contents: &str) -> Result<PathBuf, StorageError> {
        self.ensure_directory()?;
        let target = self.document_path(name)?;
        let write_failed = |source| StorageError::WriteFailed {
            path: target.clone(),
            source,
        };

        let mut staged = NamedTempFile::new_in(&self.directory).map_err(write_failed)?;
        staged.write_all(contents.as_bytes()).map_err(write_failed)?;
        if !contents.ends_with('\n') {
            staged.write_all(b"\n").map_err(write_failed)?;
        }
        staged.as_file().sync_all().map_err(write_failed)?;
        staged.persist(&target).map_err(|e| write_failed(e.error))?;

        Ok(target)
    }
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        .unwrap_or(false)
}

impl RuleSource for JsonDirectorySource {
    fn location(&self) -> String {
        self.directory.display().to_string()
    }

    #[instrument(skip(self), fields(directory = %self.directory.display()))]
    fn read_documents(&self) -> Result<Vec<RuleDocument>, SourceError> {
        let documents = self.read_all()?;
        debug!(count = documents.len(), "Rule documents read");
        Ok(documents)
    }

    #[instrument(skip(self, document), fields(directory = %self.directory.display(), document = %document.name))]
    fn write_document(&self, document: &RuleDocument) -> Result<(), SourceError> {
        let path = self.write(&document.name, &document.contents)?;
        debug!(path = %path.display(), "Rule document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter() {
        assert!(has_document_extension(Path::new("generali.json")));
        assert!(has_document_extension(Path::new("AXA.JSON")));
        assert!(!has_document_extension(Path::new("notes.txt")));
        assert!(!has_document_extension(Path::new("json")));
    }

    #[test]
    fn test_missing_directory() {
        let source = JsonDirectorySource::new("/nonexistent/rules/dir");
        let err = source.read_all().unwrap_err();
        assert!(matches!(err, StorageError::DirectoryNotFound(_)));
        assert!(err.is_location_error());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirectorySource::new(dir.path());

        source.write("axa.json", "{}").unwrap();
        let documents = source.read_all().unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].name, "axa.json");
        assert_eq!(documents[0].contents, "{}\n");
    }

    #[test]
    fn test_document_path_keeps_existing_name() {
        let source = JsonDirectorySource::new("/rules");
        assert_eq!(source.document_path("Generali.json").unwrap(), Path::new("/rules/Generali.json"));
    }

    #[test]
    fn test_document_path_rejects_foreign_names() {
        let source = JsonDirectorySource::new("/rules");
        for name in ["../axa.json", "sub/axa.json", "axa.txt", "", ".."] {
            let err = source.document_path(name).unwrap_err();
            assert!(matches!(err, StorageError::InvalidDocumentName(_)), "accepted '{}'", name);
        }
    }
}
