//! Rule storage error types
//!
//! Adapter failures are reported as [`StorageError`] and translated to the
//! domain's [`SourceError`] at the port boundary.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use domain_eligibility::SourceError;

/// Errors that can occur while reading or writing rule documents
#[derive(Debug, Error)]
pub enum StorageError {
    /// The configured rules directory does not exist
    #[error("Rules directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The configured path exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Listing the rules directory failed
    #[error("Failed to list {}: {source}", path.display())]
    ListFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading one document failed
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document name that is not a bare `.json` file name
    #[error("Invalid rule document name '{0}'")]
    InvalidDocumentName(String),

    /// Writing one document failed
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Checks if this error concerns the directory rather than one document
    pub fn is_location_error(&self) -> bool {
        matches!(
            self,
            StorageError::DirectoryNotFound(_)
                | StorageError::NotADirectory(_)
                | StorageError::ListFailed { .. }
        )
    }
}

impl From<StorageError> for SourceError {
    fn from(error: StorageError) -> Self {
        let message = error.to_string();
        match error {
            StorageError::DirectoryNotFound(path)
            | StorageError::NotADirectory(path)
            | StorageError::ListFailed { path, .. } => SourceError::Unavailable {
                location: path.display().to_string(),
                message,
            },
            StorageError::InvalidDocumentName(name) => SourceError::Io {
                document: name,
                message,
            },
            StorageError::ReadFailed { path, .. } | StorageError::WriteFailed { path, .. } => {
                SourceError::Io {
                    document: path.display().to_string(),
                    message,
                }
            }
        }
    }
}
