//! Eligibility domain errors
//!
//! This module defines all error types that can occur within the
//! eligibility engine. "Not offered" outcomes during evaluation are
//! business results, not errors, and never surface here.

use thiserror::Error;

use core_kernel::{CodeError, TemporalError};

use crate::ports::SourceError;

/// Errors that can occur in the eligibility domain
#[derive(Debug, Error)]
pub enum EligibilityError {
    /// Malformed caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown provider or product addressed by an administrative operation
    #[error("Not found: {0}")]
    NotFound(String),

    /// A rule document failed structural validation during load
    #[error("Failed to load rules from '{document}': {reason}")]
    ConfigurationLoad {
        document: String,
        reason: String,
    },

    /// The underlying rule storage failed
    #[error("Rule storage error: {0}")]
    Storage(#[from] SourceError),
}

impl EligibilityError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        EligibilityError::Validation(message.into())
    }

    /// Creates a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        EligibilityError::NotFound(message.into())
    }

    /// Creates a configuration load error attributed to one document
    pub fn load(document: impl Into<String>, reason: impl Into<String>) -> Self {
        EligibilityError::ConfigurationLoad {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, EligibilityError::Validation(_))
    }
}

impl From<TemporalError> for EligibilityError {
    fn from(err: TemporalError) -> Self {
        EligibilityError::Validation(err.to_string())
    }
}

impl From<CodeError> for EligibilityError {
    fn from(err: CodeError) -> Self {
        EligibilityError::Validation(format!("Invalid provider code: {}", err))
    }
}
