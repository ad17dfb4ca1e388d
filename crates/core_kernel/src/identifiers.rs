//! Strongly-typed identifiers for domain entities
//!
//! Provider codes are the primary key of the rule store. They are compared
//! case-insensitively, so every code is normalised to trimmed lowercase on
//! construction and can never hold an unnormalised value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when constructing a code from raw text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("code must not be empty")]
    Empty,

    #[error("code '{0}' contains characters other than letters, digits, '_' or '-'")]
    InvalidCharacters(String),
}

/// Stable identifier of an insurance provider (e.g. `generali`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderCode(String);

impl ProviderCode {
    /// Creates a provider code, normalising it to lowercase
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CodeError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(CodeError::Empty);
        }
        let valid = normalised
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CodeError::InvalidCharacters(normalised));
        }
        Ok(Self(normalised))
    }

    /// Returns the normalised code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProviderCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProviderCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderCode> for String {
    fn from(code: ProviderCode) -> String {
        code.0
    }
}

impl AsRef<str> for ProviderCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
