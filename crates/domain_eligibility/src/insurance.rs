//! Insurance product types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EligibilityError;

/// The fixed set of insurance products a provider may offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsuranceType {
    Life,
    Auto,
    Home,
    Health,
}

impl InsuranceType {
    /// All insurance types in declaration order
    pub const ALL: [InsuranceType; 4] = [
        InsuranceType::Life,
        InsuranceType::Auto,
        InsuranceType::Home,
        InsuranceType::Health,
    ];

    /// Returns the lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceType::Life => "life",
            InsuranceType::Auto => "auto",
            InsuranceType::Home => "home",
            InsuranceType::Health => "health",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsuranceType {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        InsuranceType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalised)
            .ok_or_else(|| {
                EligibilityError::validation(format!(
                    "Unknown insurance type '{}': expected one of life, auto, home, health",
                    s
                ))
            })
    }
}
