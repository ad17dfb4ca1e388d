//! Provider rule documents
//!
//! Each provider publishes one rule document describing the products it
//! offers and, per product, the age range, maximum accepted risk tier, and
//! monthly base premium. Documents are plain JSON so business users can edit
//! them without code changes:
//!
//! ```json
//! {
//!   "provider_name": "Generali",
//!   "provider_code": "generali",
//!   "country": "IT",
//!   "last_updated": "2025-01-15",
//!   "products": {
//!     "life": { "age_min": 18, "age_max": 70, "max_risk": "medium", "base_premium": 45.0 }
//!   }
//! }
//! ```
//!
//! Fields this module does not know about are carried through untouched so
//! that writing a document back never drops data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use core_kernel::ProviderCode;

use crate::error::EligibilityError;
use crate::insurance::InsuranceType;
use crate::risk::RiskTier;

/// Largest accepted monthly base premium
///
/// Keeps every premium derived from a validated document within `Decimal`
/// range for any age and risk tier.
pub const MAX_BASE_PREMIUM: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Underwriting bounds for one product of one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRules {
    /// Minimum accepted age (inclusive)
    pub age_min: u32,
    /// Maximum accepted age (inclusive)
    pub age_max: u32,
    /// Highest accepted risk tier
    pub max_risk: RiskTier,
    /// Monthly base premium (EUR)
    #[serde(with = "rust_decimal::serde::float")]
    pub base_premium: Decimal,
    /// Human readable product description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unrecognised fields, preserved on write-back
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProductRules {
    pub fn new(age_min: u32, age_max: u32, max_risk: RiskTier, base_premium: Decimal) -> Self {
        Self {
            age_min,
            age_max,
            max_risk,
            base_premium,
            description: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks the product invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.age_min > self.age_max {
            return Err(format!(
                "age_min {} exceeds age_max {}",
                self.age_min, self.age_max
            ));
        }
        if self.base_premium < Decimal::ZERO {
            return Err(format!("base_premium {} is negative", self.base_premium));
        }
        if self.base_premium > MAX_BASE_PREMIUM {
            return Err(format!(
                "base_premium {} exceeds the maximum {}",
                self.base_premium, MAX_BASE_PREMIUM
            ));
        }
        Ok(())
    }
}

/// The complete rule document of one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRuleSet {
    pub provider_name: String,
    pub provider_code: ProviderCode,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
    pub products: BTreeMap<InsuranceType, ProductRules>,
    /// Unrecognised fields, preserved on write-back
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProviderRuleSet {
    pub fn new(
        provider_code: ProviderCode,
        provider_name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            provider_code,
            country: country.into(),
            last_updated: None,
            products: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_product(mut self, insurance_type: InsuranceType, rules: ProductRules) -> Self {
        self.products.insert(insurance_type, rules);
        self
    }

    /// Parses a rule document from JSON text
    ///
    /// The result is not validated; call [`ProviderRuleSet::validate`].
    pub fn from_json(json: &str) -> Result<Self, EligibilityError> {
        serde_json::from_str(json).map_err(|e| EligibilityError::validation(e.to_string()))
    }

    /// Serializes the document as 2-space indented JSON
    pub fn to_json_pretty(&self) -> Result<String, EligibilityError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EligibilityError::validation(format!("Failed to serialize rules: {}", e)))
    }

    /// Returns the rules for one product, if offered
    pub fn product(&self, insurance_type: InsuranceType) -> Option<&ProductRules> {
        self.products.get(&insurance_type)
    }

    /// Checks every document invariant
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending product
    pub fn validate(&self) -> Result<(), EligibilityError> {
        if self.provider_name.trim().is_empty() {
            return Err(EligibilityError::validation("provider_name must not be empty"));
        }
        for (insurance_type, rules) in &self.products {
            rules.validate().map_err(|reason| {
                EligibilityError::validation(format!("product '{}': {}", insurance_type, reason))
            })?;
        }
        Ok(())
    }

    /// Sets one field of one product
    ///
    /// The value is type-checked for the field but the document invariants
    /// are not re-validated here.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the provider does not offer the product
    /// * `Validation` if the value has the wrong type for the field
    pub fn apply_update(
        &mut self,
        insurance_type: InsuranceType,
        field: RuleField,
        value: &Value,
    ) -> Result<(), EligibilityError> {
        let code = self.provider_code.clone();
        let rules = self.products.get_mut(&insurance_type).ok_or_else(|| {
            EligibilityError::not_found(format!(
                "Provider '{}' does not offer {} insurance",
                code, insurance_type
            ))
        })?;

        match field {
            RuleField::AgeMin => rules.age_min = value_as_age(field, value)?,
            RuleField::AgeMax => rules.age_max = value_as_age(field, value)?,
            RuleField::MaxRisk => rules.max_risk = value_as_risk_tier(value)?,
            RuleField::BasePremium => rules.base_premium = value_as_decimal(field, value)?,
            RuleField::Description => rules.description = Some(value_as_text(field, value)?),
        }
        Ok(())
    }
}

/// Product fields that may be changed through an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleField {
    AgeMin,
    AgeMax,
    MaxRisk,
    BasePremium,
    Description,
}

impl RuleField {
    pub const ALL: [RuleField; 5] = [
        RuleField::AgeMin,
        RuleField::AgeMax,
        RuleField::MaxRisk,
        RuleField::BasePremium,
        RuleField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleField::AgeMin => "age_min",
            RuleField::AgeMax => "age_max",
            RuleField::MaxRisk => "max_risk",
            RuleField::BasePremium => "base_premium",
            RuleField::Description => "description",
        }
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleField {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        RuleField::ALL
            .into_iter()
            .find(|f| f.as_str() == normalised)
            .ok_or_else(|| {
                EligibilityError::validation(format!(
                    "Unknown rule field '{}': expected one of age_min, age_max, max_risk, base_premium, description",
                    s
                ))
            })
    }
}

fn wrong_type(field: RuleField, expected: &str, value: &Value) -> EligibilityError {
    EligibilityError::validation(format!("{} must be {}, got {}", field, expected, value))
}

fn value_as_age(field: RuleField, value: &Value) -> Result<u32, EligibilityError> {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| wrong_type(field, "a non-negative whole number", value))
}

fn value_as_decimal(field: RuleField, value: &Value) -> Result<Decimal, EligibilityError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(wrong_type(field, "a number", value)),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| wrong_type(field, "a number", value))
}

fn value_as_risk_tier(value: &Value) -> Result<RiskTier, EligibilityError> {
    match value {
        Value::String(s) => s.parse(),
        _ => Err(wrong_type(RuleField::MaxRisk, "one of low, medium, high", value)),
    }
}

fn value_as_text(field: RuleField, value: &Value) -> Result<String, EligibilityError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_type(field, "a string", value))
}
