//! Test Data Builders
//!
//! Provides builder patterns for constructing rule documents and profiles
//! with sensible defaults. Tests specify only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use core_kernel::ProviderCode;
use domain_eligibility::{InsuranceType, ProductRules, ProviderRuleSet, RiskTier};

/// Builder for provider rule documents
pub struct TestProviderBuilder {
    rule_set: ProviderRuleSet,
}

impl TestProviderBuilder {
    /// Creates a builder for an Italian provider with no products
    pub fn new(code: &str, name: &str) -> Self {
        let code = ProviderCode::new(code).unwrap();
        Self {
            rule_set: ProviderRuleSet::new(code, name, "IT"),
        }
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.rule_set.country = country.to_string();
        self
    }

    pub fn with_last_updated(mut self, date: NaiveDate) -> Self {
        self.rule_set.last_updated = Some(date);
        self
    }

    /// Adds or replaces one product
    pub fn with_product(
        mut self,
        insurance_type: InsuranceType,
        age_min: u32,
        age_max: u32,
        max_risk: RiskTier,
        base_premium: Decimal,
    ) -> Self {
        self.rule_set.products.insert(
            insurance_type,
            ProductRules::new(age_min, age_max, max_risk, base_premium),
        );
        self
    }

    /// Adds a field this engine does not interpret
    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.rule_set.extra.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> ProviderRuleSet {
        self.rule_set
    }

    /// Builds and serializes the document
    pub fn to_json(self) -> String {
        self.rule_set.to_json_pretty().unwrap()
    }
}

/// Builder for raw profile JSON as a caller would send it
pub struct TestProfileJsonBuilder {
    birth_date: String,
    health_conditions: Vec<String>,
    occupation: Option<String>,
    insurance_type: String,
    as_of: Option<String>,
}

impl Default for TestProfileJsonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProfileJsonBuilder {
    pub fn new() -> Self {
        Self {
            birth_date: "1990-05-15".to_string(),
            health_conditions: Vec::new(),
            occupation: None,
            insurance_type: "life".to_string(),
            as_of: None,
        }
    }

    pub fn with_birth_date(mut self, birth_date: &str) -> Self {
        self.birth_date = birth_date.to_string();
        self
    }

    pub fn with_condition(mut self, condition: &str) -> Self {
        self.health_conditions.push(condition.to_string());
        self
    }

    pub fn with_occupation(mut self, occupation: &str) -> Self {
        self.occupation = Some(occupation.to_string());
        self
    }

    pub fn with_insurance_type(mut self, insurance_type: &str) -> Self {
        self.insurance_type = insurance_type.to_string();
        self
    }

    pub fn with_as_of(mut self, as_of: &str) -> Self {
        self.as_of = Some(as_of.to_string());
        self
    }

    pub fn build(self) -> Value {
        let mut value = serde_json::json!({
            "birth_date": self.birth_date,
            "health_conditions": self.health_conditions,
            "insurance_type": self.insurance_type,
        });
        if let Some(occupation) = self.occupation {
            value["occupation"] = Value::String(occupation);
        }
        if let Some(as_of) = self.as_of {
            value["as_of"] = Value::String(as_of);
        }
        value
    }
}
