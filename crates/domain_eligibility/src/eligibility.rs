//! Eligibility evaluation
//!
//! Decides whether one provider accepts one (age, risk tier, insurance type)
//! combination. The checks run as an ordered list of predicates,
//! [`EligibilityCheck::ORDER`]; the first failing check decides the outcome.
//! Age is checked before risk, so an applicant failing both is reported as
//! out of the age range.
//!
//! A provider that does not exist and a provider that does not offer the
//! product are both ordinary "not offered" outcomes, not errors.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::insurance::InsuranceType;
use crate::premium::estimate_premium_with_base;
use crate::risk::RiskTier;
use crate::rule_store::RuleCatalog;
use crate::rules::ProductRules;

/// Which end of a product's age range was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "bound", content = "value", rename_all = "snake_case")]
pub enum AgeBound {
    Minimum(u32),
    Maximum(u32),
}

/// The decision for one provider and product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityOutcome {
    Eligible,
    NotOffered,
    AgeOutOfRange { age: u32, bound: AgeBound },
    RiskExceedsMaximum { risk_tier: RiskTier, max_risk: RiskTier },
}

impl EligibilityOutcome {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityOutcome::Eligible)
    }
}

impl fmt::Display for EligibilityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityOutcome::Eligible => write!(f, "meets all criteria"),
            EligibilityOutcome::NotOffered => write!(f, "provider offers no such product"),
            EligibilityOutcome::AgeOutOfRange { age, bound: AgeBound::Minimum(min) } => {
                write!(f, "age {} is below the minimum age {}", age, min)
            }
            EligibilityOutcome::AgeOutOfRange { age, bound: AgeBound::Maximum(max) } => {
                write!(f, "age {} is above the maximum age {}", age, max)
            }
            EligibilityOutcome::RiskExceedsMaximum { risk_tier, max_risk } => write!(
                f,
                "risk tier {} exceeds the maximum accepted risk {}",
                risk_tier, max_risk
            ),
        }
    }
}

/// One predicate applied to a product's rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityCheck {
    Age,
    Risk,
}

impl EligibilityCheck {
    /// Evaluation order; the first failure short-circuits
    pub const ORDER: [EligibilityCheck; 2] = [EligibilityCheck::Age, EligibilityCheck::Risk];

    /// Returns the failing outcome, or `None` if the check passes
    pub fn evaluate(
        &self,
        rules: &ProductRules,
        age: u32,
        risk_tier: RiskTier,
    ) -> Option<EligibilityOutcome> {
        match self {
            EligibilityCheck::Age if age < rules.age_min => Some(EligibilityOutcome::AgeOutOfRange {
                age,
                bound: AgeBound::Minimum(rules.age_min),
            }),
            EligibilityCheck::Age if age > rules.age_max => Some(EligibilityOutcome::AgeOutOfRange {
                age,
                bound: AgeBound::Maximum(rules.age_max),
            }),
            EligibilityCheck::Risk if risk_tier > rules.max_risk => {
                Some(EligibilityOutcome::RiskExceedsMaximum {
                    risk_tier,
                    max_risk: rules.max_risk,
                })
            }
            _ => None,
        }
    }
}

/// Runs every check in order against an optional product entry
pub fn evaluate_product(
    rules: Option<&ProductRules>,
    age: u32,
    risk_tier: RiskTier,
) -> EligibilityOutcome {
    let Some(rules) = rules else {
        return EligibilityOutcome::NotOffered;
    };

    EligibilityCheck::ORDER
        .iter()
        .find_map(|check| check.evaluate(rules, age, risk_tier))
        .unwrap_or(EligibilityOutcome::Eligible)
}

/// Eligibility of one provider for one product
///
/// Never mutated after construction; `estimated_premium` is present exactly
/// when `eligible` is true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResult {
    provider_code: String,
    insurance_type: InsuranceType,
    eligible: bool,
    reason: String,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    estimated_premium: Option<Decimal>,
    outcome: EligibilityOutcome,
}

impl EligibilityResult {
    fn new(
        provider_code: String,
        insurance_type: InsuranceType,
        outcome: EligibilityOutcome,
        estimated_premium: Option<Decimal>,
    ) -> Self {
        Self {
            provider_code,
            insurance_type,
            eligible: outcome.is_eligible(),
            reason: outcome.to_string(),
            estimated_premium: estimated_premium.filter(|_| outcome.is_eligible()),
            outcome,
        }
    }

    pub fn provider_code(&self) -> &str {
        &self.provider_code
    }

    pub fn insurance_type(&self) -> InsuranceType {
        self.insurance_type
    }

    pub fn eligible(&self) -> bool {
        self.eligible
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn estimated_premium(&self) -> Option<Decimal> {
        self.estimated_premium
    }

    pub fn outcome(&self) -> EligibilityOutcome {
        self.outcome
    }
}

/// Checks one provider's eligibility and, when eligible, quotes a premium
/// from that provider's base premium
///
/// `provider_code` is matched case-insensitively. Unknown providers and
/// unknown products yield [`EligibilityOutcome::NotOffered`].
pub fn check_eligibility(
    catalog: &RuleCatalog,
    provider_code: &str,
    insurance_type: InsuranceType,
    age: u32,
    risk_tier: RiskTier,
) -> EligibilityResult {
    let product = catalog
        .find(provider_code)
        .and_then(|rule_set| rule_set.product(insurance_type));

    let outcome = evaluate_product(product, age, risk_tier);
    let premium = product
        .filter(|_| outcome.is_eligible())
        .map(|rules| estimate_premium_with_base(rules.base_premium, age, risk_tier));

    let code = provider_code.trim().to_lowercase();
    tracing::debug!(
        provider = %code,
        insurance_type = %insurance_type,
        age,
        risk_tier = %risk_tier,
        eligible = outcome.is_eligible(),
        "Eligibility evaluated"
    );

    EligibilityResult::new(code, insurance_type, outcome, premium)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ProviderRuleSet;
    use core_kernel::ProviderCode;
    use rust_decimal_macros::dec;

    fn life(age_min: u32, age_max: u32, max_risk: RiskTier) -> ProductRules {
        ProductRules::new(age_min, age_max, max_risk, dec!(45))
    }

    fn catalog() -> RuleCatalog {
        RuleCatalog::from_rule_sets([ProviderRuleSet::new(
            ProviderCode::new("generali").unwrap(),
            "Generali",
            "IT",
        )
        .with_product(InsuranceType::Life, life(18, 70, RiskTier::Medium))])
    }

    #[test]
    fn test_age_is_checked_before_risk() {
        let outcome = evaluate_product(Some(&life(18, 70, RiskTier::Low)), 75, RiskTier::High);
        assert_eq!(
            outcome,
            EligibilityOutcome::AgeOutOfRange {
                age: 75,
                bound: AgeBound::Maximum(70)
            }
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let rules = life(18, 70, RiskTier::Medium);
        assert!(evaluate_product(Some(&rules), 18, RiskTier::Low).is_eligible());
        assert!(evaluate_product(Some(&rules), 70, RiskTier::Medium).is_eligible());
        assert!(!evaluate_product(Some(&rules), 17, RiskTier::Low).is_eligible());
    }

    #[test]
    fn test_reason_strings() {
        let rules = life(18, 70, RiskTier::Medium);
        assert_eq!(
            evaluate_product(Some(&rules), 16, RiskTier::Low).to_string(),
            "age 16 is below the minimum age 18"
        );
        assert_eq!(
            evaluate_product(Some(&rules), 71, RiskTier::Low).to_string(),
            "age 71 is above the maximum age 70"
        );
        assert_eq!(
            evaluate_product(Some(&rules), 40, RiskTier::High).to_string(),
            "risk tier high exceeds the maximum accepted risk medium"
        );
        assert_eq!(evaluate_product(None, 40, RiskTier::Low).to_string(), "provider offers no such product");
    }

    #[test]
    fn test_eligible_result_carries_premium() {
        let result = check_eligibility(&catalog(), "Generali", InsuranceType::Life, 35, RiskTier::Low);
        assert!(result.eligible());
        assert_eq!(result.provider_code(), "generali");
        assert_eq!(result.reason(), "meets all criteria");
        assert_eq!(result.estimated_premium(), Some(dec!(45.00)));
    }

    #[test]
    fn test_ineligible_result_has_no_premium() {
        let result = check_eligibility(&catalog(), "generali", InsuranceType::Auto, 35, RiskTier::Low);
        assert!(!result.eligible());
        assert_eq!(result.outcome(), EligibilityOutcome::NotOffered);
        assert_eq!(result.estimated_premium(), None);
    }

    #[test]
    fn test_unknown_provider_is_not_offered() {
        let result = check_eligibility(&catalog(), "unknown_provider", InsuranceType::Life, 35, RiskTier::Low);
        assert_eq!(result.reason(), "provider offers no such product");
    }
}
