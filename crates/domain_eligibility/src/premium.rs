//! Premium estimation
//!
//! Monthly premium = base premium × age multiplier × risk multiplier,
//! rounded to cents. Multipliers are fixed policy constants; base premiums
//! come either from the standard table below or from a provider's product
//! rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::insurance::InsuranceType;
use crate::risk::RiskTier;

/// Base premium used when an insurance type is not recognised
pub const DEFAULT_BASE_PREMIUM: Decimal = dec!(50);

/// Standard monthly base premium by insurance type (EUR)
pub fn base_premium(insurance_type: InsuranceType) -> Decimal {
    match insurance_type {
        InsuranceType::Life => dec!(50),
        InsuranceType::Auto => dec!(80),
        InsuranceType::Home => dec!(60),
        InsuranceType::Health => dec!(100),
    }
}

/// Looks up the base premium for a raw insurance type name
///
/// Unrecognised names fall back to [`DEFAULT_BASE_PREMIUM`] instead of
/// failing.
pub fn base_premium_for_name(insurance_type: &str) -> Decimal {
    match insurance_type.parse::<InsuranceType>() {
        Ok(parsed) => base_premium(parsed),
        Err(_) => {
            tracing::warn!(
                insurance_type = %insurance_type,
                default = %DEFAULT_BASE_PREMIUM,
                "Unknown insurance type, using default base premium"
            );
            DEFAULT_BASE_PREMIUM
        }
    }
}

/// Returns the age loading applied to the base premium
pub fn age_multiplier(age: u32) -> Decimal {
    if age < 25 {
        dec!(1.5)
    } else if age > 50 {
        dec!(1.2) + dec!(0.02) * Decimal::from(age - 50)
    } else {
        dec!(1.0)
    }
}

/// Returns the risk loading applied to the base premium
pub fn risk_multiplier(tier: RiskTier) -> Decimal {
    match tier {
        RiskTier::Low => dec!(1.0),
        RiskTier::Medium => dec!(1.3),
        RiskTier::High => dec!(1.8),
    }
}

/// Itemised monthly premium estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub base_premium: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub age_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_premium: Decimal,
}

impl PremiumBreakdown {
    /// Computes the breakdown for an explicit base premium
    ///
    /// Base premiums of validated rule documents are capped at
    /// [`MAX_BASE_PREMIUM`](crate::rules::MAX_BASE_PREMIUM), which keeps the
    /// product in range.
    pub fn compute(base_premium: Decimal, age: u32, tier: RiskTier) -> Self {
        let age_multiplier = age_multiplier(age);
        let risk_multiplier = risk_multiplier(tier);
        let monthly_premium = (base_premium * age_multiplier * risk_multiplier).round_dp(2);

        Self {
            base_premium,
            age_multiplier,
            risk_multiplier,
            monthly_premium,
        }
    }
}

/// Estimates a monthly premium against an explicit base premium
pub fn estimate_premium_with_base(base_premium: Decimal, age: u32, tier: RiskTier) -> Decimal {
    PremiumBreakdown::compute(base_premium, age, tier).monthly_premium
}

/// Estimates a monthly premium from the standard base premium table
///
/// # Example
///
/// ```rust,ignore
/// let premium = estimate_premium(InsuranceType::Life, 35, RiskTier::Low);
/// assert_eq!(premium, dec!(50.00));
/// ```
pub fn estimate_premium(insurance_type: InsuranceType, age: u32, tier: RiskTier) -> Decimal {
    estimate_premium_with_base(base_premium(insurance_type), age, tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_multiplier_bands() {
        assert_eq!(age_multiplier(18), dec!(1.5));
        assert_eq!(age_multiplier(25), dec!(1.0));
        assert_eq!(age_multiplier(50), dec!(1.0));
        assert_eq!(age_multiplier(51), dec!(1.22));
        assert_eq!(age_multiplier(70), dec!(1.6));
    }

    #[test]
    fn test_standard_life_premium() {
        assert_eq!(estimate_premium(InsuranceType::Life, 35, RiskTier::Low), dec!(50.00));
    }

    #[test]
    fn test_young_high_risk_auto() {
        // 80 × 1.5 × 1.8
        assert_eq!(estimate_premium(InsuranceType::Auto, 20, RiskTier::High), dec!(216.00));
    }

    #[test]
    fn test_rounds_to_cents() {
        // 45.5 × 1.22 × 1.3 = 72.163
        assert_eq!(estimate_premium_with_base(dec!(45.5), 51, RiskTier::Medium), dec!(72.16));
    }

    #[test]
    fn test_unknown_type_uses_default_base() {
        assert_eq!(base_premium_for_name("travel"), DEFAULT_BASE_PREMIUM);
        assert_eq!(base_premium_for_name("HEALTH"), dec!(100));
    }
}
