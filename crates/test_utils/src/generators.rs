//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating profiles, dates, and rule
//! values that respect the engine's input invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_eligibility::{InsuranceType, ProductRules, RiskProfile, RiskTier};

/// Strategy for calendar dates between 1920 and 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..40_000i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(1920, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for (birth date, reference date) pairs with birth <= reference
pub fn birth_and_as_of_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..40_000i64)
        .prop_map(|(birth, offset)| (birth, birth + Duration::days(offset)))
}

/// Strategy for ages from newborn to 110
pub fn age_strategy() -> impl Strategy<Value = u32> {
    0u32..=110u32
}

pub fn risk_tier_strategy() -> impl Strategy<Value = RiskTier> {
    prop_oneof![Just(RiskTier::Low), Just(RiskTier::Medium), Just(RiskTier::High)]
}

pub fn insurance_type_strategy() -> impl Strategy<Value = InsuranceType> {
    prop_oneof![
        Just(InsuranceType::Life),
        Just(InsuranceType::Auto),
        Just(InsuranceType::Home),
        Just(InsuranceType::Health),
    ]
}

/// Strategy for condition tags, mixing high-risk and minor conditions
pub fn condition_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("diabetes".to_string()),
        Just("heart_disease".to_string()),
        Just("cancer_history".to_string()),
        Just("asthma".to_string()),
        Just("hypertension".to_string()),
        Just("allergies".to_string()),
    ]
}

pub fn conditions_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(condition_strategy(), 0..4)
}

/// Strategy for occupations, including the high-risk ones
pub fn occupation_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("office".to_string()),
        Just("teacher".to_string()),
        Just("nurse".to_string()),
        Just("construction".to_string()),
        Just("mining".to_string()),
        Just("firefighter".to_string()),
    ]
}

pub fn risk_profile_strategy() -> impl Strategy<Value = RiskProfile> {
    (age_strategy(), conditions_strategy(), occupation_strategy())
        .prop_map(|(age, conditions, occupation)| RiskProfile::new(age, conditions, occupation))
}

/// Strategy for non-negative premiums with cent precision
pub fn base_premium_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for valid product rules (age_min <= age_max)
pub fn product_rules_strategy() -> impl Strategy<Value = ProductRules> {
    (0u32..=100u32, 0u32..=40u32, risk_tier_strategy(), base_premium_strategy()).prop_map(
        |(age_min, span, max_risk, base_premium)| {
            ProductRules::new(age_min, age_min + span, max_risk, base_premium)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn birth_never_after_as_of((birth, as_of) in birth_and_as_of_strategy()) {
            prop_assert!(birth <= as_of);
        }

        #[test]
        fn product_rules_are_valid(rules in product_rules_strategy()) {
            prop_assert!(rules.validate().is_ok());
        }
    }
}
