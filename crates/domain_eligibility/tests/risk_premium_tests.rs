//! Risk Scoring and Premium Estimation Tests
//!
//! # Test Organization
//!
//! - `age_tests` - whole-year age truncation properties
//! - `risk_tests` - scoring table cases and monotonicity properties
//! - `premium_tests` - formula cases, rounding, and tier monotonicity

use chrono::Datelike;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::calculate_age;
use domain_eligibility::premium::{age_multiplier, base_premium_for_name, DEFAULT_BASE_PREMIUM};
use domain_eligibility::{
    assess_risk, assess_risk_category, estimate_premium, InsuranceType, RiskProfile, RiskTier,
};
use test_utils::*;

// ============================================================================
// AGE TESTS
// ============================================================================

mod age_tests {
    use super::*;

    proptest! {
        /// Verifies age equals the year difference, minus one before the birthday
        #[test]
        fn age_is_truncated_year_difference((birth, as_of) in birth_and_as_of_strategy()) {
            let age = calculate_age(birth, as_of).unwrap() as i32;
            let mut expected = as_of.year() - birth.year();
            if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
                expected -= 1;
            }
            prop_assert_eq!(age, expected);
        }

        /// Verifies a future birth date is always rejected
        #[test]
        fn future_birth_date_rejected((birth, as_of) in birth_and_as_of_strategy()) {
            prop_assume!(birth < as_of);
            prop_assert!(calculate_age(as_of, birth).is_err());
        }
    }
}

// ============================================================================
// RISK TESTS
// ============================================================================

mod risk_tests {
    use super::*;

    fn profile(age: u32, conditions: &[&str], occupation: &str) -> RiskProfile {
        RiskProfile::new(age, conditions.iter().map(|c| c.to_string()).collect(), occupation)
    }

    /// Verifies the tier boundaries of the scoring table
    #[test]
    fn test_tier_boundaries() {
        // 0 points
        assert_eq!(assess_risk_category(&profile(30, &[], "office")), RiskTier::Low);
        // 1 point: age over 50
        assert_eq!(assess_risk_category(&profile(55, &[], "office")), RiskTier::Low);
        // 2 points: young
        assert_eq!(assess_risk_category(&profile(20, &[], "office")), RiskTier::Medium);
        // 4 points: young + risky occupation
        assert_eq!(assess_risk_category(&profile(20, &[], "firefighter")), RiskTier::Medium);
        // 5 points: young + serious condition
        assert_eq!(assess_risk_category(&profile(20, &["heart_disease"], "office")), RiskTier::High);
    }

    /// Verifies each factor appears in the breakdown
    #[test]
    fn test_breakdown_lists_every_factor() {
        let assessment = assess_risk(&profile(70, &["diabetes"], "construction"));
        let points: Vec<u32> = assessment.factors.iter().map(|f| f.points).collect();
        assert_eq!(points, vec![2, 3, 2]);
        assert_eq!(assessment.score, 7);
    }

    /// Verifies conditions match exactly after normalisation, not by substring
    #[test]
    fn test_condition_match_is_exact() {
        let assessment = assess_risk(&profile(30, &["pre-diabetes"], "office"));
        assert_eq!(assessment.score, 1, "unknown condition scores as a minor one");
    }

    proptest! {
        /// Verifies adding a high-risk condition never lowers the tier
        #[test]
        fn high_risk_condition_never_lowers_tier(profile in risk_profile_strategy()) {
            let before = assess_risk_category(&profile);
            let mut worse = profile.clone();
            worse.health_conditions.push("diabetes".to_string());
            prop_assert!(assess_risk_category(&worse) >= before);
        }

        /// Verifies removing every condition and the occupation loading never raises the tier
        #[test]
        fn removing_risk_factors_never_raises_tier(profile in risk_profile_strategy()) {
            let before = assess_risk_category(&profile);
            let cleaned = RiskProfile::new(profile.age, Vec::new(), "office");
            prop_assert!(assess_risk_category(&cleaned) <= before);
        }
    }
}

// ============================================================================
// PREMIUM TESTS
// ============================================================================

mod premium_tests {
    use super::*;

    /// Verifies the base table with neutral multipliers
    #[test]
    fn test_base_table() {
        assert_eq!(estimate_premium(InsuranceType::Life, 35, RiskTier::Low), dec!(50.00));
        assert_eq!(estimate_premium(InsuranceType::Auto, 35, RiskTier::Low), dec!(80.00));
        assert_eq!(estimate_premium(InsuranceType::Home, 35, RiskTier::Low), dec!(60.00));
        assert_eq!(estimate_premium(InsuranceType::Health, 35, RiskTier::Low), dec!(100.00));
    }

    /// Verifies the age loading above 50 grows linearly
    #[test]
    fn test_age_loading_over_fifty() {
        assert_eq!(age_multiplier(51), dec!(1.22));
        assert_eq!(age_multiplier(70), dec!(1.60));
        // 100 x 1.6 x 1.8
        assert_eq!(estimate_premium(InsuranceType::Health, 70, RiskTier::High), dec!(288.00));
    }

    /// Verifies unknown type names fall back to the default base premium
    #[test]
    fn test_unknown_type_uses_default() {
        assert_eq!(base_premium_for_name("pet"), DEFAULT_BASE_PREMIUM);
        assert_eq!(base_premium_for_name("HEALTH"), dec!(100));
    }

    proptest! {
        /// Verifies premium never decreases as the risk tier rises
        #[test]
        fn premium_monotonic_in_tier(
            insurance_type in insurance_type_strategy(),
            age in age_strategy(),
        ) {
            let low = estimate_premium(insurance_type, age, RiskTier::Low);
            let medium = estimate_premium(insurance_type, age, RiskTier::Medium);
            let high = estimate_premium(insurance_type, age, RiskTier::High);
            prop_assert!(low <= medium);
            prop_assert!(medium <= high);
        }

        /// Verifies premiums always carry at most two decimal places
        #[test]
        fn premium_rounded_to_cents(
            insurance_type in insurance_type_strategy(),
            age in age_strategy(),
            tier in risk_tier_strategy(),
        ) {
            let premium = estimate_premium(insurance_type, age, tier);
            prop_assert!(premium.scale() <= 2);
        }
    }
}
