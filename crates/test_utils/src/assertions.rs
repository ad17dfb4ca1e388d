//! Custom Test Assertions
//!
//! Provides assertion helpers for eligibility results that give more
//! meaningful failure messages than standard assertions.

use rust_decimal::Decimal;

use domain_eligibility::{ComparisonReport, EligibilityResult, ProviderRuleSet};

/// Asserts that a result is eligible with exactly the expected premium
pub fn assert_eligible_with_premium(result: &EligibilityResult, expected: Decimal) {
    assert!(
        result.eligible(),
        "Expected {} to be eligible, got reason '{}'",
        result.provider_code(),
        result.reason()
    );
    assert_eq!(
        result.estimated_premium(),
        Some(expected),
        "Premium mismatch for {}",
        result.provider_code()
    );
}

/// Asserts that a result is ineligible and its reason contains `fragment`
///
/// # Panics
///
/// Panics if the result is eligible, carries a premium, or the reason does
/// not mention `fragment`
pub fn assert_ineligible_because(result: &EligibilityResult, fragment: &str) {
    assert!(
        !result.eligible(),
        "Expected {} to be ineligible",
        result.provider_code()
    );
    assert!(
        result.estimated_premium().is_none(),
        "Ineligible result for {} carries a premium",
        result.provider_code()
    );
    assert!(
        result.reason().contains(fragment),
        "Reason '{}' for {} does not mention '{}'",
        result.reason(),
        result.provider_code(),
        fragment
    );
}

/// Returns the result for one provider from a report
pub fn result_for<'a>(report: &'a ComparisonReport, provider_code: &str) -> &'a EligibilityResult {
    report
        .results
        .iter()
        .find(|r| r.provider_code() == provider_code)
        .unwrap_or_else(|| panic!("No result for provider '{}' in report", provider_code))
}

/// Asserts that two rule documents are identical apart from `last_updated`
pub fn assert_rules_unchanged(actual: &ProviderRuleSet, expected: &ProviderRuleSet) {
    assert_eq!(actual.provider_code, expected.provider_code);
    assert_eq!(
        actual.products, expected.products,
        "Products of {} changed",
        actual.provider_code
    );
    assert_eq!(actual.extra, expected.extra);
}
