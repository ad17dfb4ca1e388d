//! Eligibility domain services
//!
//! [`EligibilityService`] is the single entry point an orchestration layer
//! composes: it owns a shared [`RuleStore`] and exposes every callable
//! operation of the engine, resolving "today" in the store's timezone
//! wherever a caller omits a reference date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;

use core_kernel::{calculate_age, ProviderCode};

use crate::comparison::{compare_all, ComparisonReport, CustomerProfile};
use crate::eligibility::{check_eligibility, EligibilityResult};
use crate::error::EligibilityError;
use crate::insurance::InsuranceType;
use crate::premium::{self, PremiumBreakdown};
use crate::risk::{self, RiskAssessment, RiskProfile, RiskTier};
use crate::rule_store::RuleStore;
use crate::rules::{ProductRules, ProviderRuleSet};

/// Facade over the rule store and the pure eligibility functions
#[derive(Clone)]
pub struct EligibilityService {
    store: Arc<RuleStore>,
}

impl EligibilityService {
    pub fn new(store: Arc<RuleStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Current date in the configured timezone
    pub fn today(&self) -> NaiveDate {
        self.store.timezone().today()
    }

    /// Age in whole years as of today
    ///
    /// # Errors
    ///
    /// Returns a validation error if `birth_date` is in the future
    pub fn calculate_age(&self, birth_date: NaiveDate) -> Result<u32, EligibilityError> {
        self.calculate_age_as_of(birth_date, self.today())
    }

    pub fn calculate_age_as_of(
        &self,
        birth_date: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<u32, EligibilityError> {
        Ok(calculate_age(birth_date, as_of)?)
    }

    pub fn assess_risk_category(&self, profile: &RiskProfile) -> RiskTier {
        risk::assess_risk_category(profile)
    }

    /// Full scoring breakdown, for callers that explain a tier
    pub fn assess_risk(&self, profile: &RiskProfile) -> RiskAssessment {
        risk::assess_risk(profile)
    }

    pub fn estimate_premium(&self, insurance_type: InsuranceType, age: u32, tier: RiskTier) -> Decimal {
        premium::estimate_premium(insurance_type, age, tier)
    }

    /// Estimates a premium for a raw insurance type name
    ///
    /// Unknown names are priced from the default base premium rather than
    /// rejected.
    pub fn estimate_premium_for_name(&self, insurance_type: &str, age: u32, tier: RiskTier) -> Decimal {
        premium::estimate_premium_with_base(premium::base_premium_for_name(insurance_type), age, tier)
    }

    pub fn premium_breakdown(&self, insurance_type: InsuranceType, age: u32, tier: RiskTier) -> PremiumBreakdown {
        PremiumBreakdown::compute(premium::base_premium(insurance_type), age, tier)
    }

    /// Checks one provider against the current rules
    pub fn check_provider_eligibility(
        &self,
        provider_code: &str,
        insurance_type: InsuranceType,
        age: u32,
        risk_tier: RiskTier,
    ) -> EligibilityResult {
        check_eligibility(&self.store.snapshot(), provider_code, insurance_type, age, risk_tier)
    }

    pub fn list_available_providers(&self) -> Vec<ProviderCode> {
        self.store.list_codes()
    }

    pub fn get_provider_details(&self, provider_code: &str) -> Result<ProviderRuleSet, EligibilityError> {
        self.store.get(provider_code)
    }

    pub fn get_product_rules(
        &self,
        provider_code: &str,
        insurance_type: InsuranceType,
    ) -> Result<ProductRules, EligibilityError> {
        self.store.get_product_rules(provider_code, insurance_type)
    }

    /// Changes one product field of one provider and persists the document
    pub fn update_provider_rules(
        &self,
        provider_code: &str,
        product: &str,
        field: &str,
        value: &Value,
    ) -> Result<ProviderRuleSet, EligibilityError> {
        self.store.update(provider_code, product, field, value)
    }

    /// Reloads every rule document, keeping the current rules on failure
    pub fn reload(&self) -> Result<usize, EligibilityError> {
        self.store.reload()
    }

    /// Evaluates a profile against every provider
    ///
    /// `as_of` defaults to today. All providers are evaluated against the
    /// same catalog snapshot.
    pub fn compare_all(
        &self,
        profile: &CustomerProfile,
        as_of: Option<NaiveDate>,
    ) -> Result<ComparisonReport, EligibilityError> {
        let as_of = as_of.unwrap_or_else(|| self.today());
        compare_all(&self.store.snapshot(), profile, as_of)
    }
}
