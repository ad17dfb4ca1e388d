//! Pre-built Test Fixtures
//!
//! Provides the reference provider rule documents and customer profiles.
//! The product bounds and premiums match the documents shipped in
//! `data/providers`.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use domain_eligibility::{CustomerProfile, InsuranceType, ProviderRuleSet, RiskTier};

use crate::builders::TestProviderBuilder;

/// Fixture for the reference providers
pub struct ProviderFixtures;

impl ProviderFixtures {
    /// Generali: life 18-70 up to medium risk
    pub fn generali() -> ProviderRuleSet {
        TestProviderBuilder::new("generali", "Generali")
            .with_last_updated(DateFixtures::rules_published())
            .with_product(InsuranceType::Life, 18, 70, RiskTier::Medium, dec!(45.0))
            .with_product(InsuranceType::Auto, 18, 80, RiskTier::High, dec!(75.0))
            .with_product(InsuranceType::Home, 18, 99, RiskTier::High, dec!(55.0))
            .with_product(InsuranceType::Health, 18, 75, RiskTier::Medium, dec!(90.0))
            .build()
    }

    /// UnipolSai: the most conservative provider
    pub fn unipolsai() -> ProviderRuleSet {
        TestProviderBuilder::new("unipolsai", "UnipolSai")
            .with_last_updated(DateFixtures::rules_published())
            .with_product(InsuranceType::Life, 18, 65, RiskTier::Low, dec!(40.0))
            .with_product(InsuranceType::Auto, 18, 75, RiskTier::Medium, dec!(68.0))
            .with_product(InsuranceType::Home, 18, 99, RiskTier::High, dec!(50.0))
            .with_product(InsuranceType::Health, 18, 60, RiskTier::Low, dec!(85.0))
            .build()
    }

    /// Allianz: accepts high risk for life and auto
    pub fn allianz() -> ProviderRuleSet {
        TestProviderBuilder::new("allianz", "Allianz")
            .with_last_updated(DateFixtures::rules_published())
            .with_product(InsuranceType::Life, 20, 75, RiskTier::High, dec!(52.0))
            .with_product(InsuranceType::Auto, 18, 85, RiskTier::High, dec!(82.0))
            .with_product(InsuranceType::Home, 18, 99, RiskTier::High, dec!(62.0))
            .with_product(InsuranceType::Health, 18, 75, RiskTier::Medium, dec!(105.0))
            .build()
    }

    /// AXA
    pub fn axa() -> ProviderRuleSet {
        TestProviderBuilder::new("axa", "AXA")
            .with_last_updated(DateFixtures::rules_published())
            .with_product(InsuranceType::Life, 18, 60, RiskTier::Medium, dec!(48.0))
            .with_product(InsuranceType::Auto, 21, 80, RiskTier::Medium, dec!(72.0))
            .with_product(InsuranceType::Home, 18, 99, RiskTier::Medium, dec!(58.0))
            .with_product(InsuranceType::Health, 18, 65, RiskTier::High, dec!(95.0))
            .build()
    }

    /// All four reference providers
    pub fn all() -> Vec<ProviderRuleSet> {
        vec![Self::generali(), Self::unipolsai(), Self::allianz(), Self::axa()]
    }
}

/// Fixture for reference dates
pub struct DateFixtures;

impl DateFixtures {
    /// Reference date used by the profile fixtures (16 May 2025)
    pub fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()
    }

    /// Date stamped on the reference rule documents
    pub fn rules_published() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Fixture for customer profiles
pub struct ProfileFixtures;

impl ProfileFixtures {
    /// 35 years old at [`DateFixtures::as_of`], office worker, no conditions,
    /// applying for life cover; scores low risk
    pub fn healthy_office_worker() -> CustomerProfile {
        CustomerProfile::new(DateFixtures::date(1990, 5, 15), InsuranceType::Life)
            .with_occupation("office")
    }

    /// 70 years old at [`DateFixtures::as_of`], diabetic construction worker,
    /// applying for health cover; scores high risk
    pub fn elderly_high_risk() -> CustomerProfile {
        CustomerProfile::new(DateFixtures::date(1955, 1, 10), InsuranceType::Health)
            .with_condition("diabetes")
            .with_occupation("construction")
    }

    /// 22 years old at [`DateFixtures::as_of`], applying for auto cover
    pub fn young_driver() -> CustomerProfile {
        CustomerProfile::new(DateFixtures::date(2003, 2, 1), InsuranceType::Auto)
            .with_occupation("student")
    }
}
