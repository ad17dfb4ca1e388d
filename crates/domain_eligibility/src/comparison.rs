//! Provider comparison
//!
//! Runs one customer profile against every provider in a catalog snapshot.
//! Age and risk tier are derived once per comparison; every provider gets a
//! result, eligible or not, in catalog order. Given the same profile,
//! reference date, and catalog, the report is identical on every call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{calculate_age, parse_date};

use crate::eligibility::{check_eligibility, EligibilityResult};
use crate::error::EligibilityError;
use crate::insurance::InsuranceType;
use crate::risk::{assess_risk, RiskProfile, RiskTier, DEFAULT_OCCUPATION};
use crate::rule_store::RuleCatalog;

/// A prospective customer, constructed per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerProfile {
    pub birth_date: NaiveDate,
    pub health_conditions: Vec<String>,
    pub occupation: String,
    pub insurance_type: InsuranceType,
}

impl CustomerProfile {
    pub fn new(birth_date: NaiveDate, insurance_type: InsuranceType) -> Self {
        Self {
            birth_date,
            health_conditions: Vec::new(),
            occupation: DEFAULT_OCCUPATION.to_string(),
            insurance_type,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.health_conditions.push(condition.into());
        self
    }

    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = occupation.into();
        self
    }

    /// Age in whole years at `as_of`
    pub fn age_at(&self, as_of: NaiveDate) -> Result<u32, EligibilityError> {
        Ok(calculate_age(self.birth_date, as_of)?)
    }

    /// The scoring inputs for a given age
    pub fn risk_profile(&self, age: u32) -> RiskProfile {
        RiskProfile::new(age, self.health_conditions.clone(), self.occupation.clone())
    }
}

/// Raw, unvalidated profile as received from a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub birth_date: String,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    pub insurance_type: String,
}

impl TryFrom<ProfileRequest> for CustomerProfile {
    type Error = EligibilityError;

    fn try_from(request: ProfileRequest) -> Result<Self, Self::Error> {
        let birth_date = parse_date(&request.birth_date)?;
        let insurance_type: InsuranceType = request.insurance_type.parse()?;
        let occupation = request
            .occupation
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OCCUPATION.to_string());

        Ok(Self {
            birth_date,
            health_conditions: request.health_conditions,
            occupation,
            insurance_type,
        })
    }
}

/// Every provider's decision for one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub as_of: NaiveDate,
    pub age: u32,
    pub risk_score: u32,
    pub risk_tier: RiskTier,
    pub insurance_type: InsuranceType,
    /// One result per provider, in catalog order
    pub results: Vec<EligibilityResult>,
}

impl ComparisonReport {
    /// Eligible results in catalog order
    pub fn eligible(&self) -> Vec<&EligibilityResult> {
        self.results.iter().filter(|r| r.eligible()).collect()
    }

    /// Eligible results by ascending premium then provider code, followed by
    /// ineligible results in catalog order
    pub fn ranked(&self) -> Vec<&EligibilityResult> {
        let mut eligible = self.eligible();
        eligible.sort_by(|a, b| {
            a.estimated_premium()
                .cmp(&b.estimated_premium())
                .then_with(|| a.provider_code().cmp(b.provider_code()))
        });
        eligible.extend(self.results.iter().filter(|r| !r.eligible()));
        eligible
    }

    /// The eligible result with the lowest premium
    pub fn cheapest(&self) -> Option<&EligibilityResult> {
        self.ranked().into_iter().find(|r| r.eligible())
    }
}

/// Evaluates `profile` against every provider in `catalog`
///
/// # Errors
///
/// Returns a validation error if the birth date is after `as_of`.
pub fn compare_all(
    catalog: &RuleCatalog,
    profile: &CustomerProfile,
    as_of: NaiveDate,
) -> Result<ComparisonReport, EligibilityError> {
    let age = profile.age_at(as_of)?;
    let assessment = assess_risk(&profile.risk_profile(age));

    let results: Vec<EligibilityResult> = catalog
        .iter()
        .map(|(code, _)| {
            check_eligibility(catalog, code.as_str(), profile.insurance_type, age, assessment.tier)
        })
        .collect();

    tracing::debug!(
        age,
        risk_tier = %assessment.tier,
        insurance_type = %profile.insurance_type,
        providers = results.len(),
        eligible = results.iter().filter(|r| r.eligible()).count(),
        "Providers compared"
    );

    Ok(ComparisonReport {
        as_of,
        age,
        risk_score: assessment.score,
        risk_tier: assessment.tier,
        insurance_type: profile.insurance_type,
        results,
    })
}
