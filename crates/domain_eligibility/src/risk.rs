//! Risk assessment
//!
//! This module derives a customer's risk tier from age, health conditions,
//! and occupation. The scoring table is fixed business policy and is not
//! part of the provider rule documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EligibilityError;

/// Health conditions that carry the highest scoring weight
pub const HIGH_RISK_CONDITIONS: [&str; 3] = ["diabetes", "heart_disease", "cancer_history"];

/// Occupations that carry an additional scoring weight
pub const HIGH_RISK_OCCUPATIONS: [&str; 3] = ["construction", "mining", "firefighter"];

/// Minimum total score classified as [`RiskTier::High`]
pub const HIGH_TIER_MIN_SCORE: u32 = 5;

/// Minimum total score classified as [`RiskTier::Medium`]
pub const MEDIUM_TIER_MIN_SCORE: u32 = 2;

/// Occupation assumed when a caller omits one
pub const DEFAULT_OCCUPATION: &str = "office";

/// Underwriting risk classification, totally ordered low < medium < high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// All tiers in ascending order
    pub const ALL: [RiskTier; 3] = [RiskTier::Low, RiskTier::Medium, RiskTier::High];

    /// Maps a total risk score to its tier
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_TIER_MIN_SCORE {
            RiskTier::High
        } else if score >= MEDIUM_TIER_MIN_SCORE {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Returns the lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        RiskTier::ALL
            .into_iter()
            .find(|t| t.as_str() == normalised)
            .ok_or_else(|| {
                EligibilityError::validation(format!(
                    "Unknown risk tier '{}': expected one of low, medium, high",
                    s
                ))
            })
    }
}

/// The subset of a customer profile that drives risk scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Age in whole years
    pub age: u32,
    /// Free-text condition tags
    #[serde(default)]
    pub health_conditions: Vec<String>,
    /// Free-text occupation label
    #[serde(default = "default_occupation")]
    pub occupation: String,
}

fn default_occupation() -> String {
    DEFAULT_OCCUPATION.to_string()
}

impl RiskProfile {
    pub fn new(age: u32, health_conditions: Vec<String>, occupation: impl Into<String>) -> Self {
        Self {
            age,
            health_conditions,
            occupation: occupation.into(),
        }
    }
}

/// Factor contributing to a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Age,
    Health,
    Occupation,
}

/// Points awarded for one factor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: RiskFactor,
    pub points: u32,
    pub note: String,
}

/// Full scoring breakdown for a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub tier: RiskTier,
    pub factors: Vec<FactorScore>,
}

fn normalise(tag: &str) -> String {
    tag.trim().to_lowercase()
}

fn score_age(age: u32) -> FactorScore {
    let (points, note) = if age < 25 || age > 65 {
        (2, format!("age {} is outside the 25-65 band", age))
    } else if age > 50 {
        (1, format!("age {} is above 50", age))
    } else {
        (0, format!("age {} carries no loading", age))
    };
    FactorScore { factor: RiskFactor::Age, points, note }
}

fn score_health(conditions: &[String]) -> FactorScore {
    let serious = conditions
        .iter()
        .map(|c| normalise(c))
        .find(|c| HIGH_RISK_CONDITIONS.contains(&c.as_str()));

    let (points, note) = match serious {
        Some(condition) => (3, format!("high-risk condition '{}'", condition)),
        None if !conditions.is_empty() => (1, format!("{} declared condition(s)", conditions.len())),
        None => (0, "no declared conditions".to_string()),
    };
    FactorScore { factor: RiskFactor::Health, points, note }
}

fn score_occupation(occupation: &str) -> FactorScore {
    let occupation = normalise(occupation);
    let (points, note) = if HIGH_RISK_OCCUPATIONS.contains(&occupation.as_str()) {
        (2, format!("high-risk occupation '{}'", occupation))
    } else {
        (0, format!("occupation '{}' carries no loading", occupation))
    };
    FactorScore { factor: RiskFactor::Occupation, points, note }
}

/// Scores every risk factor and classifies the total
///
/// # Example
///
/// ```rust,ignore
/// let assessment = assess_risk(&RiskProfile::new(70, vec!["diabetes".into()], "construction"));
/// assert_eq!(assessment.score, 7);
/// assert_eq!(assessment.tier, RiskTier::High);
/// ```
pub fn assess_risk(profile: &RiskProfile) -> RiskAssessment {
    let factors = vec![
        score_age(profile.age),
        score_health(&profile.health_conditions),
        score_occupation(&profile.occupation),
    ];
    let score = factors.iter().map(|f| f.points).sum();

    RiskAssessment {
        score,
        tier: RiskTier::from_score(score),
        factors,
    }
}

/// Returns the risk tier for a profile
pub fn assess_risk_category(profile: &RiskProfile) -> RiskTier {
    assess_risk(profile).tier
}
