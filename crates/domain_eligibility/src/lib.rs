//! Insurance Eligibility Domain
//!
//! This crate implements the eligibility decision engine: it loads
//! per-provider underwriting rules from data, evaluates customer profiles
//! against them, derives a risk classification, and estimates a monthly
//! premium.
//!
//! # Architecture
//!
//! The domain layer is storage-agnostic. Rule documents are read and written
//! through the [`RuleSource`] port; adapters live in `infra_rules`.
//! - **Rule Store**: provider code → rule document, swapped atomically
//! - **Risk / Premium**: fixed scoring and pricing policy as pure functions
//! - **Evaluator**: ordered age and risk checks per provider product
//! - **Comparison**: one profile against every provider
//!
//! # Decision Flow
//!
//! ```text
//! profile -> age + risk tier -> for each provider: Age check -> Risk check
//!                                                       \-> premium if eligible
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_eligibility::{EligibilityService, RuleStore, CustomerProfile, InsuranceType};
//!
//! let store = Arc::new(RuleStore::open(source)?);
//! let service = EligibilityService::new(store);
//!
//! let profile = CustomerProfile::new(birth_date, InsuranceType::Life)
//!     .with_occupation("office");
//! let report = service.compare_all(&profile, None)?;
//! for result in report.ranked() {
//!     println!("{}: {}", result.provider_code(), result.reason());
//! }
//! ```

pub mod insurance;
pub mod risk;
pub mod premium;
pub mod rules;
pub mod ports;
pub mod rule_store;
pub mod eligibility;
pub mod comparison;
pub mod error;
pub mod services;

pub use insurance::InsuranceType;
pub use risk::{assess_risk, assess_risk_category, RiskAssessment, RiskFactor, RiskProfile, RiskTier};
pub use premium::{estimate_premium, estimate_premium_with_base, PremiumBreakdown};
pub use rules::{ProductRules, ProviderRuleSet, RuleField, MAX_BASE_PREMIUM};
pub use ports::{RuleDocument, RuleSource, SourceError};
pub use rule_store::{RuleCatalog, RuleStore};
pub use eligibility::{check_eligibility, AgeBound, EligibilityCheck, EligibilityOutcome, EligibilityResult};
pub use comparison::{compare_all, ComparisonReport, CustomerProfile, ProfileRequest};
pub use error::EligibilityError;
pub use services::EligibilityService;
