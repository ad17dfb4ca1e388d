//! Core Kernel - Foundational types shared by the eligibility engine
//!
//! This crate provides the building blocks used across the workspace:
//! - Provider codes as normalised, strongly-typed identifiers
//! - Calendar-correct age arithmetic and birth date parsing
//! - Jurisdiction timezones used to resolve "today"

pub mod temporal;
pub mod identifiers;

pub use temporal::{calculate_age, parse_date, TemporalError, Timezone};
pub use identifiers::{CodeError, ProviderCode};
