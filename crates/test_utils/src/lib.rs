//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! eligibility engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: The four reference providers and the reference profiles
//! - `builders`: Builder patterns for rule documents and customer profiles
//! - `rule_dir`: Temporary rule directories and ready-made stores
//! - `assertions`: Custom assertion helpers for eligibility results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod rule_dir;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use rule_dir::*;
pub use assertions::*;
pub use generators::*;
