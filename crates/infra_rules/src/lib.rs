//! Rule Storage Infrastructure
//!
//! This crate provides the storage adapters behind the eligibility engine's
//! `RuleSource` port.
//!
//! # Adapters
//!
//! - [`JsonDirectorySource`]: one `<provider_code>.json` document per
//!   provider in a directory, replaced atomically on write
//! - [`InMemorySource`]: documents held in memory, for tests and
//!   programmatic setups
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_rules::JsonDirectorySource;
//! use domain_eligibility::{EligibilityService, RuleStore};
//!
//! let store = RuleStore::open(JsonDirectorySource::new("data/providers"))?;
//! let service = EligibilityService::new(Arc::new(store));
//! ```

pub mod adapters;
pub mod error;

pub use adapters::{InMemorySource, JsonDirectorySource};
pub use error::StorageError;
