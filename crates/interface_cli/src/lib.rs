//! Command Line and Tool Interface
//!
//! This crate is the outer surface of the eligibility engine.
//!
//! # Architecture
//!
//! - **Config**: layered settings (defaults, `eligibility.toml`, environment)
//! - **Tools**: every engine operation as a named JSON-in/JSON-out action
//!   for an orchestration layer
//! - **Commands**: the `eligibility` command line
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{build_service, config::CliConfig, tools::ToolRegistry};
//!
//! let service = build_service(&CliConfig::from_env()?)?;
//! let registry = ToolRegistry::standard(service);
//! let providers = registry.call("list_available_providers", json!({}))?;
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod tools;

use std::sync::Arc;

use domain_eligibility::{EligibilityService, RuleStore};
use infra_rules::JsonDirectorySource;

pub use commands::{execute, Cli, Command};
pub use config::CliConfig;
pub use error::CliError;
pub use tools::{Tool, ToolDefinition, ToolError, ToolRegistry};

/// Opens the rule directory named in `config` and loads every document
///
/// # Errors
///
/// Returns an error if the directory cannot be read or any document is
/// invalid
pub fn build_service(config: &CliConfig) -> Result<EligibilityService, CliError> {
    let store = RuleStore::new(JsonDirectorySource::new(&config.rules_dir)).with_timezone(config.timezone);
    store.load_all()?;
    Ok(EligibilityService::new(Arc::new(store)))
}
