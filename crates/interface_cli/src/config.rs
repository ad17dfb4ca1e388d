//! Engine configuration
//!
//! Settings are layered: built-in defaults, then an optional
//! `eligibility.toml` in the working directory, then `ELIGIBILITY_*`
//! environment variables.

use serde::Deserialize;
use std::path::PathBuf;

use core_kernel::Timezone;

use crate::error::CliError;

/// Default location of the provider rule documents
pub const DEFAULT_RULES_DIR: &str = "data/providers";

/// Runtime configuration for the CLI and tool surface
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Directory holding one `<provider_code>.json` per provider
    pub rules_dir: PathBuf,
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
    /// Timezone used to resolve "today"
    pub timezone: Timezone,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rules_dir: PathBuf::from(DEFAULT_RULES_DIR),
            log_level: "info".to_string(),
            timezone: Timezone::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `eligibility.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if a source is malformed or a value does
    /// not parse (e.g. an unknown timezone).
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_environment(config::Environment::with_prefix("ELIGIBILITY"))
    }

    fn from_environment(environment: config::Environment) -> Result<Self, CliError> {
        let defaults = Self::default();
        let config = config::Config::builder()
            .set_default("rules_dir", DEFAULT_RULES_DIR)?
            .set_default("log_level", defaults.log_level)?
            .set_default("timezone", defaults.timezone.name())?
            .add_source(config::File::with_name("eligibility").required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Replaces the rules directory, e.g. from a command line flag
    pub fn with_rules_dir(mut self, rules_dir: impl Into<PathBuf>) -> Self {
        self.rules_dir = rules_dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.rules_dir, PathBuf::from("data/providers"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.timezone.name(), "Europe/Rome");
    }

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        config::Environment::with_prefix("ELIGIBILITY").source(Some(map))
    }

    #[test]
    fn test_environment_overrides() {
        let config = CliConfig::from_environment(environment(&[
            ("ELIGIBILITY_RULES_DIR", "/srv/rules"),
            ("ELIGIBILITY_TIMEZONE", "Europe/Paris"),
        ]))
        .unwrap();
        assert_eq!(config.rules_dir, PathBuf::from("/srv/rules"));
        assert_eq!(config.timezone.name(), "Europe/Paris");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_timezone_is_config_error() {
        let err = CliConfig::from_environment(environment(&[("ELIGIBILITY_TIMEZONE", "Mars/Olympus")]))
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)), "got {err:?}");
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_deserialize_timezone() {
        let config: CliConfig = serde_json::from_str(
            r#"{"rules_dir": "/srv/rules", "log_level": "debug", "timezone": "Europe/Paris"}"#,
        )
        .unwrap();
        assert_eq!(config.timezone.name(), "Europe/Paris");
        assert!(serde_json::from_str::<CliConfig>(
            r#"{"rules_dir": "x", "log_level": "info", "timezone": "Mars/Olympus"}"#
        )
        .is_err());
    }
}
