//! Interface error types

use thiserror::Error;

use domain_eligibility::EligibilityError;

use crate::tools::ToolError;

/// Errors surfaced by the command line interface
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument(message.into())
    }
}
