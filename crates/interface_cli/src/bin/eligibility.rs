//! Eligibility Engine - Command Line Binary
//!
//! # Usage
//!
//! ```bash
//! # List providers from the default rules directory
//! cargo run --bin eligibility -- providers
//!
//! # Compare every provider for one profile
//! cargo run --bin eligibility -- compare --birth-date 1990-05-15 --insurance-type life
//!
//! # Use another rules directory
//! ELIGIBILITY_RULES_DIR=/srv/rules cargo run --bin eligibility -- validate
//! ```
//!
//! # Environment Variables
//!
//! * `ELIGIBILITY_RULES_DIR` - Provider rule directory (default: data/providers)
//! * `ELIGIBILITY_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `ELIGIBILITY_TIMEZONE` - IANA timezone used for "today" (default: Europe/Rome)
//!
//! Output is pretty-printed JSON on stdout; logs go to stderr.

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::{build_service, execute, Cli, CliConfig, CliError};

fn main() -> ExitCode {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            let body = json!({ "error": format!("{:#}", err) });
            println!("{}", serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    init_tracing(&config.log_level);

    tracing::debug!(
        rules_dir = %config.rules_dir.display(),
        timezone = config.timezone.name(),
        "Configuration loaded"
    );

    let service = build_service(&config)?;
    let output = execute(cli.command, &service)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Loads layered configuration and applies the `--rules-dir` override
fn load_config(cli: &Cli) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(match &cli.rules_dir {
        Some(dir) => config.with_rules_dir(dir),
        None => config,
    })
}

/// Initializes the tracing subscriber for structured logging on stderr
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
