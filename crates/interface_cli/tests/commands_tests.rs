//! Command Dispatch Tests
//!
//! Runs parsed command lines against a service built from a temporary rules
//! directory, the same path the `eligibility` binary takes.

use clap::Parser;
use serde_json::json;

use interface_cli::{build_service, execute, Cli, CliConfig, CliError};
use test_utils::*;

fn run(dir: &TestRuleDirectory, args: &[&str]) -> Result<serde_json::Value, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("eligibility").chain(args.iter().copied())).unwrap();
    let config = CliConfig::default().with_rules_dir(dir.path());
    let service = build_service(&config)?;
    execute(cli.command, &service)
}

/// Verifies provider listing from disk
#[test]
fn test_providers_command() {
    let dir = TestRuleDirectory::with_reference_providers();
    assert_eq!(
        run(&dir, &["providers"]).unwrap(),
        json!(["allianz", "axa", "generali", "unipolsai"])
    );
}

/// Verifies the check command output carries the premium
#[test]
fn test_check_command() {
    let dir = TestRuleDirectory::with_reference_providers();
    let output = run(&dir, &["check", "unipolsai", "life", "35", "low"]).unwrap();
    assert_eq!(output["eligible"], json!(true));
    assert_eq!(output["estimated_premium"], json!(40.0));
}

/// Verifies the age command with an explicit reference date
#[test]
fn test_age_command() {
    let dir = TestRuleDirectory::with_reference_providers();
    let output = run(&dir, &["age", "2000-02-29", "--as-of", "2023-02-28"]).unwrap();
    assert_eq!(output["age"], json!(22));
}

/// Verifies the update command persists and accepts textual values
#[test]
fn test_update_command() {
    let dir = TestRuleDirectory::with_reference_providers();
    run(&dir, &["update", "axa", "health", "max_risk", "medium"]).unwrap();
    assert_eq!(dir.read_document("axa")["products"]["health"]["max_risk"], json!("medium"));
}

/// Verifies validation fails on a broken document
#[test]
fn test_validate_command() {
    let dir = TestRuleDirectory::with_reference_providers();
    assert_eq!(run(&dir, &["validate"]).unwrap()["valid"], json!(true));

    dir.write_raw("broken.json", "{ not json");
    let err = run(&dir, &["validate"]).unwrap_err();
    assert!(err.to_string().contains("broken.json"), "error was '{}'", err);
}

/// Verifies the tool command dispatches through the registry
#[test]
fn test_tool_command() {
    let dir = TestRuleDirectory::with_reference_providers();
    let output = run(&dir, &["tool", "calculate_age", r#"{"birth_date": "1990-05-15", "as_of": "2025-05-14"}"#]).unwrap();
    assert_eq!(output, json!(34));
}
