//! Command line definition and dispatch

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

use core_kernel::parse_date;
use domain_eligibility::{
    CustomerProfile, EligibilityService, InsuranceType, RiskProfile, RiskTier,
};

use crate::error::CliError;
use crate::tools::ToolRegistry;

#[derive(Debug, Parser)]
#[command(
    name = "eligibility",
    about = "Insurance eligibility engine",
    long_about = "Evaluate customer profiles against provider underwriting rules, estimate premiums, and maintain provider rule documents.",
    after_help = "Examples:\n  eligibility providers\n  eligibility check generali life 35 low\n  eligibility compare --birth-date 1990-05-15 --insurance-type life\n  eligibility tool calculate_age '{\"birth_date\": \"1990-05-15\"}'"
)]
pub struct Cli {
    /// Directory holding the provider rule documents
    #[arg(long, global = true)]
    pub rules_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "List provider codes")]
    Providers,

    #[command(about = "Show one provider's rule document")]
    Provider { code: String },

    #[command(about = "Calculate age in whole years from a birth date")]
    Age {
        birth_date: String,
        #[arg(long, help = "Reference date (default: today)")]
        as_of: Option<String>,
    },

    #[command(about = "Score a profile and classify its risk tier")]
    Risk {
        #[arg(long)]
        age: u32,
        #[arg(long = "condition", help = "Health condition; repeat for several")]
        conditions: Vec<String>,
        #[arg(long, default_value = "office")]
        occupation: String,
    },

    #[command(about = "Estimate a monthly premium from the standard base table")]
    Premium {
        insurance_type: InsuranceType,
        age: u32,
        tier: RiskTier,
    },

    #[command(about = "Check one provider's eligibility")]
    Check {
        provider: String,
        insurance_type: InsuranceType,
        age: u32,
        tier: RiskTier,
    },

    #[command(about = "Compare every provider for one profile")]
    Compare {
        #[arg(long)]
        birth_date: String,
        #[arg(long = "condition", help = "Health condition; repeat for several")]
        conditions: Vec<String>,
        #[arg(long, default_value = "office")]
        occupation: String,
        #[arg(long)]
        insurance_type: InsuranceType,
        #[arg(long, help = "Reference date (default: today)")]
        as_of: Option<String>,
    },

    #[command(about = "Change one field of one provider product")]
    Update {
        provider: String,
        product: String,
        field: String,
        /// New value; parsed as JSON when possible, otherwise taken as text
        value: String,
    },

    #[command(about = "Load every rule document and report problems")]
    Validate,

    #[command(about = "List the callable tools")]
    Tools,

    #[command(about = "Invoke a tool with a JSON argument object")]
    Tool {
        name: String,
        #[arg(default_value = "{}")]
        input: String,
    },
}

/// Parses a command line value as JSON, falling back to a plain string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_optional_date(raw: Option<&str>) -> Result<Option<chrono::NaiveDate>, CliError> {
    raw.map(|s| parse_date(s).map_err(|e| CliError::invalid_argument(e.to_string())))
        .transpose()
}

/// Runs one command against a loaded service and returns its JSON output
pub fn execute(command: Command, service: &EligibilityService) -> Result<Value, CliError> {
    let output = match command {
        Command::Providers => json!(service.list_available_providers()),
        Command::Provider { code } => serde_json::to_value(service.get_provider_details(&code)?)?,
        Command::Age { birth_date, as_of } => {
            let birth_date = parse_date(&birth_date).map_err(|e| CliError::invalid_argument(e.to_string()))?;
            let as_of = parse_optional_date(as_of.as_deref())?.unwrap_or_else(|| service.today());
            let age = service.calculate_age_as_of(birth_date, as_of)?;
            json!({ "birth_date": birth_date, "as_of": as_of, "age": age })
        }
        Command::Risk { age, conditions, occupation } => {
            serde_json::to_value(service.assess_risk(&RiskProfile::new(age, conditions, occupation)))?
        }
        Command::Premium { insurance_type, age, tier } => {
            serde_json::to_value(service.premium_breakdown(insurance_type, age, tier))?
        }
        Command::Check { provider, insurance_type, age, tier } => {
            serde_json::to_value(service.check_provider_eligibility(&provider, insurance_type, age, tier))?
        }
        Command::Compare { birth_date, conditions, occupation, insurance_type, as_of } => {
            let birth_date = parse_date(&birth_date).map_err(|e| CliError::invalid_argument(e.to_string()))?;
            let mut profile = CustomerProfile::new(birth_date, insurance_type).with_occupation(occupation);
            profile.health_conditions = conditions;
            let report = service.compare_all(&profile, parse_optional_date(as_of.as_deref())?)?;
            serde_json::to_value(report)?
        }
        Command::Update { provider, product, field, value } => {
            let updated = service.update_provider_rules(&provider, &product, &field, &parse_value(&value))?;
            serde_json::to_value(updated)?
        }
        Command::Validate => {
            let codes = service.list_available_providers();
            json!({ "valid": true, "providers": codes })
        }
        Command::Tools => serde_json::to_value(ToolRegistry::standard(service.clone()).definitions())?,
        Command::Tool { name, input } => {
            let input: Value = serde_json::from_str(&input)?;
            ToolRegistry::standard(service.clone()).call(&name, input)?
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("75"), json!(75));
        assert_eq!(parse_value("49.5"), json!(49.5));
        assert_eq!(parse_value("\"high\""), json!("high"));
        assert_eq!(parse_value("high"), json!("high"));
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from(["eligibility", "check", "generali", "life", "35", "low"]).unwrap();
        match cli.command {
            Command::Check { provider, insurance_type, age, tier } => {
                assert_eq!(provider, "generali");
                assert_eq!(insurance_type, InsuranceType::Life);
                assert_eq!(age, 35);
                assert_eq!(tier, RiskTier::Low);
            }
            other => panic!("Expected Check, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_insurance_type() {
        assert!(Cli::try_parse_from(["eligibility", "premium", "pet", "35", "low"]).is_err());
    }

    #[test]
    fn test_cli_collects_conditions() {
        let cli = Cli::try_parse_from([
            "eligibility",
            "compare",
            "--birth-date",
            "1955-01-10",
            "--condition",
            "diabetes",
            "--condition",
            "asthma",
            "--insurance-type",
            "health",
        ])
        .unwrap();
        match cli.command {
            Command::Compare { conditions, occupation, .. } => {
                assert_eq!(conditions, vec!["diabetes", "asthma"]);
                assert_eq!(occupation, "office");
            }
            other => panic!("Expected Compare, got {other:?}"),
        }
    }
}
