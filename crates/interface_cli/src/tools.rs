//! Callable tool surface
//!
//! Exposes each engine operation as a named action taking and returning
//! JSON, the shape an orchestration layer (for example an LLM agent)
//! invokes. Tools are registered in a [`ToolRegistry`] which dispatches by
//! name and can describe every tool it holds.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = ToolRegistry::standard(service);
//! let age = registry.call("calculate_age", json!({"birth_date": "1990-05-15"}))?;
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use core_kernel::parse_date;
use domain_eligibility::{
    CustomerProfile, EligibilityService, InsuranceType, ProfileRequest, RiskProfile, RiskTier,
};

/// Errors returned to the caller of a tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    #[error("Invalid input for {tool}: {message}")]
    InvalidInput { tool: String, message: String },

    #[error("{tool} failed: {message}")]
    Failed { tool: String, message: String },
}

impl ToolError {
    pub fn invalid_input(tool: &str, message: impl ToString) -> Self {
        ToolError::InvalidInput {
            tool: tool.to_string(),
            message: message.to_string(),
        }
    }

    pub fn failed(tool: &str, message: impl ToString) -> Self {
        ToolError::Failed {
            tool: tool.to_string(),
            message: message.to_string(),
        }
    }
}

/// One named operation
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Names of the accepted input fields
    fn parameters(&self) -> &'static [&'static str];
    fn execute(&self, service: &EligibilityService, input: Value) -> Result<Value, ToolError>;
}

/// Advertised description of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<&'static str>,
}

/// Tools keyed by name, bound to one service
pub struct ToolRegistry {
    service: EligibilityService,
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry
    pub fn new(service: EligibilityService) -> Self {
        Self {
            service,
            tools: BTreeMap::new(),
        }
    }

    /// Creates a registry holding every engine operation
    pub fn standard(service: EligibilityService) -> Self {
        let mut registry = Self::new(service);
        registry.register(CalculateAgeTool);
        registry.register(AssessRiskCategoryTool);
        registry.register(EstimatePremiumTool);
        registry.register(CheckProviderEligibilityTool);
        registry.register(ListAvailableProvidersTool);
        registry.register(GetProviderDetailsTool);
        registry.register(UpdateProviderRulesTool);
        registry.register(CompareProvidersTool);
        registry
    }

    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Runs the named tool
    pub fn call(&self, name: &str, input: Value) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tracing::debug!(tool = name, "Executing tool");
        let result = tool.execute(&self.service, input);
        if let Err(err) = &result {
            tracing::warn!(tool = name, error = %err, "Tool call failed");
        }
        result
    }

    /// Describes every registered tool, in name order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name(),
                description: tool.description(),
                parameters: tool.parameters().to_vec(),
            })
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn parse_input<T: DeserializeOwned>(tool: &str, input: Value) -> Result<T, ToolError> {
    // Tools without parameters accept a missing payload
    let input = if input.is_null() { json!({}) } else { input };
    serde_json::from_value(input).map_err(|e| ToolError::invalid_input(tool, e))
}

fn parse_optional_date(tool: &str, input: Option<&str>) -> Result<Option<NaiveDate>, ToolError> {
    input
        .map(|s| parse_date(s).map_err(|e| ToolError::invalid_input(tool, e)))
        .transpose()
}

/// Premiums are returned as plain JSON numbers
fn premium_value(premium: Decimal) -> Value {
    premium
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub struct CalculateAgeTool;

#[derive(Deserialize)]
struct CalculateAgeInput {
    birth_date: String,
    as_of: Option<String>,
}

impl Tool for CalculateAgeTool {
    fn name(&self) -> &'static str {
        "calculate_age"
    }

    fn description(&self) -> &'static str {
        "Calculate age in whole years from a birth date (YYYY-MM-DD)"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["birth_date", "as_of"]
    }

    fn execute(&self, service: &EligibilityService, input: Value) -> Result<Value, ToolError> {
        let input: CalculateAgeInput = parse_input(self.name(), input)?;
        let birth_date = parse_date(&input.birth_date).map_err(|e| ToolError::invalid_input(self.name(), e))?;
        let as_of = parse_optional_date(self.name(), input.as_of.as_deref())?.unwrap_or_else(|| service.today());

        let age = service
            .calculate_age_as_of(birth_date, as_of)
            .map_err(|e| ToolError::invalid_input(self.name(), e))?;
        Ok(json!(age))
    }
}

pub struct AssessRiskCategoryTool;

#[derive(Deserialize)]
struct AssessRiskInput {
    profile: RiskProfile,
}

impl Tool for AssessRiskCategoryTool {
    fn name(&self) -> &'static str {
        "assess_risk_category"
    }

    fn description(&self) -> &'static str {
        "Classify a profile (age, health_conditions, occupation) as low, medium, or high risk"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["profile"]
    }

    fn execute(&self, service: &EligibilityService, input: Value) -> Result<Value, ToolError> {
        let input: AssessRiskInput = parse_input(self.name(), input)?;
        Ok(json!(service.assess_risk_category(&input.profile).as_str()))
    }
}

pub struct EstimatePremiumTool;

#[derive(Deserialize)]
struct EstimatePremiumInput {
    insurance_type: String,
    age: u32,
    risk_category: String,
}

impl Tool for EstimatePremiumTool {
    fn name(&self) -> &'static str {
        "estimate_premium"
    }

    fn description(&self) -> &'static str {
        "Estimate the monthly premium (EUR) for an insurance type, age, and risk category"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["insurance_type", "age", "risk_category"]
    }

    fn execute(&self, service: &EligibilityService, input: Value) -> Result<Value, ToolError> {
        let input: EstimatePremiumInput = parse_input(self.name(), input)?;
        let tier: RiskTier = input
            .risk_category
            .parse()
            .map_err(|e| ToolError::invalid_input(self.name(), e))?;

        let premium = service.estimate_premium_for_name(&input.insurance_type, input.age, tier);
        Ok(premium_value(premium))
    }
}

pub struct CheckProviderEligibilityTool;

#[derive(Deserialize)]
struct CheckEligibilityInput {
    provider: String,
    insurance_type: String,
    age: u32,
    risk_category: String,
}

impl Tool for CheckProviderEligibilityTool {
    fn name(&self) -> &'static str {
        "check_provider_eligibility"
    }

    fn description(&self) -> &'static str {
        "Check whether a provider accepts a customer of the given age and risk category for an insurance type"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["provider", "insurance_type", "age", "risk_category"]
    }

    fn execute(&self, service: &EligibilityService, input: Value) -> Result<Value, ToolError> {
        let input: CheckEligibilityInput = parse_input(self.name(), input)?;
        let insurance_type: InsuranceType = input
            .insurance_type
            .parse()
            .map_err(|e| ToolError::invalid_input(self.name(), e))?;
        let tier: RiskTier = input
            .risk_category
            .parse()
            .map_err(|e| ToolError::invalid_input(self.name(), e))?;

        let result = service.check_provider_eligibility(&input.provider, insurance_type, input.age, tier);
        Ok(json!({
            "eligible": result.eligible(),
            "provider": result.provider_code(),
            "insurance_type": result.insurance_type(),
            "reason": result.reason(),
        }))
    }
}

pub struct ListAvailableProvidersTool;

impl Tool for ListAvailableProvidersTool {
    fn name(&self) -> &'static str {
        "list_available_providers"
    }

    fn description(&self) -> &'static str {
        "List the codes of every provider with loaded rules"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &[]
    }

    fn execute(&self, service: &EligibilityService, _input: Value) -> Result<Value, ToolError> {
        Ok(json!(service.list_available_providers()))
    }
}

pub struct GetProviderDetailsTool;

#[derive(Deserialize)]
struct ProviderDetailsInput {
    provider_code: String,
}

impl Tool for GetProviderDetailsTool {
    fn name(&self) -> &'static str {
        "get_provider_details"
    }

    fn description(&self) -> &'static str {
        "Return a provider's full rule document, including every product it offers"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["provider_code"]
    }

    fn execute(&self, service: &EligibilityService, input: Value) -> Result<Value, ToolError> {
        let input: ProviderDetailsInput = parse_input(self.name(), input)?;

        match service.get_provider_details(&input.provider_code) {
            Ok(rule_set) => serde_json::to_value(rule_set).map_err(|e| ToolError::failed(self.name(), e)),
            Err(_) => Ok(json!({
                "error": format!("Provider {} not found", input.provider_code),
                "available_providers": service.list_available_providers(),
            })),
        }
    }
}

pub struct UpdateProviderRulesTool;

#[derive(Deserialize)]
struct UpdateRulesInput {
    provider_code: String,
    product_type: String,
    field: String,
    value: Value,
}

impl Tool for UpdateProviderRulesTool {
    fn name(&self) -> &'static str {
        "update_provider_rules"
    }

    fn description(&self) -> &'static str {
        "Change one field (age_min, age_max, max_risk, base_premium, description) of one provider product"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["provider_code", "product_type", "field", "value"]
    }

    fn execute(&self, service: &EligibilityService, input: Value) -> Result<Value, ToolError> {
        let input: UpdateRulesInput = parse_input(self.name(), input)?;

        let outcome = service.update_provider_rules(
            &input.provider_code,
            &input.product_type,
            &input.field,
            &input.value,
        );

        match outcome {
            Ok(rule_set) => {
                let updated_rules = input
                    .product_type
                    .parse::<InsuranceType>()
                    .ok()
                    .and_then(|t| rule_set.product(t).cloned());
                Ok(json!({
                    "success": true,
                    "message": format!(
                        "Updated {} {} insurance: {} = {}",
                        rule_set.provider_code, input.product_type, input.field, input.value
                    ),
                    "updated_rules": updated_rules,
                }))
            }
            Err(err) => Ok(json!({
                "success": false,
                "message": format!(
                    "Failed to update {} {} insurance",
                    input.provider_code, input.product_type
                ),
                "error": err.to_string(),
            })),
        }
    }
}

pub struct CompareProvidersTool;

#[derive(Deserialize)]
struct CompareInput {
    #[serde(flatten)]
    profile: ProfileRequest,
    as_of: Option<String>,
}

impl Tool for CompareProvidersTool {
    fn name(&self) -> &'static str {
        "compare_providers"
    }

    fn description(&self) -> &'static str {
        "Evaluate a customer profile against every provider, with reasons and premiums"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["birth_date", "health_conditions", "occupation", "insurance_type", "as_of"]
    }

    fn execute(&self, service: &EligibilityService, input: Value) -> Result<Value, ToolError> {
        let input: CompareInput = parse_input(self.name(), input)?;
        let as_of = parse_optional_date(self.name(), input.as_of.as_deref())?;
        let profile =
            CustomerProfile::try_from(input.profile).map_err(|e| ToolError::invalid_input(self.name(), e))?;

        let report = service
            .compare_all(&profile, as_of)
            .map_err(|e| ToolError::invalid_input(self.name(), e))?;
        serde_json::to_value(report).map_err(|e| ToolError::failed(self.name(), e))
    }
}
