//! Provider rule store
//!
//! The store owns the authoritative mapping from provider code to rule
//! document. Readers take an immutable [`RuleCatalog`] snapshot; writers
//! build a complete replacement catalog, validate it, and publish it with a
//! single pointer swap. A reader therefore observes either the old or the
//! new rules, never a mix, and a failed load or update leaves the previous
//! catalog in effect.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_eligibility::RuleStore;
//! use infra_rules::JsonDirectorySource;
//!
//! let store = RuleStore::open(JsonDirectorySource::new("data/providers"))?;
//! let generali = store.get("generali")?;
//! store.update("generali", "life", "age_max", &json!(75))?;
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde_json::Value;

use core_kernel::{ProviderCode, Timezone};

use crate::error::EligibilityError;
use crate::insurance::InsuranceType;
use crate::ports::{RuleDocument, RuleSource};
use crate::rules::{ProductRules, ProviderRuleSet, RuleField};

/// Immutable view of every loaded provider, ordered by provider code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleCatalog {
    providers: BTreeMap<ProviderCode, ProviderRuleSet>,
    /// Storage name each provider was read from; updates write back to it
    documents: BTreeMap<ProviderCode, String>,
}

impl RuleCatalog {
    /// Builds a catalog from raw documents, validating each one
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationLoad` naming the first document that fails to
    /// parse or validate, or that repeats an earlier provider code.
    pub fn from_documents(documents: Vec<RuleDocument>) -> Result<Self, EligibilityError> {
        let mut providers = BTreeMap::new();
        let mut names = BTreeMap::new();

        for document in documents {
            let rule_set = ProviderRuleSet::from_json(&document.contents)
                .map_err(|e| EligibilityError::load(&document.name, error_reason(e)))?;
            rule_set
                .validate()
                .map_err(|e| EligibilityError::load(&document.name, error_reason(e)))?;

            let code = rule_set.provider_code.clone();
            if providers.insert(code.clone(), rule_set).is_some() {
                return Err(EligibilityError::load(
                    &document.name,
                    format!("duplicate provider_code '{}'", code),
                ));
            }
            names.insert(code, document.name);
        }

        Ok(Self {
            providers,
            documents: names,
        })
    }

    /// Builds a catalog from already constructed rule sets, each stored as
    /// `<provider_code>.json`
    pub fn from_rule_sets(rule_sets: impl IntoIterator<Item = ProviderRuleSet>) -> Self {
        let providers: BTreeMap<ProviderCode, ProviderRuleSet> = rule_sets
            .into_iter()
            .map(|r| (r.provider_code.clone(), r))
            .collect();
        let documents = providers
            .keys()
            .map(|code| (code.clone(), default_document_name(code)))
            .collect();
        Self {
            providers,
            documents,
        }
    }

    pub fn get(&self, code: &ProviderCode) -> Option<&ProviderRuleSet> {
        self.providers.get(code)
    }

    /// Storage name of a provider's document
    pub fn document_name(&self, code: &ProviderCode) -> String {
        self.documents
            .get(code)
            .cloned()
            .unwrap_or_else(|| default_document_name(code))
    }

    /// Looks up a provider by raw, unnormalised code
    pub fn find(&self, raw_code: &str) -> Option<&ProviderRuleSet> {
        ProviderCode::new(raw_code)
            .ok()
            .and_then(|code| self.providers.get(&code))
    }

    /// Provider codes in ascending order
    pub fn codes(&self) -> Vec<ProviderCode> {
        self.providers.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProviderCode, &ProviderRuleSet)> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn with_rule_set(&self, rule_set: ProviderRuleSet) -> Self {
        let mut providers = self.providers.clone();
        providers.insert(rule_set.provider_code.clone(), rule_set);
        Self {
            providers,
            documents: self.documents.clone(),
        }
    }
}

fn default_document_name(code: &ProviderCode) -> String {
    format!("{}.json", code)
}

// Strip the variant prefix so load errors read "<document>: <reason>"
fn error_reason(err: EligibilityError) -> String {
    match err {
        EligibilityError::Validation(reason) => reason,
        other => other.to_string(),
    }
}

/// Shared, reloadable store of provider rules
pub struct RuleStore {
    source: Box<dyn RuleSource>,
    catalog: RwLock<Arc<RuleCatalog>>,
    /// Serialises writers so an update cannot be lost to a concurrent reload
    writer: Mutex<()>,
    timezone: Timezone,
}

impl RuleStore {
    /// Creates an empty store backed by `source`; call [`RuleStore::load_all`]
    pub fn new(source: impl RuleSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            catalog: RwLock::new(Arc::new(RuleCatalog::default())),
            writer: Mutex::new(()),
            timezone: Timezone::default(),
        }
    }

    /// Sets the timezone used to stamp `last_updated` on writes
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Creates a store and performs the initial load
    pub fn open(source: impl RuleSource + 'static) -> Result<Self, EligibilityError> {
        let store = Self::new(source);
        store.load_all()?;
        Ok(store)
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Reads, validates, and publishes every rule document
    ///
    /// Returns the number of providers loaded.
    ///
    /// # Errors
    ///
    /// * `Storage` if the source cannot be read
    /// * `ConfigurationLoad` if any document is invalid, or none exist
    ///
    /// On error the previously published catalog stays in effect.
    pub fn load_all(&self) -> Result<usize, EligibilityError> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let documents = self.source.read_documents()?;
        if documents.is_empty() {
            return Err(EligibilityError::load(
                self.source.location(),
                "no provider rule documents found",
            ));
        }

        let catalog = match RuleCatalog::from_documents(documents) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(location = %self.source.location(), error = %err, "Rule load rejected");
                return Err(err);
            }
        };
        let count = catalog.len();
        self.publish(catalog);

        tracing::info!(location = %self.source.location(), providers = count, "Provider rules loaded");
        Ok(count)
    }

    /// Re-reads all documents; the current rules remain authoritative until
    /// the new load fully succeeds
    pub fn reload(&self) -> Result<usize, EligibilityError> {
        tracing::info!(location = %self.source.location(), "Reloading provider rules");
        self.load_all()
    }

    /// Returns the current catalog snapshot
    pub fn snapshot(&self) -> Arc<RuleCatalog> {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&catalog)
    }

    /// Returns the rule set of one provider
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown provider code
    pub fn get(&self, provider_code: &str) -> Result<ProviderRuleSet, EligibilityError> {
        self.snapshot()
            .find(provider_code)
            .cloned()
            .ok_or_else(|| EligibilityError::not_found(format!("Unknown provider '{}'", provider_code)))
    }

    /// Returns the rules of one product of one provider
    pub fn get_product_rules(
        &self,
        provider_code: &str,
        insurance_type: InsuranceType,
    ) -> Result<ProductRules, EligibilityError> {
        let rule_set = self.get(provider_code)?;
        rule_set.product(insurance_type).cloned().ok_or_else(|| {
            EligibilityError::not_found(format!(
                "Provider '{}' does not offer {} insurance",
                rule_set.provider_code, insurance_type
            ))
        })
    }

    /// Returns all provider codes in ascending order
    pub fn list_codes(&self) -> Vec<ProviderCode> {
        self.snapshot().codes()
    }

    /// Changes one field of one product of one provider
    ///
    /// The modified document is validated, written to the source, and only
    /// then published. Returns the updated rule set.
    ///
    /// # Errors
    ///
    /// * `Validation` for an unknown field, a mistyped value, or a value that
    ///   breaks a document invariant (e.g. `age_min > age_max`)
    /// * `NotFound` for an unknown provider, or a product the provider does
    ///   not offer or that does not exist at all
    /// * `Storage` if the document cannot be written
    ///
    /// State is unchanged whenever an error is returned.
    pub fn update(
        &self,
        provider_code: &str,
        product: &str,
        field: &str,
        value: &Value,
    ) -> Result<ProviderRuleSet, EligibilityError> {
        let insurance_type: InsuranceType = product
            .parse()
            .map_err(|_| EligibilityError::not_found(format!("Unknown product '{}'", product)))?;
        let field: RuleField = field.parse()?;

        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.snapshot();

        let mut rule_set = current
            .find(provider_code)
            .cloned()
            .ok_or_else(|| EligibilityError::not_found(format!("Unknown provider '{}'", provider_code)))?;

        rule_set.apply_update(insurance_type, field, value)?;
        rule_set.validate()?;
        rule_set.last_updated = Some(self.timezone.today());

        let document = RuleDocument::new(
            current.document_name(&rule_set.provider_code),
            rule_set.to_json_pretty()?,
        );
        self.source.write_document(&document)?;
        self.publish(current.with_rule_set(rule_set.clone()));

        tracing::info!(
            provider = %rule_set.provider_code,
            product = %insurance_type,
            field = %field,
            value = %value,
            "Provider rules updated"
        );
        Ok(rule_set)
    }

    fn publish(&self, catalog: RuleCatalog) {
        let mut slot = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::new(catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SourceError;
    use std::sync::Mutex as StdMutex;

    /// Minimal in-crate source; the real adapters live in infra_rules
    #[derive(Default)]
    struct VecSource {
        documents: StdMutex<Vec<RuleDocument>>,
    }

    impl VecSource {
        fn with(documents: Vec<RuleDocument>) -> Self {
            Self {
                documents: StdMutex::new(documents),
            }
        }
    }

    impl RuleSource for VecSource {
        fn location(&self) -> String {
            "memory".to_string()
        }

        fn read_documents(&self) -> Result<Vec<RuleDocument>, SourceError> {
            Ok(self.documents.lock().unwrap().clone())
        }

        fn write_document(&self, document: &RuleDocument) -> Result<(), SourceError> {
            let mut docs = self.documents.lock().unwrap();
            docs.retain(|d| d.name != document.name);
            docs.push(document.clone());
            Ok(())
        }
    }

    fn doc(code: &str, age_min: u32, age_max: u32) -> RuleDocument {
        RuleDocument::new(
            format!("{}.json", code),
            format!(
                r#"{{"provider_name": "{code}", "provider_code": "{code}", "country": "IT",
                    "products": {{"life": {{"age_min": {age_min}, "age_max": {age_max},
                    "max_risk": "medium", "base_premium": 45}}}}}}"#
            ),
        )
    }

    #[test]
    fn test_codes_are_sorted() {
        let store = RuleStore::open(VecSource::with(vec![doc("zurich", 18, 70), doc("axa", 18, 70)])).unwrap();
        let codes: Vec<String> = store.list_codes().into_iter().map(String::from).collect();
        assert_eq!(codes, vec!["axa", "zurich"]);
    }

    #[test]
    fn test_invalid_document_fails_whole_load() {
        let store = RuleStore::new(VecSource::with(vec![doc("axa", 18, 70), doc("bad", 80, 70)]));
        let err = store.load_all().unwrap_err();
        match err {
            EligibilityError::ConfigurationLoad { document, reason } => {
                assert_eq!(document, "bad.json");
                assert!(reason.contains("age_min 80 exceeds age_max 70"));
            }
            other => panic!("Expected ConfigurationLoad, got {other:?}"),
        }
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_empty_source_fails_load() {
        let store = RuleStore::new(VecSource::default());
        assert!(matches!(store.load_all(), Err(EligibilityError::ConfigurationLoad { .. })));
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let mut second = doc("axa", 18, 70);
        second.name = "axa-copy.json".to_string();
        let result = RuleStore::open(VecSource::with(vec![doc("axa", 18, 70), second]));
        assert!(matches!(result, Err(EligibilityError::ConfigurationLoad { .. })));
    }

    #[test]
    fn test_snapshot_survives_update() {
        let store = RuleStore::open(VecSource::with(vec![doc("axa", 18, 70)])).unwrap();
        let before = store.snapshot();

        store.update("axa", "life", "age_max", &serde_json::json!(75)).unwrap();

        assert_eq!(before.find("axa").unwrap().product(InsuranceType::Life).unwrap().age_max, 70);
        assert_eq!(store.get_product_rules("axa", InsuranceType::Life).unwrap().age_max, 75);
    }

    #[test]
    fn test_update_writes_back_to_source_document() {
        let mut renamed = doc("axa", 18, 70);
        renamed.name = "axa_rules_2025.json".to_string();
        let store = RuleStore::open(VecSource::with(vec![renamed])).unwrap();
        assert_eq!(
            store.snapshot().document_name(&ProviderCode::new("axa").unwrap()),
            "axa_rules_2025.json"
        );

        store.update("axa", "life", "age_max", &serde_json::json!(75)).unwrap();

        assert_eq!(store.reload().unwrap(), 1);
        assert_eq!(store.get_product_rules("axa", InsuranceType::Life).unwrap().age_max, 75);
    }
}
