//! Rule Storage Test Utilities
//!
//! Provides temporary rule directories populated with provider documents,
//! and ready-made stores and services over them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use domain_eligibility::{EligibilityService, ProviderRuleSet, RuleStore};
use infra_rules::{InMemorySource, JsonDirectorySource};

use crate::fixtures::ProviderFixtures;

/// A rules directory deleted when dropped
pub struct TestRuleDirectory {
    dir: TempDir,
}

impl TestRuleDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Creates a directory holding the four reference providers
    pub fn with_reference_providers() -> Self {
        Self::with_providers(&ProviderFixtures::all())
    }

    pub fn with_providers(rule_sets: &[ProviderRuleSet]) -> Self {
        let dir = Self::new();
        for rule_set in rule_sets {
            dir.write_provider(rule_set);
        }
        dir
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a provider's document
    pub fn document_path(&self, provider_code: &str) -> PathBuf {
        self.dir.path().join(format!("{}.json", provider_code))
    }

    /// Writes a provider as `<code>.json`
    pub fn write_provider(&self, rule_set: &ProviderRuleSet) {
        let contents = rule_set.to_json_pretty().unwrap();
        self.write_raw(&format!("{}.json", rule_set.provider_code), &contents);
    }

    /// Writes arbitrary text under `name`
    pub fn write_raw(&self, name: &str, contents: &str) {
        fs::write(self.dir.path().join(name), contents).unwrap();
    }

    /// Reads a provider's document back as JSON
    pub fn read_document(&self, provider_code: &str) -> Value {
        let text = fs::read_to_string(self.document_path(provider_code)).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    pub fn source(&self) -> JsonDirectorySource {
        JsonDirectorySource::new(self.dir.path())
    }

    /// Opens a store over this directory
    pub fn open_store(&self) -> RuleStore {
        RuleStore::open(self.source()).unwrap()
    }

    pub fn service(&self) -> EligibilityService {
        EligibilityService::new(Arc::new(self.open_store()))
    }
}

impl Default for TestRuleDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an in-memory source holding the given providers
pub fn memory_source(rule_sets: &[ProviderRuleSet]) -> InMemorySource {
    rule_sets.iter().fold(InMemorySource::new(), |source, rule_set| {
        source.with_document(
            format!("{}.json", rule_set.provider_code),
            rule_set.to_json_pretty().unwrap(),
        )
    })
}

/// Creates a loaded in-memory store of the four reference providers
pub fn reference_store() -> RuleStore {
    RuleStore::open(memory_source(&ProviderFixtures::all())).unwrap()
}

/// Creates a service over [`reference_store`]
pub fn reference_service() -> EligibilityService {
    EligibilityService::new(Arc::new(reference_store()))
}
