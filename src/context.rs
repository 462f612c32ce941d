//! Run-scoped state shared by service extraction and collection assembly.

use crate::config::GeneratorConfig;
use crate::error::ExtractError;
use crate::extractor::model::extract_model_file;
use crate::extractor::{Extraction, ModelFact};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::PathBuf;

/// Model facts keyed by type name.
///
/// Names keep the position they were first registered at; re-registering a
/// name replaces its fact (later wins). Iteration follows registration order,
/// which decides body-model matching when several names could match.
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelFact>,
    index: HashMap<String, usize>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, fact: ModelFact) {
        match self.index.get(&fact.name) {
            Some(&idx) => {
                debug!("Model {} redefined, keeping the later definition", fact.name);
                self.models[idx] = fact;
            }
            None => {
                self.index.insert(fact.name.clone(), self.models.len());
                self.models.push(fact);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ModelFact> {
        self.index.get(name).map(|&idx| &self.models[idx])
    }

    /// Model names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Extracts every model file and registers the ones that yield a fact.
    ///
    /// Returns the number of files skipped.
    pub fn register_files(&mut self, paths: &[PathBuf]) -> usize {
        let mut skipped = 0;
        for path in paths {
            match extract_model_file(path) {
                Extraction::Parsed(fact) => self.insert(fact),
                other => {
                    // Most candidates without a public type are ordinary sources.
                    match other.reason() {
                        Some(reason @ ExtractError::Unreadable { .. }) => warn!("{}", reason),
                        Some(reason) => debug!("Skipping model candidate: {}", reason),
                        None => {}
                    }
                    skipped += 1;
                }
            }
        }
        skipped
    }
}

/// Configuration and model table for one generator run.
///
/// Built once before any service is processed, then only borrowed.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: GeneratorConfig,
    pub models: ModelRegistry,
}

impl RunContext {
    pub fn new(config: GeneratorConfig, models: ModelRegistry) -> Self {
        Self { config, models }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::FieldFact;
    use std::fs;
    use tempfile::TempDir;

    fn model(name: &str, field: &str) -> ModelFact {
        ModelFact {
            name: name.to_string(),
            fields: vec![FieldFact {
                name: field.to_string(),
                declared_type: "String".to_string(),
            }],
        }
    }

    #[test]
    fn test_later_definition_wins_in_first_position() {
        let mut registry = ModelRegistry::new();
        registry.insert(model("Order", "a"));
        registry.insert(model("Item", "b"));
        registry.insert(model("Order", "c"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Order").unwrap().fields[0].name, "c");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Order", "Item"]);
    }

    #[test]
    fn test_register_files_counts_skips() {
        let temp_dir = TempDir::new().unwrap();
        let order = temp_dir.path().join("Order.java");
        let info = temp_dir.path().join("package-info.java");
        fs::write(&order, "public class Order { private Long id; }").unwrap();
        fs::write(&info, "package com.example;").unwrap();

        let mut registry = ModelRegistry::new();
        let skipped = registry.register_files(&[order, info]);

        assert_eq!(skipped, 1);
        assert!(registry.get("Order").is_some());
        assert!(!registry.is_empty());
    }
}
