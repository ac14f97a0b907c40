use std::sync::{PoisonError, RwLock};

use lumen_core::config::LumenConfig;
use lumen_core::types::{AuditError, CustomRule, DocumentReport, Issue};
use lumen_dom::Document;

use crate::checks;
use crate::rules::RuleSet;
use crate::style;

/// Core audit engine. Owns the custom rule collection and runs the full
/// battery plus custom rules over one document at a time.
///
/// The engine is constructed once and shared across concurrent analyses.
/// Only the rule collection is shared state, behind a read-mostly lock:
/// evaluations take read guards and run in parallel, rule CRUD takes the
/// write guard. The document under analysis is always a per-call value,
/// never a field on the engine.
pub struct AuditEngine {
    rules: RwLock<RuleSet>,
    config: LumenConfig,
}

impl AuditEngine {
    pub fn new(config: LumenConfig) -> Self {
        Self {
            rules: RwLock::new(RuleSet::new()),
            config,
        }
    }

    pub fn config(&self) -> &LumenConfig {
        &self.config
    }

    /// Audit one document: structural battery, style checks, then custom
    /// rules, aggregated in that fixed order.
    pub fn audit(&self, markup: &str) -> DocumentReport {
        let doc = Document::parse(markup);

        let mut accessibility = checks::run_battery(&doc);
        let styles = style::run_style_checks(&doc, &self.config);

        let custom: Vec<Issue> = self
            .rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .evaluate(&doc);
        accessibility.extend(custom);

        DocumentReport {
            accessibility,
            styles,
        }
    }

    /// Register a custom rule. Rejects duplicate names and malformed
    /// conditions.
    pub fn add_rule(&self, rule: CustomRule) -> Result<(), AuditError> {
        self.rules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(rule)
    }

    /// Remove a custom rule by name. No-op when absent.
    pub fn remove_rule(&self, name: &str) {
        self.rules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    /// Snapshot of the active rules, in registration order.
    pub fn list_rules(&self) -> Vec<CustomRule> {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .list()
    }

    pub fn get_rule(&self, name: &str) -> Option<CustomRule> {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
