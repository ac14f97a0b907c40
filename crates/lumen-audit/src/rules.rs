//! User-defined audit rules: a CSS selector plus a small condition DSL.
//!
//! Conditions are parsed once at registration into a typed form; rule
//! evaluation dispatches over the variants. A rule whose selector fails to
//! parse at evaluation time yields a single "Custom Rule Error" issue and
//! never aborts the remaining rules.

use regex::Regex;

use lumen_core::types::{AuditError, CustomRule, Issue};
use lumen_dom::{Document, Element};

/// Parsed form of the condition DSL.
#[derive(Debug, Clone)]
pub enum Condition {
    /// `exists` — true for every matched element.
    Exists,
    /// `not_exists` — false for every matched element. Matched elements
    /// exist by definition, so this condition can never fire; the literal
    /// semantics are preserved deliberately rather than reinterpreted.
    NotExists,
    /// `has_attr:<name>`
    HasAttr(String),
    /// `attr_equals:<name>=<value>` — exact attribute value match.
    AttrEquals { name: String, value: String },
    /// `contains_text:<substr>` — case-insensitive text search.
    ContainsText(String),
    /// `matches:<regex>` — regex over the element's serialized markup.
    Matches(Regex),
    /// Any unrecognized condition string — evaluates false.
    Never,
}

impl Condition {
    /// Parse a raw condition string. Malformed `matches:` patterns and
    /// incomplete attribute forms are rejected here, at registration,
    /// rather than per-element at evaluation.
    pub fn parse(raw: &str) -> Result<Condition, String> {
        match raw {
            "exists" => return Ok(Condition::Exists),
            "not_exists" => return Ok(Condition::NotExists),
            _ => {}
        }
        if let Some(name) = raw.strip_prefix("has_attr:") {
            if name.is_empty() {
                return Err("has_attr requires an attribute name".to_string());
            }
            return Ok(Condition::HasAttr(name.to_string()));
        }
        if let Some(rest) = raw.strip_prefix("attr_equals:") {
            let Some((name, value)) = rest.split_once('=') else {
                return Err("expected attr_equals:<name>=<value>".to_string());
            };
            if name.is_empty() {
                return Err("attr_equals requires an attribute name".to_string());
            }
            return Ok(Condition::AttrEquals {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        if let Some(text) = raw.strip_prefix("contains_text:") {
            return Ok(Condition::ContainsText(text.to_lowercase()));
        }
        if let Some(pattern) = raw.strip_prefix("matches:") {
            let regex = Regex::new(pattern).map_err(|e| e.to_string())?;
            return Ok(Condition::Matches(regex));
        }
        Ok(Condition::Never)
    }

    /// Evaluate against one matched element.
    pub fn evaluate(&self, element: &Element) -> bool {
        match self {
            Condition::Exists => true,
            Condition::NotExists => false,
            Condition::HasAttr(name) => element.has_attr(name),
            Condition::AttrEquals { name, value } => element.attr(name) == Some(value.as_str()),
            Condition::ContainsText(text) => element.text().to_lowercase().contains(text),
            Condition::Matches(regex) => regex.is_match(&element.outer_html()),
            Condition::Never => false,
        }
    }
}

/// A registered rule with its pre-parsed condition.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: CustomRule,
    condition: Condition,
}

/// The active custom rule collection: insertion-ordered, name-unique.
///
/// Insertion order is evaluation order. Rules are immutable after
/// creation; edits are remove + add.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Rejects duplicate names and malformed conditions.
    pub fn add(&mut self, rule: CustomRule) -> Result<(), AuditError> {
        if self.rules.iter().any(|r| r.rule.name == rule.name) {
            return Err(AuditError::DuplicateRuleName(rule.name));
        }
        let condition =
            Condition::parse(&rule.condition).map_err(|reason| AuditError::InvalidCondition {
                rule: rule.name.clone(),
                reason,
            })?;
        self.rules.push(CompiledRule { rule, condition });
        Ok(())
    }

    /// Remove a rule by name. No-op when absent.
    pub fn remove(&mut self, name: &str) {
        self.rules.retain(|r| r.rule.name != name);
    }

    pub fn get(&self, name: &str) -> Option<&CustomRule> {
        self.rules.iter().map(|r| &r.rule).find(|r| r.name == name)
    }

    /// All rules, in insertion order.
    pub fn list(&self) -> Vec<CustomRule> {
        self.rules.iter().map(|r| r.rule.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against a document, in insertion order.
    pub fn evaluate(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for compiled in &self.rules {
            let elements = match doc.select(&compiled.rule.selector) {
                Ok(elements) => elements,
                Err(e) => {
                    let err = AuditError::InvalidSelector {
                        rule: compiled.rule.name.clone(),
                        reason: e.to_string(),
                    };
                    issues.push(Issue::error(
                        "Custom Rule Error",
                        err.to_string(),
                        "Review and fix the custom rule configuration",
                    ));
                    continue;
                }
            };
            for element in elements {
                if compiled.condition.evaluate(&element) {
                    issues.push(Issue {
                        severity: compiled.rule.severity,
                        category: format!("Custom Rule: {}", compiled.rule.name),
                        message: compiled.rule.message.clone(),
                        recommendation: compiled.rule.recommendation.clone(),
                    });
                }
            }
        }
        issues
    }
}
