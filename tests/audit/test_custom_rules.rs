// Custom rule lifecycle through the engine: register, evaluate, remove.

use lumen_audit::AuditEngine;
use lumen_core::config::LumenConfig;
use lumen_core::types::{AuditError, Severity};

use crate::common;

fn engine() -> AuditEngine {
    AuditEngine::new(LumenConfig::default())
}

#[test]
fn registered_rule_fires_on_matching_document() {
    let engine = engine();
    engine.add_rule(common::sample_rule("no-iframes")).unwrap();

    let report = engine.audit("<body><iframe src='ad.html'></iframe></body>");
    let issue = report
        .accessibility
        .iter()
        .find(|i| i.category == "Custom Rule: no-iframes")
        .expect("expected the custom rule to fire");
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.message, "Embedded iframe found");
}

#[test]
fn custom_issues_follow_builtin_checks() {
    let engine = engine();
    engine.add_rule(common::sample_rule("no-iframes")).unwrap();

    // The page has a built-in violation (missing alt) and a rule match.
    let report = engine.audit("<body><img src='x.png'><iframe></iframe></body>");
    let img_pos = report
        .accessibility
        .iter()
        .position(|i| i.category == "Images")
        .unwrap();
    let rule_pos = report
        .accessibility
        .iter()
        .position(|i| i.category.starts_with("Custom Rule:"))
        .unwrap();
    assert!(img_pos < rule_pos);
}

#[test]
fn removed_rule_stops_firing() {
    let engine = engine();
    engine.add_rule(common::sample_rule("no-iframes")).unwrap();
    engine.remove_rule("no-iframes");

    let report = engine.audit("<body><iframe></iframe></body>");
    assert!(!report
        .accessibility
        .iter()
        .any(|i| i.category.starts_with("Custom Rule:")));
    assert!(engine.list_rules().is_empty());
}

#[test]
fn duplicate_registration_is_rejected() {
    let engine = engine();
    engine.add_rule(common::sample_rule("dup")).unwrap();
    let err = engine.add_rule(common::sample_rule("dup")).unwrap_err();
    assert!(matches!(err, AuditError::DuplicateRuleName(_)));
    assert_eq!(engine.list_rules().len(), 1);
}

#[test]
fn rule_with_bad_selector_survives_as_error_issue() {
    let engine = engine();
    let mut rule = common::sample_rule("broken");
    rule.selector = "div[[".to_string();
    engine.add_rule(rule).unwrap();

    let report = engine.audit(common::clean_page());
    let issue = report
        .accessibility
        .iter()
        .find(|i| i.category == "Custom Rule Error")
        .expect("expected a rule error issue");
    assert!(issue.message.contains("broken"));
}
