// JSON wire format of reports, outcomes and metrics.

use lumen_audit::AuditEngine;
use lumen_core::config::LumenConfig;
use lumen_core::metrics::IssueMetrics;
use lumen_core::types::AnalysisOutcome;

use crate::common;

#[test]
fn issue_serializes_severity_under_type_key() {
    let engine = AuditEngine::new(LumenConfig::default());
    let report = engine.audit("<body><img src='x.png'></body>");
    let json = serde_json::to_value(&report).unwrap();

    let issue = &json["accessibility"][0];
    assert_eq!(issue["type"], "error");
    assert!(issue.get("severity").is_none());
    assert!(issue["message"].is_string());
    assert!(issue["recommendation"].is_string());
}

#[test]
fn successful_outcome_omits_error_field() {
    let engine = AuditEngine::new(LumenConfig::default());
    let report = engine.audit(common::broken_page());
    let outcome = AnalysisOutcome::from_report("https://a.example", report);
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["url"], "https://a.example");
    assert!(json.get("error").is_none());
    assert!(json["accessibility"].is_array());
    assert!(json["colors"].is_array());
}

#[test]
fn clean_success_omits_empty_issue_lists() {
    let engine = AuditEngine::new(LumenConfig::default());
    let report = engine.audit(common::clean_page());
    let outcome = AnalysisOutcome::from_report("https://a.example", report);
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["success"], true);
    assert!(json.get("accessibility").is_none());
    assert!(json.get("colors").is_none());
}

#[test]
fn failed_outcome_is_url_success_error_only() {
    let outcome = AnalysisOutcome::failure("https://down.example", "connection refused");
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "connection refused");
    assert!(json.get("accessibility").is_none());
    assert!(json.get("colors").is_none());
    assert_eq!(json.as_object().unwrap().len(), 3);
}

#[test]
fn metrics_aggregate_counts_by_category() {
    let engine = AuditEngine::new(LumenConfig::default());
    let report = engine.audit(common::broken_page());
    let outcome = AnalysisOutcome::from_report("https://a.example", report);
    let metrics = IssueMetrics::from_outcome(&outcome);

    assert_eq!(metrics.url, "https://a.example");
    assert_eq!(
        metrics.total_issues,
        metrics.category_counts.values().sum::<u32>()
    );
    assert_eq!(
        metrics.total_issues,
        metrics.error_count + metrics.warning_count
    );
    assert!(metrics.category_counts["Images"] >= 1);
}

#[test]
fn outcome_round_trips_through_json() {
    let engine = AuditEngine::new(LumenConfig::default());
    let report = engine.audit(common::broken_page());
    let outcome = AnalysisOutcome::from_report("https://a.example", report);

    let json = serde_json::to_string(&outcome).unwrap();
    let back: AnalysisOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(
        serde_json::to_value(&back).unwrap(),
        serde_json::to_value(&outcome).unwrap()
    );
}
