//! Per-URL per-day issue aggregates.
//!
//! Every completed analysis records one metrics row alongside the full
//! outcome. Metrics carry counts only — no document content.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{AnalysisOutcome, Severity};

/// Aggregate issue counts for one URL on one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueMetrics {
    pub url: String,
    /// `YYYY-MM-DD`. An empty date means "today" and is resolved by the
    /// store at insert time.
    #[serde(default)]
    pub date: String,
    pub total_issues: u32,
    pub error_count: u32,
    pub warning_count: u32,
    pub category_counts: HashMap<String, u32>,
}

impl IssueMetrics {
    /// Tally issue counts for a completed outcome. Failed outcomes produce
    /// all-zero metrics.
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        let mut metrics = IssueMetrics {
            url: outcome.url.clone(),
            ..Default::default()
        };
        for issue in outcome.all_issues() {
            metrics.total_issues += 1;
            match issue.severity {
                Severity::Error => metrics.error_count += 1,
                Severity::Warning => metrics.warning_count += 1,
            }
            *metrics
                .category_counts
                .entry(issue.category.clone())
                .or_insert(0) += 1;
        }
        metrics
    }
}
