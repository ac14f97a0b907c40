use crate::metrics::IssueMetrics;
use crate::types::{AnalysisOutcome, AuditError};

/// A persisted analysis outcome with its storage row id and timestamp.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub created_at: String,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

/// Persistence seam for analysis results and metrics.
///
/// The audit engine never touches storage directly; the batch orchestrator
/// writes each completed outcome through this trait exactly once.
pub trait HistoryStore {
    /// Record one analysis outcome (success or failure).
    fn insert_outcome(&mut self, outcome: &AnalysisOutcome) -> Result<(), AuditError>;

    /// Record aggregate metrics for one analysis.
    fn insert_metrics(&mut self, metrics: &IssueMetrics) -> Result<(), AuditError>;

    /// Page through persisted outcomes, newest first. Pages are 1-based.
    fn recent_outcomes(&self, page: u32, per_page: u32) -> Result<Vec<HistoryEntry>, AuditError>;

    /// Total number of persisted outcomes.
    fn count_outcomes(&self) -> Result<u64, AuditError>;

    /// Most recent metrics rows for a URL, newest first.
    fn metrics_for_url(&self, url: &str, limit: u32) -> Result<Vec<IssueMetrics>, AuditError>;

    /// Distinct URLs that have at least one metrics row.
    fn urls_with_metrics(&self) -> Result<Vec<String>, AuditError>;
}
