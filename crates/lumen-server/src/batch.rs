//! Concurrent batch analysis.
//!
//! Fans a batch of URLs out to a bounded worker pool. Each URL is fetched,
//! audited, and persisted independently: one task's failure never cancels
//! its siblings, and every submitted URL yields exactly one outcome.
//! Results are collected in completion order.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use lumen_audit::AuditEngine;
use lumen_core::metrics::IssueMetrics;
use lumen_core::store::HistoryStore;
use lumen_core::types::AnalysisOutcome;

use crate::fetch::DocumentFetcher;

pub type SharedStore = Arc<Mutex<dyn HistoryStore + Send>>;

/// Runs batches of URL analyses against one shared engine and store.
pub struct BatchRunner {
    engine: Arc<AuditEngine>,
    store: SharedStore,
    fetcher: Arc<dyn DocumentFetcher>,
    permits: Arc<Semaphore>,
}

impl BatchRunner {
    pub fn new(
        engine: Arc<AuditEngine>,
        store: SharedStore,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        let pool_size = engine.config().worker_pool_size();
        Self {
            engine,
            store,
            fetcher,
            permits: Arc::new(Semaphore::new(pool_size)),
        }
    }

    /// Analyze every URL and return one outcome per URL, in completion
    /// order. Each outcome is persisted exactly once before it is
    /// returned.
    pub async fn run(&self, urls: Vec<String>) -> Vec<AnalysisOutcome> {
        let mut tasks = JoinSet::new();
        for url in urls {
            let engine = Arc::clone(&self.engine);
            let fetcher = Arc::clone(&self.fetcher);
            let store = Arc::clone(&self.store);
            let permits = Arc::clone(&self.permits);
            tasks.spawn(async move {
                // Pool admission; the semaphore is never closed.
                let _permit = permits.acquire_owned().await.ok();
                let task_url = url.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    analyze_one(&engine, &*fetcher, &task_url)
                })
                .await
                .unwrap_or_else(|e| {
                    AnalysisOutcome::failure(url.clone(), format!("analysis task failed: {e}"))
                });
                persist(&store, &outcome);
                outcome
            });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                // Spawn-level panics are already converted inside the task;
                // this arm only fires if the outer wrapper itself dies.
                Err(e) => eprintln!("lumen: batch task join error: {e}"),
            }
        }
        outcomes
    }
}

/// Fetch and audit one URL. Fetch failures become failed outcomes with the
/// original error message; they never propagate past the batch boundary.
fn analyze_one(engine: &AuditEngine, fetcher: &dyn DocumentFetcher, url: &str) -> AnalysisOutcome {
    match fetcher.fetch(url) {
        Ok(html) => AnalysisOutcome::from_report(url, engine.audit(&html)),
        Err(e) => AnalysisOutcome::failure(url, e.to_string()),
    }
}

/// Persist one outcome and its metrics. A storage failure is reported but
/// does not invalidate the outcome already produced.
fn persist(store: &SharedStore, outcome: &AnalysisOutcome) {
    let mut store = store.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = store.insert_outcome(outcome) {
        eprintln!("lumen: failed to persist outcome for {}: {}", outcome.url, e);
    }
    if let Err(e) = store.insert_metrics(&IssueMetrics::from_outcome(outcome)) {
        eprintln!("lumen: failed to persist metrics for {}: {}", outcome.url, e);
    }
}
