// Batch runs feeding the history store: accumulation across runs, paging,
// and per-URL metrics trends.

use std::sync::{Arc, Mutex};

use lumen_audit::AuditEngine;
use lumen_core::config::LumenConfig;
use lumen_core::sqlite::SqliteHistoryStore;
use lumen_core::store::HistoryStore;
use lumen_core::types::AuditError;
use lumen_server::batch::{BatchRunner, SharedStore};
use lumen_server::fetch::DocumentFetcher;

use crate::common;

struct CannedFetcher;

impl DocumentFetcher for CannedFetcher {
    fn fetch(&self, url: &str) -> Result<String, AuditError> {
        if url.contains("down") {
            Err(AuditError::Fetch("timed out".to_string()))
        } else if url.contains("broken") {
            Ok(common::broken_page().to_string())
        } else {
            Ok(common::clean_page().to_string())
        }
    }
}

fn runner() -> (BatchRunner, SharedStore) {
    let store: SharedStore = Arc::new(Mutex::new(SqliteHistoryStore::in_memory().unwrap()));
    let runner = BatchRunner::new(
        Arc::new(AuditEngine::new(LumenConfig::default())),
        Arc::clone(&store),
        Arc::new(CannedFetcher),
    );
    (runner, store)
}

#[tokio::test]
async fn outcomes_accumulate_across_runs() {
    let (runner, store) = runner();
    runner.run(vec!["https://clean.example/".to_string()]).await;
    runner
        .run(vec![
            "https://broken.example/".to_string(),
            "https://down.example/".to_string(),
        ])
        .await;

    let store = store.lock().unwrap();
    assert_eq!(store.count_outcomes().unwrap(), 3);

    let page = store.recent_outcomes(1, 10).unwrap();
    assert_eq!(page.len(), 3);
    // Newest first: both second-run URLs precede the first-run one
    assert_eq!(page[2].outcome.url, "https://clean.example/");
}

#[tokio::test]
async fn failed_fetch_is_persisted_with_zeroed_metrics() {
    let (runner, store) = runner();
    runner.run(vec!["https://down.example/".to_string()]).await;

    let store = store.lock().unwrap();
    let page = store.recent_outcomes(1, 10).unwrap();
    assert!(!page[0].outcome.success);
    assert_eq!(page[0].outcome.error_message.as_deref(), Some("Failed to fetch URL content: timed out"));

    let metrics = store.metrics_for_url("https://down.example/", 30).unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].total_issues, 0);
    assert_eq!(metrics[0].error_count, 0);
}

#[tokio::test]
async fn repeated_audits_build_a_metrics_trend() {
    let (runner, store) = runner();
    for _ in 0..3 {
        runner
            .run(vec!["https://broken.example/".to_string()])
            .await;
    }

    let store = store.lock().unwrap();
    let metrics = store.metrics_for_url("https://broken.example/", 30).unwrap();
    assert_eq!(metrics.len(), 3);
    // Same document each time, so the trend is flat
    assert!(metrics.windows(2).all(|w| {
        w[0].total_issues == w[1].total_issues && w[0].error_count == w[1].error_count
    }));
    assert!(metrics[0].total_issues > 0);

    let urls = store.urls_with_metrics().unwrap();
    assert_eq!(urls, vec!["https://broken.example/".to_string()]);
}

#[tokio::test]
async fn recent_outcomes_paginates_by_ten() {
    let (runner, store) = runner();
    for i in 0..12 {
        runner
            .run(vec![format!("https://clean.example/{i}")])
            .await;
    }

    let store = store.lock().unwrap();
    assert_eq!(store.count_outcomes().unwrap(), 12);
    assert_eq!(store.recent_outcomes(1, 10).unwrap().len(), 10);
    assert_eq!(store.recent_outcomes(2, 10).unwrap().len(), 2);
    assert!(store.recent_outcomes(3, 10).unwrap().is_empty());
}
