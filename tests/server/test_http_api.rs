// Full request/response cycles against the router, with a canned fetcher
// standing in for the network.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use lumen_audit::AuditEngine;
use lumen_core::config::LumenConfig;
use lumen_core::sqlite::SqliteHistoryStore;
use lumen_core::types::AuditError;
use lumen_server::batch::{BatchRunner, SharedStore};
use lumen_server::fetch::DocumentFetcher;
use lumen_server::http::router;
use lumen_server::AppState;

use crate::common;

struct CannedFetcher;

impl DocumentFetcher for CannedFetcher {
    fn fetch(&self, url: &str) -> Result<String, AuditError> {
        if url.contains("broken") {
            Ok(common::broken_page().to_string())
        } else if url.contains("down") {
            Err(AuditError::Fetch("connection refused".to_string()))
        } else {
            Ok(common::clean_page().to_string())
        }
    }
}

fn state() -> AppState {
    let engine = Arc::new(AuditEngine::new(LumenConfig::default()));
    let store: SharedStore = Arc::new(Mutex::new(SqliteHistoryStore::in_memory().unwrap()));
    let runner = Arc::new(BatchRunner::new(
        Arc::clone(&engine),
        Arc::clone(&store),
        Arc::new(CannedFetcher),
    ));
    AppState {
        engine,
        store,
        runner,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_version() {
    let resp = router(state()).oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn analyze_returns_one_outcome_per_url() {
    let resp = router(state())
        .oneshot(post_json(
            "/analyze",
            serde_json::json!({ "urls": [
                "https://clean.example/",
                "https://broken.example/",
                "https://down.example/"
            ]}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let outcomes = body_json(resp).await;
    let outcomes = outcomes.as_array().unwrap();
    assert_eq!(outcomes.len(), 3);

    let clean = outcomes
        .iter()
        .find(|o| o["url"] == "https://clean.example/")
        .unwrap();
    assert_eq!(clean["success"], true);
    // Empty issue lists are omitted from the wire shape
    assert!(clean.get("accessibility").is_none());

    let broken = outcomes
        .iter()
        .find(|o| o["url"] == "https://broken.example/")
        .unwrap();
    assert_eq!(broken["success"], true);
    assert!(!broken["accessibility"].as_array().unwrap().is_empty());

    let down = outcomes
        .iter()
        .find(|o| o["url"] == "https://down.example/")
        .unwrap();
    assert_eq!(down["success"], false);
    assert!(down["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn analyze_persists_history_and_metrics() {
    let state = state();
    router(state.clone())
        .oneshot(post_json(
            "/analyze",
            serde_json::json!({ "urls": ["https://broken.example/"] }),
        ))
        .await
        .unwrap();

    let resp = router(state.clone()).oneshot(get("/history")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["page"], 1);
    assert_eq!(json["per_page"], 10);
    assert_eq!(json["entries"][0]["url"], "https://broken.example/");

    let resp = router(state.clone()).oneshot(get("/metrics")).await.unwrap();
    let urls = body_json(resp).await;
    assert_eq!(urls.as_array().unwrap().len(), 1);

    let resp = router(state)
        .oneshot(get("/metrics/https://broken.example/"))
        .await
        .unwrap();
    let metrics = body_json(resp).await;
    let entry = &metrics.as_array().unwrap()[0];
    assert!(entry["total_issues"].as_u64().unwrap() > 0);
    assert!(!entry["date"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn history_pages_are_newest_first() {
    let state = state();
    for host in ["one", "two", "three"] {
        router(state.clone())
            .oneshot(post_json(
                "/analyze",
                serde_json::json!({ "urls": [format!("https://{host}.example/")] }),
            ))
            .await
            .unwrap();
    }

    let resp = router(state).oneshot(get("/history?page=1")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["entries"][0]["url"], "https://three.example/");
    assert_eq!(json["entries"][2]["url"], "https://one.example/");
}

#[tokio::test]
async fn history_with_huge_page_number_returns_empty_page() {
    let state = state();
    router(state.clone())
        .oneshot(post_json(
            "/analyze",
            serde_json::json!({ "urls": ["https://clean.example/"] }),
        ))
        .await
        .unwrap();

    let resp = router(state)
        .oneshot(get("/history?page=4294967295"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rules_registered_over_http_affect_analysis() {
    let state = state();
    let rule = serde_json::json!({
        "name": "skip-link-text",
        "description": "skip links must name their target",
        "selector": "a",
        "condition": "contains_text:skip",
        "message": "Skip link present",
        "recommendation": "none needed",
        "severity": "warning"
    });
    let resp = router(state.clone())
        .oneshot(post_json("/rules", rule))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = router(state)
        .oneshot(post_json(
            "/analyze",
            serde_json::json!({ "urls": ["https://clean.example/"] }),
        ))
        .await
        .unwrap();
    let outcomes = body_json(resp).await;
    let issues = outcomes[0]["accessibility"].as_array().unwrap();
    assert!(issues
        .iter()
        .any(|i| i["message"] == "Skip link present" && i["type"] == "warning"));
}

#[tokio::test]
async fn metrics_for_unknown_url_is_empty_list() {
    let resp = router(state())
        .oneshot(get("/metrics/https://nowhere.example/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}
