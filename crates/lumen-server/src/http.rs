use std::sync::{Arc, PoisonError};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use lumen_core::metrics::IssueMetrics;
use lumen_core::store::{HistoryEntry, HistoryStore};
use lumen_core::types::{AnalysisOutcome, AuditError, CustomRule};

use crate::AppState;

/// Build the axum router with all lumen HTTP endpoints.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/rules", get(list_rules).post(create_rule))
        .route("/rules/{name}", delete(delete_rule))
        .route("/history", get(history))
        .route("/metrics", get(metric_urls))
        .route("/metrics/{*url}", get(url_metrics))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the given port.
pub async fn serve(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// --- Request / Response types ---

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub urls: Vec<String>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// --- Handlers ---

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Batch analysis. URL-count and URL-syntax validation happens here,
/// before any fetch or audit work starts.
async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Vec<AnalysisOutcome>>, ApiError> {
    let urls: Vec<String> = req
        .urls
        .iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();

    if urls.is_empty() {
        return Err(bad_request("No URLs provided"));
    }
    let max_urls = state.engine.config().batch.max_urls;
    if urls.len() > max_urls {
        return Err(bad_request(format!("Maximum {} URLs allowed", max_urls)));
    }
    for url in &urls {
        if !is_valid_url(url) {
            return Err(bad_request(format!("Invalid URL format: {}", url)));
        }
    }

    Ok(Json(state.runner.run(urls).await))
}

/// Minimal scheme-and-host validation, enforced before the core runs.
fn is_valid_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split('/').next().unwrap_or("");
            !host.is_empty()
        }
        None => false,
    }
}

async fn list_rules(State(state): State<AppState>) -> Json<Vec<CustomRule>> {
    Json(state.engine.list_rules())
}

async fn create_rule(
    State(state): State<AppState>,
    Json(rule): Json<CustomRule>,
) -> Result<(StatusCode, Json<CustomRule>), ApiError> {
    validate_rule_fields(&rule).map_err(|e| bad_request(e.to_string()))?;
    state
        .engine
        .add_rule(rule.clone())
        .map_err(|e| bad_request(e.to_string()))?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// Required-field validation, applied before the rule reaches the engine.
fn validate_rule_fields(rule: &CustomRule) -> Result<(), AuditError> {
    let fields = [
        ("name", &rule.name),
        ("description", &rule.description),
        ("selector", &rule.selector),
        ("condition", &rule.condition),
        ("message", &rule.message),
        ("recommendation", &rule.recommendation),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(AuditError::Validation(format!(
                "Missing required field: {}",
                name
            )));
        }
    }
    Ok(())
}

async fn delete_rule(State(state): State<AppState>, Path(name): Path<String>) -> StatusCode {
    // Removing an absent rule is a no-op, same as the engine contract.
    state.engine.remove_rule(&name);
    StatusCode::NO_CONTENT
}

async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    const PER_PAGE: u32 = 10;
    let page = query.page.unwrap_or(1).max(1);
    let store = state.store.lock().unwrap_or_else(PoisonError::into_inner);
    let entries = store
        .recent_outcomes(page, PER_PAGE)
        .map_err(internal_error)?;
    let total = store.count_outcomes().map_err(internal_error)?;
    Ok(Json(HistoryResponse {
        page,
        per_page: PER_PAGE,
        total,
        entries,
    }))
}

async fn metric_urls(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let store = state.store.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(Json(store.urls_with_metrics().map_err(internal_error)?))
}

async fn url_metrics(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> Result<Json<Vec<IssueMetrics>>, ApiError> {
    let store = state.store.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(Json(
        store.metrics_for_url(&url, 30).map_err(internal_error)?,
    ))
}

fn internal_error(e: AuditError) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
