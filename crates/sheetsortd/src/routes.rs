//! API routes for sheetsortd
//!
//! One request moves through validate -> classify -> route -> write. A
//! classifier fault degrades the post in place and the request still
//! succeeds; only store faults change the HTTP outcome.

use crate::audit;
use crate::server::AppState;
use crate::sheets::{SheetWriter, DATA_HEADER};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use sheetsort_common::{
    normalize, Category, ErrorBody, HealthResponse, ProcessError, ProcessRequest, ProcessResponse,
};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

/// Longest prefix of the original text quoted in a degraded summary.
const DIAGNOSTIC_PREFIX_CHARS: usize = 50;

pub fn process_routes() -> Router<AppStateArc> {
    Router::new().route("/process", post(process_post))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn process_post(
    State(state): State<AppStateArc>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, (StatusCode, Json<ErrorBody>)> {
    if req.text.is_empty() {
        return Err(reject(ProcessError::EmptyText));
    }

    info!("Received post from {}", req.author);

    let result = match state.classifier.classify(&req.author, &req.url, &req.text).await {
        Ok(result) => result,
        Err(e) => {
            // Expected degradation: the post is still filed, under the
            // default category with a diagnostic summary.
            warn!("Classification failed: {}", e);
            let prefix: String = normalize(&req.text)
                .chars()
                .take(DIAGNOSTIC_PREFIX_CHARS)
                .collect();
            sheetsort_common::ClassificationResult {
                summary: format!("Error processing using AI. Raw text: {}...", prefix),
                category: Category::GeneralAi,
                author: req.author.clone(),
            }
        }
    };

    let tab = result.category.worksheet_name();

    let store = match &state.store {
        Some(store) => store.clone(),
        None => {
            // No connection was established at startup. No row, no audit.
            warn!("Spreadsheet not available, rejecting request");
            return Err(reject(ProcessError::StoreUnavailable));
        }
    };

    let row = vec![
        Local::now().format("%Y-%m-%d").to_string(),
        req.url.clone(),
        result.author.clone(),
        result.summary.clone(),
        result.category.as_str().to_string(),
    ];

    if let Err(e) = SheetWriter::append_row(store.as_ref(), tab, &DATA_HEADER, &row).await {
        error!("Sheet write failed: {}", e);
        let err = ProcessError::from(e);
        if err.should_audit() {
            audit::log_failure(store.as_ref(), &req.url, &err.to_string()).await;
        }
        return Err(reject(err));
    }

    info!("Row appended to tab '{}'", tab);

    Ok(Json(ProcessResponse {
        status: "success".to_string(),
        category: result.category.as_str().to_string(),
        summary: result.summary,
        tab: tab.to_string(),
    }))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        sheets_connected: state.store.is_some(),
    })
}

fn reject(err: ProcessError) -> (StatusCode, Json<ErrorBody>) {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorBody {
            detail: err.to_string(),
        }),
    )
}
