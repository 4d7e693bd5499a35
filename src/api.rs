//! HTTP routing layer over the snapshot service and alert ledger.
//!
//! Handlers are thin: they call into the core and translate outcomes into
//! JSON. The two load-bearing failures (temperature, process enumeration)
//! surface as an `{"error": ...}` payload instead of a partial snapshot.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::core::alerts::{AlertLedger, AlertRecord, NewAlert, DEFAULT_LIST_LIMIT};
use crate::core::telemetry::{GpuSnapshot, ProcessInfo, SnapshotService};

/// Shared application state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<SnapshotService>,
    pub ledger: Arc<AlertLedger>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/gpu", get(gpu_metrics))
        .route("/api/gpu/processes", get(gpu_processes))
        .route("/api/alerts", post(create_alert).get(list_alerts))
        .with_state(state)
}

/// Success payload or a whole-response error object.
#[derive(Serialize)]
#[serde(untagged)]
enum ApiResponse<T: Serialize> {
    Ok(T),
    Err { error: String },
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn gpu_metrics(State(state): State<AppState>) -> Json<ApiResponse<GpuSnapshot>> {
    match state.snapshot.gpu_metrics().await {
        Ok(snapshot) => Json(ApiResponse::Ok(snapshot)),
        Err(e) => {
            log::warn!("metrics snapshot failed: {e}");
            Json(ApiResponse::Err {
                error: e.to_string(),
            })
        }
    }
}

#[derive(Serialize)]
struct ProcessList {
    processes: Vec<ProcessInfo>,
}

async fn gpu_processes(State(state): State<AppState>) -> Json<ApiResponse<ProcessList>> {
    match state.snapshot.gpu_processes().await {
        Ok(processes) => Json(ApiResponse::Ok(ProcessList { processes })),
        Err(e) => {
            log::warn!("process snapshot failed: {e}");
            Json(ApiResponse::Err {
                error: e.to_string(),
            })
        }
    }
}

#[derive(Serialize)]
struct AlertCreated {
    status: &'static str,
    timestamp: String,
}

async fn create_alert(
    State(state): State<AppState>,
    Json(alert): Json<NewAlert>,
) -> Json<ApiResponse<AlertCreated>> {
    match state.ledger.record(&alert) {
        Ok(timestamp) => Json(ApiResponse::Ok(AlertCreated {
            status: "created",
            timestamp,
        })),
        Err(e) => {
            log::error!("alert insert failed: {e}");
            Json(ApiResponse::Err {
                error: e.to_string(),
            })
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

#[derive(Deserialize)]
struct AlertListQuery {
    #[serde(default = "default_limit")]
    limit: i64,
}

#[derive(Serialize)]
struct AlertList {
    alerts: Vec<AlertRecord>,
}

async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertListQuery>,
) -> Json<ApiResponse<AlertList>> {
    match state.ledger.list(query.limit) {
        Ok(alerts) => Json(ApiResponse::Ok(AlertList { alerts })),
        Err(e) => {
            log::error!("alert query failed: {e}");
            Json(ApiResponse::Err {
                error: e.to_string(),
            })
        }
    }
}
