//! Handlers for the inbound HTTP surface.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use log::error;
use serde_json::{Value, json};

use crate::services::sync::SyncPayload;

use super::AppState;

/// `POST /sync-inventory` — validate the payload and run the fan-out.
///
/// Always answers 200 once orchestration ran to completion, independent of
/// per-target outcomes; those are logged. A missing or invalid field (or an
/// unparseable body) answers 400 without touching any store.
pub async fn sync_inventory(
    State(state): State<AppState>,
    payload: Option<Json<SyncPayload>>,
) -> (StatusCode, Json<Value>) {
    let request = match payload.and_then(|Json(body)| body.validate().ok()) {
        Some(request) => request,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing or invalid sku, quantity, or source" })),
            );
        }
    };

    match state.sync.sync(&request).await {
        Ok(_reports) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("Inventory sync attempted for SKU {}", request.sku)
            })),
        ),
        Err(err) => {
            error!("Sync error: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
        }
    }
}

/// `GET /` — liveness probe.
pub async fn liveness() -> &'static str {
    "Inventory Sync Middleware is running"
}
