//! Health / heartbeat endpoint.

use std::sync::Arc;

use axum::routing::get;
use axum::{extract::State, Json, Router};
use serde_json::{json, Value};
use tracing::warn;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health))]
pub struct HealthApi;

/// Register health-check routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Heartbeat endpoint.
///
/// Returns `{"status": "ok", "db": "up", "version": "..."}` with HTTP 200;
/// `status` degrades to `"degraded"` when the database probe fails.
/// Load-balancers and monitoring systems should poll this endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = Value)
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let db = match state.store.ping().await {
        Ok(()) => "up",
        Err(e) => {
            warn!(error = %e, "health probe failed to reach the database");
            "down"
        }
    };
    Json(json!({
        "status":  if db == "up" { "ok" } else { "degraded" },
        "db":      db,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
