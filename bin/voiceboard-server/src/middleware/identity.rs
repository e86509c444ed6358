//! Per-browser identity bootstrap.
//!
//! The frontend sends an opaque per-browser id in the `x-user-id` header.
//! This middleware normalizes the header and upserts a lightweight
//! placeholder user row (`<id>@local`) so task rows can reference it. A
//! database failure here logs a warning and the request continues; the
//! create paths upsert again before inserting rows that carry the foreign
//! key.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::db::UserStore;
use crate::state::AppState;

pub static X_USER_ID: &str = "x-user-id";

/// Extract and normalize the per-browser user id from request headers.
///
/// Literal `"null"` / `"undefined"` values are artifacts of a frontend
/// serialising an unset localStorage key; both mean anonymous.
pub fn user_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(X_USER_ID)?.to_str().ok()?;
    let v = raw.trim();
    if v.is_empty() {
        return None;
    }
    if v.eq_ignore_ascii_case("null") || v.eq_ignore_ascii_case("undefined") {
        return None;
    }
    Some(v.to_owned())
}

pub async fn ensure_user_middleware(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(user_id) = user_id_from_headers(req.headers()) {
        if let Err(e) = state.store.upsert_user(&user_id).await {
            warn!(user_id = %user_id, error = %e, "failed to upsert placeholder user");
        }
    }
    next.run(req).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
