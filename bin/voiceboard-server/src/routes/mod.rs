//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, security headers, per-request trace-ID
//!   injection, per-browser identity bootstrap)
//! - Optional Swagger UI / OpenAPI spec endpoint (disable with
//!   `VOICEBOARD_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - `/api` task and voice-note routes

pub mod doc;
mod health;
mod tasks;
mod voice;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::middleware;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, identity, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let api_router = Router::new().merge(health::router()).nest(
        "/api",
        Router::new().merge(tasks::router()).merge(voice::router()),
    );

    let mut app = Router::new().merge(api_router);

    // Enabled by default; disable with VOICEBOARD_ENABLE_SWAGGER=false in
    // production to avoid exposing the API structure to potential attackers.
    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace::trace_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identity::ensure_user_middleware,
        ))
        .with_state(state)
}
