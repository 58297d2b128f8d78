//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{code}`  - Short URL redirect, JSON 404 when nothing matches
//! - `GET /health`  - Health check: database and visit queue
//!
//! Every other path answers with the JSON 404 fallback.
//!
//! # Middleware
//!
//! - **Redirect** - Resolves `/{code}` before the 404 handler runs
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, not_found_handler, redirect};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let redirect_routes = Router::new()
        .route("/{code}", get(not_found_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), redirect::layer));

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(redirect_routes)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
