//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /healthz`  - Liveness probe
//! - `/api/links*`    - Link management API
//! - everything else  - Static dashboard assets, then `GET /{code}` short
//!   link redirect when no file matches
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory served for requests no route matches
///   (`/` resolves to its `index.html`)
pub fn app_router(state: AppState, static_dir: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, static_dir))
}

/// Routes and middleware without path normalization.
///
/// Paths outside `/healthz` and `/api` are looked up in `static_dir` first;
/// only a miss reaches the short link redirect.
pub fn router(state: AppState, static_dir: &str) -> Router {
    let redirects = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state.clone());

    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api", api::routes::link_routes())
        .fallback_service(ServeDir::new(static_dir).fallback(redirects))
        .with_state(state)
        .layer(tracing::layer())
}
