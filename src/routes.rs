//! Router configuration.
//!
//! # Route Structure
//!
//! - `GET /`         - Redirect to the current thread
//! - `GET /{*path}`  - Same, with the last path segment selecting a site variant
//!
//! Every path is a redirect, so there is no health or API surface here.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_handler))
        .route("/{*path}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
