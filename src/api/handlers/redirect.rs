//! Handler for the thread redirect.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header},
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{debug, warn};

use crate::state::AppState;
use crate::utils::path_rewrite::rewrite;

/// Redirects to the current discussion thread.
///
/// # Endpoint
///
/// `GET /` and `GET /{*path}`
///
/// # Request Flow
///
/// 1. Ask the thread cache for the current URL (may refresh from upstream)
/// 2. Rewrite it for the site variant named by the request path
/// 3. Return 302 Found with the `Location` header set
///
/// # Failure Handling
///
/// There is no error response. Upstream failures surface as the stale cached
/// thread or, before any thread was ever found, as the fallback URL.
pub async fn redirect_handler(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    let cache = &state.thread_cache;
    let resolved = cache.get(Utc::now()).await;
    let target = rewrite(&resolved, uri.path());

    debug!("Redirecting {} -> {}", uri.path(), target);

    (
        StatusCode::FOUND,
        [(header::LOCATION, location(&target, cache.fallback_url()))],
    )
}

/// Builds the `Location` value, falling back when `url` is not a valid header.
fn location(url: &str, fallback: &str) -> HeaderValue {
    HeaderValue::try_from(url)
        .or_else(|e| {
            warn!("Resolved URL is not a valid Location header ({}): {:?}", e, url);
            HeaderValue::try_from(fallback)
        })
        .unwrap_or_else(|_| HeaderValue::from_static("/"))
}
