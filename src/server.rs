//! HTTP server initialization and runtime setup.
//!
//! Builds the Reddit client, resolver and thread cache once, then serves
//! redirects until a shutdown signal arrives.

use crate::application::services::{ThreadCache, ThreadResolver};
use crate::config::Config;
use crate::domain::sources::CandidateSource;
use crate::infrastructure::reddit::RedditSource;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared application state from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client for Reddit cannot be constructed.
pub fn build_state(config: &Config) -> Result<AppState> {
    let source: Arc<dyn CandidateSource> = Arc::new(
        RedditSource::new(config.credentials.clone(), config.upstream_timeout())
            .context("Failed to build Reddit client")?,
    );
    tracing::info!("Reddit client ready");

    let resolver = ThreadResolver::new(source, config.resolver_settings());
    let cache = ThreadCache::new(resolver, config.cache_ttl());

    Ok(AppState::new(Arc::new(cache)))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The Reddit client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
