//! TTL gate in front of the thread resolver.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::resolver::{Resolution, ThreadResolver};
use crate::domain::entities::CachedEntry;
use crate::domain::sources::CandidateSource;

/// Caches the resolved thread URL for `ttl`.
///
/// # States
///
/// - **Cold** (no entry): every call resolves. A fallback outcome is returned
///   to the caller and the cache stays cold, so the next call retries.
/// - **Warm, fresh**: the stored URL is returned without touching upstream.
/// - **Warm, expired**: the resolver runs. A real resolution replaces the
///   entry; a fallback outcome leaves the entry and its timestamp untouched and
///   the stale URL is served instead of the fallback.
///
/// # Concurrency
///
/// The entry sits behind an `RwLock`; cache hits only take the read side.
/// At most one refresh is in flight, guarded by `refresh_gate`:
///
/// - Warm callers that find the gate taken serve the stale URL immediately.
/// - Cold callers wait for the in-flight attempt. If it ended while they
///   waited, they take its outcome (the stored URL or the fallback) instead
///   of calling upstream again.
///
/// The upstream call runs without the entry lock held, and the write-back
/// never replaces an entry stamped later than its own resolution.
pub struct ThreadCache<S: CandidateSource + ?Sized> {
    resolver: ThreadResolver<S>,
    ttl: TimeDelta,
    entry: RwLock<Option<CachedEntry>>,
    refresh_gate: Mutex<()>,
    /// Completed refresh attempts, successful or not.
    attempts: AtomicU64,
}

impl<S: CandidateSource + ?Sized> ThreadCache<S> {
    /// Creates a cold cache.
    pub fn new(resolver: ThreadResolver<S>, ttl: TimeDelta) -> Self {
        Self {
            resolver,
            ttl,
            entry: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Target served while cold and the resolver finds nothing.
    pub fn fallback_url(&self) -> &str {
        &self.resolver.settings().fallback_url
    }

    /// Returns a copy of the stored entry, `None` while cold.
    pub async fn snapshot(&self) -> Option<CachedEntry> {
        self.entry.read().await.clone()
    }

    /// Returns the redirect target as of `now`.
    pub async fn get(&self, now: DateTime<Utc>) -> String {
        let attempts_seen = self.attempts.load(Ordering::Acquire);

        let stale = match self.entry.read().await.as_ref() {
            Some(e) if e.is_fresh(now, self.ttl) => {
                debug!("Cache HIT");
                metrics::counter!("dt_cache_hits_total").increment(1);
                return e.url.clone();
            }
            Some(e) => Some(e.url.clone()),
            None => None,
        };

        let _gate = match stale {
            Some(url) => match self.refresh_gate.try_lock() {
                Ok(gate) => gate,
                Err(_) => {
                    debug!("Refresh in flight, serving stale thread");
                    metrics::counter!("dt_cache_stale_served_total").increment(1);
                    return url;
                }
            },
            None => self.refresh_gate.lock().await,
        };

        if let Some(url) = self.fresh_url(now).await {
            debug!("Cache HIT after waiting for refresh");
            metrics::counter!("dt_cache_hits_total").increment(1);
            return url;
        }

        // An attempt finished while we waited and left nothing fresh behind.
        if self.attempts.load(Ordering::Acquire) != attempts_seen {
            let fallback = Resolution::Fallback(self.fallback_url().to_string());
            return self.store(fallback, now).await;
        }

        info!("Cache MISS, resolving thread");
        metrics::counter!("dt_cache_refreshes_total").increment(1);
        let resolution = self.resolver.resolve(now).await;

        let url = self.store(resolution, now).await;
        self.attempts.fetch_add(1, Ordering::Release);
        url
    }

    async fn fresh_url(&self, now: DateTime<Utc>) -> Option<String> {
        self.entry
            .read()
            .await
            .as_ref()
            .filter(|e| e.is_fresh(now, self.ttl))
            .map(|e| e.url.clone())
    }

    async fn store(&self, resolution: Resolution, now: DateTime<Utc>) -> String {
        let mut entry = self.entry.write().await;

        match (resolution, entry.as_ref()) {
            (Resolution::Found(url), Some(current)) if current.resolved_at > now => {
                debug!(
                    "Discarding resolution from {}, entry from {} is newer",
                    now, current.resolved_at
                );
                url
            }
            (Resolution::Found(url), _) => {
                *entry = Some(CachedEntry::new(url.clone(), now));
                url
            }
            (Resolution::Fallback(_), Some(current)) => {
                warn!(
                    "Refresh failed, serving stale thread resolved at {}",
                    current.resolved_at
                );
                metrics::counter!("dt_cache_stale_served_total").increment(1);
                current.url.clone()
            }
            (Resolution::Fallback(fallback), None) => {
                metrics::counter!("dt_fallback_served_total").increment(1);
                fallback
            }
        }
    }
}
