#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dt_redirect::application::services::{ResolverSettings, ThreadCache, ThreadResolver};
use dt_redirect::domain::entities::CandidatePost;
use dt_redirect::domain::sources::CandidateSource;
use dt_redirect::error::UpstreamError;
use dt_redirect::state::AppState;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const FALLBACK: &str = "https://www.reddit.com/r/neoliberal";
pub const AUTHOR: &str = "jobautomator";

pub type SearchResult = Result<Vec<CandidatePost>, UpstreamError>;

/// Scripted upstream: pops one queued result per call, repeating the last
/// one once the queue is down to a single entry.
pub struct FakeSource {
    responses: Mutex<VecDeque<SearchResult>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl FakeSource {
    pub fn new(responses: Vec<SearchResult>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateSource for FakeSource {
    async fn search(
        &self,
        _community: &str,
        _query: &str,
        _limit: u32,
    ) -> Result<Vec<CandidatePost>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut responses = self.responses.lock().unwrap();
        let next = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().map(clone_result)
        };
        next.unwrap_or_else(|| Ok(vec![]))
    }
}

fn clone_result(result: &SearchResult) -> SearchResult {
    match result {
        Ok(posts) => Ok(posts.clone()),
        Err(e) => Err(UpstreamError::Transport(e.to_string())),
    }
}

pub fn thread(url: &str, created_at: DateTime<Utc>) -> CandidatePost {
    CandidatePost::new(
        Some(AUTHOR.to_string()),
        "Discussion Thread",
        url,
        created_at,
    )
}

pub fn outage() -> SearchResult {
    Err(UpstreamError::Status {
        status: 503,
        message: "Service Unavailable".to_string(),
    })
}

pub fn settings() -> ResolverSettings {
    ResolverSettings {
        community: "neoliberal".to_string(),
        author: AUTHOR.to_string(),
        title: "Discussion Thread".to_string(),
        recency_window: TimeDelta::hours(36),
        search_limit: 25,
        fallback_url: FALLBACK.to_string(),
    }
}

pub fn create_test_cache(source: Arc<FakeSource>, ttl: TimeDelta) -> ThreadCache<dyn CandidateSource> {
    let source: Arc<dyn CandidateSource> = source;
    ThreadCache::new(ThreadResolver::new(source, settings()), ttl)
}

pub fn create_test_state(source: Arc<FakeSource>) -> AppState {
    AppState::new(Arc::new(create_test_cache(source, TimeDelta::seconds(60))))
}
