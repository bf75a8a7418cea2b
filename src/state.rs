//! Shared application state injected into request handlers.

use std::sync::Arc;

use crate::application::services::ThreadCache;
use crate::domain::sources::CandidateSource;

/// Cloneable handle to everything a request needs.
///
/// The thread cache is the only shared mutable state in the service. It is
/// held behind an `Arc` and type-erased over its [`CandidateSource`], so tests
/// can build the same state around a fake upstream.
#[derive(Clone)]
pub struct AppState {
    pub thread_cache: Arc<ThreadCache<dyn CandidateSource>>,
}

impl AppState {
    pub fn new(thread_cache: Arc<ThreadCache<dyn CandidateSource>>) -> Self {
        Self { thread_cache }
    }
}
