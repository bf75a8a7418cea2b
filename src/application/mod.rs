//! Application layer services implementing the redirect policy.
//!
//! Services consume the [`crate::domain::sources::CandidateSource`] trait and
//! expose a single "where should this request go" answer to HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::resolver::ThreadResolver`] - Selects the current thread from candidate posts
//! - [`services::thread_cache::ThreadCache`] - TTL gate with stale-over-fallback semantics

pub mod services;
