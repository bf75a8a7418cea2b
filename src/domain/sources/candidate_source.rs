//! Source trait for candidate posts.

use crate::domain::entities::CandidatePost;
use crate::error::UpstreamError;
use async_trait::async_trait;

/// Interface to the upstream search listing.
///
/// # Implementations
///
/// - [`crate::infrastructure::reddit::RedditSource`] - Reddit OAuth API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Searches `community` for posts matching `query`.
    ///
    /// Results are newest-first on a best-effort basis and hold at most
    /// `limit` posts. Implementations must not retry; one call is one
    /// upstream round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on any transport, status, auth or decode failure.
    async fn search(
        &self,
        community: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CandidatePost>, UpstreamError>;
}
