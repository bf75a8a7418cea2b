//! Error types for thread resolution.
//!
//! None of these reach the HTTP layer: the resolver turns every failure into a
//! fallback redirect target. They exist so the failure reason can be logged
//! and tested.

/// Failure reported by a [`crate::domain::sources::CandidateSource`].
///
/// The resolver does not distinguish between variants; they are kept apart
/// for log output only.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Upstream authentication failed: {0}")]
    Auth(String),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Reason a resolution pass produced no usable URL.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("No post by '{author}' matching '{title}' in the last {window_hours}h")]
    NoMatch {
        author: String,
        title: String,
        window_hours: i64,
    },
}
