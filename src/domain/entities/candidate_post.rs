//! Candidate post entity returned by a [`crate::domain::sources::CandidateSource`].

use chrono::{DateTime, Utc};

/// A post summary observed in an upstream listing.
///
/// `author` is `None` when the account was deleted; such posts never match
/// an author filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePost {
    pub author: Option<String>,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl CandidatePost {
    /// Creates a new CandidatePost instance.
    pub fn new(
        author: Option<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author,
            title: title.into(),
            url: url.into(),
            created_at,
        }
    }

    /// Returns true if the post was written by `author`, ignoring ASCII case.
    pub fn is_by(&self, author: &str) -> bool {
        self.author
            .as_deref()
            .is_some_and(|a| a.eq_ignore_ascii_case(author))
    }

    /// Returns true if the title contains `needle`, ignoring case.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}
