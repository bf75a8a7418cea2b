//! Wire types for Reddit's OAuth token and listing responses.

use chrono::DateTime;
use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::debug;

use crate::domain::entities::CandidatePost;

/// Author name Reddit reports for removed accounts.
const DELETED_AUTHOR: &str = "[deleted]";

/// Response of `POST /api/v1/access_token`.
///
/// Reddit answers some grant failures with `200 OK` and an `error` field,
/// so every field is optional.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
    pub error: Option<String>,
}

/// `Listing` envelope returned by search endpoints.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Child>,
}

/// A listing child. Children that don't decode as submissions are kept as
/// [`Child::Malformed`] so one bad entry doesn't fail the whole listing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Submission(Thing),
    Malformed(IgnoredAny),
}

#[derive(Debug, Deserialize)]
pub struct Thing {
    pub data: Submission,
}

/// The submission fields the resolver cares about.
#[derive(Debug, Deserialize)]
pub struct Submission {
    pub author: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    /// Seconds since the Unix epoch, as a float.
    pub created_utc: Option<f64>,
}

impl Submission {
    /// Converts to a [`CandidatePost`].
    ///
    /// Returns `None` when `title`, `url` or `created_utc` is missing, or the
    /// timestamp is out of range.
    pub fn into_candidate(self) -> Option<CandidatePost> {
        let created_utc = self.created_utc.filter(|t| t.is_finite())?;
        let created_at = DateTime::from_timestamp_millis((created_utc * 1000.0) as i64)?;
        let author = self.author.filter(|a| a != DELETED_AUTHOR && !a.is_empty());

        Some(CandidatePost::new(author, self.title?, self.url?, created_at))
    }
}

impl Listing {
    /// Flattens the listing into candidate posts, preserving upstream order.
    ///
    /// Children that are malformed or miss a required field are skipped.
    pub fn into_candidates(self) -> Vec<CandidatePost> {
        self.data
            .children
            .into_iter()
            .filter_map(|child| {
                let post = match child {
                    Child::Submission(thing) => thing.data.into_candidate(),
                    Child::Malformed(_) => None,
                };
                if post.is_none() {
                    debug!("Skipping undecodable submission");
                }
                post
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_listing_into_candidates() {
        let body = json!({
            "kind": "Listing",
            "data": {
                "after": null,
                "children": [
                    {
                        "kind": "t3",
                        "data": {
                            "author": "jobautomator",
                            "title": "Discussion Thread",
                            "url": "https://www.reddit.com/r/neoliberal/comments/abc/discussion_thread/",
                            "created_utc": 1_760_788_800.0,
                            "score": 12
                        }
                    },
                    {
                        "kind": "t3",
                        "data": {
                            "author": "[deleted]",
                            "title": "Discussion Thread",
                            "url": "https://www.reddit.com/r/neoliberal/comments/def/",
                            "created_utc": 1_760_702_400.5
                        }
                    }
                ]
            }
        });

        let listing: Listing = serde_json::from_value(body).unwrap();
        let posts = listing.into_candidates();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].author.as_deref(), Some("jobautomator"));
        assert_eq!(
            posts[0].created_at,
            Utc.with_ymd_and_hms(2025, 10, 18, 12, 0, 0).unwrap()
        );
        assert_eq!(posts[1].author, None);
        assert_eq!(
            posts[1].url,
            "https://www.reddit.com/r/neoliberal/comments/def/"
        );
    }

    #[test]
    fn test_missing_author_field_is_none() {
        let body = json!({
            "data": {
                "children": [
                    { "data": { "title": "t", "url": "https://x", "created_utc": 0.0 } }
                ]
            }
        });

        let listing: Listing = serde_json::from_value(body).unwrap();
        let posts = listing.into_candidates();

        assert_eq!(posts[0].author, None);
    }

    #[test]
    fn test_empty_listing() {
        let listing: Listing = serde_json::from_value(json!({ "data": {} })).unwrap();

        assert!(listing.into_candidates().is_empty());
    }

    #[test]
    fn test_token_error_body() {
        let token: TokenResponse =
            serde_json::from_value(json!({ "error": "invalid_grant" })).unwrap();

        assert!(token.access_token.is_none());
        assert_eq!(token.error.as_deref(), Some("invalid_grant"));
    }

    #[test]
    fn test_malformed_children_are_skipped() {
        let body = json!({
            "data": {
                "children": [
                    { "data": { "author": "a", "title": null, "url": "https://x", "created_utc": 1.0 } },
                    { "data": { "author": "b", "title": "t", "url": "https://y" } },
                    { "data": { "author": "c", "title": "t", "url": "https://z", "created_utc": "soon" } },
                    { "kind": "more" },
                    { "data": { "author": "d", "title": "Discussion Thread", "url": "https://ok", "created_utc": 2.0 } }
                ]
            }
        });

        let listing: Listing = serde_json::from_value(body).unwrap();
        let posts = listing.into_candidates();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "https://ok");
    }
}
