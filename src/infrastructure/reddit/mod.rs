//! Reddit OAuth API client.
//!
//! - [`RedditSource`] - [`crate::domain::sources::CandidateSource`] backed by subreddit search
//! - [`RedditCredentials`] - Script-app secrets and user agent
//! - [`listing`] - Wire types for the search listing and token endpoints

mod client;
pub mod listing;

pub use client::{RedditCredentials, RedditSource};
