//! Core domain entities.
//!
//! - [`CandidatePost`] - One post observed in an upstream search listing
//! - [`CachedEntry`] - The last successful resolution held by the cache

pub mod cached_entry;
pub mod candidate_post;

pub use cached_entry::CachedEntry;
pub use candidate_post::CandidatePost;
