//! Upstream source trait definitions.
//!
//! - [`CandidateSource`] - Search listing of candidate posts
//!
//! Implementations live in `crate::infrastructure`. A mock is generated with
//! `mockall` for unit tests.

pub mod candidate_source;

pub use candidate_source::CandidateSource;

#[cfg(test)]
pub use candidate_source::MockCandidateSource;
