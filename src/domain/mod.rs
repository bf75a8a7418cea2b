//! Domain layer: the data the service reasons about and the upstream contract.
//!
//! # Architecture
//!
//! - [`entities`] - Candidate posts and the cached resolution
//! - [`sources`] - The [`sources::CandidateSource`] trait implemented by upstream clients
//!
//! The domain layer has no dependency on HTTP or on a particular upstream API.
//! Resolution policy lives in [`crate::application::services`].

pub mod entities;
pub mod sources;
