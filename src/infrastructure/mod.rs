//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`reddit`] - Reddit OAuth client implementing [`crate::domain::sources::CandidateSource`]

pub mod reddit;
