//! # dt-redirect
//!
//! Redirects every request to the newest "Discussion Thread" posted by a given
//! account in a Reddit community.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Candidate posts, cached entry, upstream source trait
//! - **Application Layer** ([`application`]) - Thread selection and the TTL cache
//! - **Infrastructure Layer** ([`infrastructure`]) - Reddit OAuth client
//! - **API Layer** ([`api`]) - Redirect handler and middleware
//!
//! ## Behavior
//!
//! - The resolved thread is reused for `CACHE_TTL_SECONDS`
//! - A failed refresh keeps serving the last thread found
//! - Before any thread is found, failures redirect to `FALLBACK_URL`
//! - `/dt/old`, `/dt/stream` and `/dt/compact` select alternative front-ends
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{ResolveError, UpstreamError};
pub use state::AppState;

