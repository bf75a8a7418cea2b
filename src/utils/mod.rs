//! Utility functions used by request handlers.
//!
//! - [`path_rewrite`] - Presentation variants of the resolved thread URL

pub mod path_rewrite;
