//! HTTP middleware layers.

pub mod tracing;
