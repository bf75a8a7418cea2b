//! Business logic services for the application layer.

pub mod resolver;
pub mod thread_cache;

pub use resolver::{Resolution, ResolverSettings, ThreadResolver, select_latest};
pub use thread_cache::ThreadCache;
