//! `cache` crate — the `ViewCache` trait and its implementations.
//!
//! Rendered views are cached under the route that serves them.  Mutations
//! call [`ViewCache::invalidate`] so the next read of that route refetches.

pub mod error;
pub mod memory;
pub mod mock;
pub mod traits;

pub use error::CacheError;
pub use memory::InMemoryViewCache;
pub use traits::ViewCache;
