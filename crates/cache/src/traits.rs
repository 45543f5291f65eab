//! The `ViewCache` trait — the contract every cache backend must fulfil.

use async_trait::async_trait;

use crate::CacheError;

/// A cache of rendered views keyed by route (e.g. `/dashboard/invoices`).
///
/// Each route carries a generation that [`invalidate`](ViewCache::invalidate)
/// bumps.  A reader takes the generation *before* rendering and hands it back
/// to [`put`](ViewCache::put); if a mutation invalidated the route in
/// between, the stale body is discarded instead of cached.
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Cached body for `route`, if it is present and fresh.
    async fn get(&self, route: &str) -> Result<Option<String>, CacheError>;

    /// Current generation of `route`; `0` for a route never invalidated.
    async fn generation(&self, route: &str) -> Result<u64, CacheError>;

    /// Store `body` for `route` if its generation is still `generation`.
    ///
    /// Returns whether the body was stored.
    async fn put(&self, route: &str, body: String, generation: u64) -> Result<bool, CacheError>;

    /// Mark `route` stale so the next read recomputes it.
    async fn invalidate(&self, route: &str) -> Result<(), CacheError>;
}
