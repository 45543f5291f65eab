//! `MockViewCache` — a test double for `ViewCache`.
//!
//! Records every invalidation it receives and can be told to fail them.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::{CacheError, InMemoryViewCache, ViewCache};

/// Behaviour injected into `MockViewCache` at construction time.
#[derive(Debug, Clone)]
pub enum MockBehaviour {
    /// Behave like a working in-memory cache.
    Working,
    /// Fail every invalidation with `CacheError::Unavailable`.
    FailInvalidate(String),
}

/// A cache that stores entries in memory and records invalidated routes.
#[derive(Debug, Clone)]
pub struct MockViewCache {
    inner: InMemoryViewCache,
    behaviour: MockBehaviour,
    /// Every route passed to `invalidate`, in call order.
    pub invalidations: Arc<Mutex<Vec<String>>>,
}

impl MockViewCache {
    /// A mock whose operations all succeed.
    pub fn working() -> Self {
        Self {
            inner: InMemoryViewCache::new(),
            behaviour: MockBehaviour::Working,
            invalidations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock whose invalidations fail with the given message.
    pub fn failing_invalidate(msg: impl Into<String>) -> Self {
        Self {
            behaviour: MockBehaviour::FailInvalidate(msg.into()),
            ..Self::working()
        }
    }

    /// Routes invalidated so far.
    pub fn invalidated_routes(&self) -> Vec<String> {
        self.invalidations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ViewCache for MockViewCache {
    async fn get(&self, route: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(route).await
    }

    async fn generation(&self, route: &str) -> Result<u64, CacheError> {
        self.inner.generation(route).await
    }

    async fn put(&self, route: &str, body: String, generation: u64) -> Result<bool, CacheError> {
        self.inner.put(route, body, generation).await
    }

    async fn invalidate(&self, route: &str) -> Result<(), CacheError> {
        self.invalidations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.to_owned());

        match &self.behaviour {
            MockBehaviour::Working => self.inner.invalidate(route).await,
            MockBehaviour::FailInvalidate(msg) => Err(CacheError::Unavailable(msg.clone())),
        }
    }
}
