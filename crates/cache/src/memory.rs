//! In-process view cache backed by `DashMap`.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::{CacheError, ViewCache};

/// Per-route cache slot.  The generation survives invalidation; the body
/// does not.
#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    body: Option<String>,
}

/// Thread-safe in-memory view cache.
///
/// Cloning is cheap and every clone shares the same entries, so one instance
/// can be handed to both the read path and the mutation pipeline.
#[derive(Debug, Clone, Default)]
pub struct InMemoryViewCache {
    slots: Arc<DashMap<String, Slot>>,
}

impl InMemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of routes holding a cached body.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.body.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ViewCache for InMemoryViewCache {
    async fn get(&self, route: &str) -> Result<Option<String>, CacheError> {
        Ok(self.slots.get(route).and_then(|slot| slot.body.clone()))
    }

    async fn generation(&self, route: &str) -> Result<u64, CacheError> {
        Ok(self.slots.get(route).map_or(0, |slot| slot.generation))
    }

    async fn put(&self, route: &str, body: String, generation: u64) -> Result<bool, CacheError> {
        // The entry guard holds the shard lock, so the check and the write
        // cannot interleave with an invalidate.
        let mut slot = self.slots.entry(route.to_owned()).or_default();
        if slot.generation != generation {
            debug!(route, seen = generation, current = slot.generation, "discarding stale view");
            return Ok(false);
        }
        slot.body = Some(body);
        Ok(true)
    }

    async fn invalidate(&self, route: &str) -> Result<(), CacheError> {
        let mut slot = self.slots.entry(route.to_owned()).or_default();
        slot.generation += 1;
        let removed = slot.body.take().is_some();
        debug!(route, removed, generation = slot.generation, "view invalidated");
        Ok(())
    }
}
