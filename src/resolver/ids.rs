use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::cache::{CachedValue, KeyedLocks, StoryCache, best_ids_key};
use crate::model::ItemId;
use crate::upstream::{ItemSource, UpstreamResult};

/// Read-through access to the ranked id list, cached under one fixed key.
pub struct IdResolver<S: ItemSource> {
    source: Arc<S>,
    cache: StoryCache,
    locks: Arc<KeyedLocks>,
    ttl: Duration,
}

impl<S: ItemSource> std::fmt::Debug for IdResolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdResolver")
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<S: ItemSource> IdResolver<S> {
    /// Creates a resolver caching the list for `ttl` in `cache`.
    pub fn new(source: Arc<S>, cache: StoryCache, locks: Arc<KeyedLocks>, ttl: Duration) -> Self {
        Self {
            source,
            cache,
            locks,
            ttl,
        }
    }

    /// Lifetime of the cached id list.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the full id list, best first.
    ///
    /// A cache hit returns the stored list unchanged. On a miss the upstream is
    /// called once; any failure is returned as-is and nothing is cached.
    #[instrument(skip(self))]
    pub async fn best_ids(&self) -> UpstreamResult<Arc<Vec<ItemId>>> {
        let key = best_ids_key();
        if let Some(ids) = self.cached(key) {
            debug!(count = ids.len(), "Id list cache hit");
            return Ok(ids);
        }

        let _guard = self.locks.lock(key).await;
        if let Some(ids) = self.cached(key) {
            debug!(count = ids.len(), "Id list filled by concurrent request");
            return Ok(ids);
        }

        debug!("Id list cache miss, fetching upstream");
        let ids = Arc::new(self.source.best_ids().await?);
        self.cache
            .set(key, CachedValue::Ids(Arc::clone(&ids)), self.ttl);
        debug!(count = ids.len(), "Id list cached");

        Ok(ids)
    }

    fn cached(&self, key: &str) -> Option<Arc<Vec<ItemId>>> {
        let value = self.cache.get(key)?;
        let kind = value.kind();
        let ids = value.into_ids();
        if ids.is_none() {
            warn!(key, kind, "Unexpected cached value kind, treating as miss");
        }
        ids
    }
}
