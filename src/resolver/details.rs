use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

use crate::cache::{CachedValue, KeyedLocks, StoryCache, item_key};
use crate::model::{ItemDetail, ItemId};
use crate::upstream::{ItemSource, UpstreamError};

/// Per-id result of [`DetailResolver::details`].
#[derive(Debug)]
pub enum DetailOutcome {
    /// The detail was served from cache or fetched.
    Resolved(ItemDetail),
    /// The upstream call failed; nothing was cached.
    Failed { id: ItemId, reason: UpstreamError },
}

impl DetailOutcome {
    /// Returns `true` for [`DetailOutcome::Resolved`].
    pub fn is_resolved(&self) -> bool {
        matches!(self, DetailOutcome::Resolved(_))
    }

    /// The id this outcome belongs to.
    pub fn id(&self) -> ItemId {
        match self {
            DetailOutcome::Resolved(detail) => detail.id,
            DetailOutcome::Failed { id, .. } => *id,
        }
    }

    /// Returns the detail, or `None` on failure.
    pub fn into_detail(self) -> Option<ItemDetail> {
        match self {
            DetailOutcome::Resolved(detail) => Some(detail),
            DetailOutcome::Failed { .. } => None,
        }
    }
}

/// Read-through access to item details, one cache entry per id.
///
/// Upstream calls across all concurrent batches share one limiter of
/// `max_in_flight` permits.
pub struct DetailResolver<S: ItemSource> {
    source: Arc<S>,
    cache: StoryCache,
    locks: Arc<KeyedLocks>,
    limiter: Arc<Semaphore>,
    ttl: Duration,
}

impl<S: ItemSource> std::fmt::Debug for DetailResolver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailResolver")
            .field("cache", &self.cache)
            .field("available_permits", &self.limiter.available_permits())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<S: ItemSource> DetailResolver<S> {
    /// Creates a resolver allowing at most `max_in_flight` upstream calls
    /// (at least one).
    pub fn new(
        source: Arc<S>,
        cache: StoryCache,
        locks: Arc<KeyedLocks>,
        max_in_flight: usize,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            locks,
            limiter: Arc::new(Semaphore::new(max_in_flight.max(1))),
            ttl,
        }
    }

    /// Lifetime of each cached detail.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Resolves every id concurrently and waits for all of them.
    ///
    /// The result has the same length and order as `ids`. A failed id yields
    /// [`DetailOutcome::Failed`] without affecting the others.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn details(&self, ids: &[ItemId]) -> Vec<DetailOutcome> {
        if ids.is_empty() {
            return Vec::new();
        }

        let outcomes = join_all(ids.iter().map(|&id| self.resolve(id))).await;

        let failed = outcomes.iter().filter(|o| !o.is_resolved()).count();
        debug!(resolved = outcomes.len() - failed, failed, "Detail batch complete");
        outcomes
    }

    async fn resolve(&self, id: ItemId) -> DetailOutcome {
        let key = item_key(id);
        if let Some(detail) = self.cached(&key) {
            return DetailOutcome::Resolved(detail);
        }

        let _guard = self.locks.lock(&key).await;
        if let Some(detail) = self.cached(&key) {
            return DetailOutcome::Resolved(detail);
        }

        let _permit = match self.limiter.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return DetailOutcome::Failed {
                    id,
                    reason: UpstreamError::LimiterClosed,
                };
            }
        };

        match self.source.item(id).await {
            Ok(raw) => {
                let detail = ItemDetail::from(raw);
                self.cache
                    .set(key, CachedValue::Item(detail.clone()), self.ttl);
                DetailOutcome::Resolved(detail)
            }
            Err(reason) => {
                warn!(id, error = %reason, "Item fetch failed");
                DetailOutcome::Failed { id, reason }
            }
        }
    }

    fn cached(&self, key: &str) -> Option<ItemDetail> {
        let value = self.cache.get(key)?;
        let kind = value.kind();
        let detail = value.into_item();
        if detail.is_none() {
            warn!(key, kind, "Unexpected cached value kind, treating as miss");
        }
        detail
    }
}
