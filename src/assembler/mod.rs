//! Top-N assembly over the resolvers.
//!
//! The default path trusts the upstream order: take the first `n` ids and
//! resolve them. With `force_rerank` set, every id is resolved and the result
//! is re-sorted by score, which costs one detail lookup per id per request.


use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::cache::{KeyedLocks, StoryCache};
use crate::config::Config;
use crate::model::ItemDetail;
use crate::resolver::{DetailOutcome, DetailResolver, IdResolver};
use crate::upstream::{ItemSource, UpstreamResult};

/// Builds the top-N view from the id and detail resolvers.
pub struct Assembler<S: ItemSource> {
    ids: IdResolver<S>,
    details: DetailResolver<S>,
    force_rerank: bool,
}

impl<S: ItemSource> std::fmt::Debug for Assembler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembler")
            .field("ids", &self.ids)
            .field("details", &self.details)
            .field("force_rerank", &self.force_rerank)
            .finish()
    }
}

impl<S: ItemSource> Assembler<S> {
    /// Creates an assembler over existing resolvers.
    pub fn new(ids: IdResolver<S>, details: DetailResolver<S>, force_rerank: bool) -> Self {
        Self {
            ids,
            details,
            force_rerank,
        }
    }

    /// Wires both resolvers over one source and one cache.
    pub fn from_config(source: Arc<S>, cache: StoryCache, config: &Config) -> Self {
        let locks = Arc::new(KeyedLocks::new());
        let ids = IdResolver::new(
            Arc::clone(&source),
            cache.clone(),
            Arc::clone(&locks),
            config.identifier_cache_ttl,
        );
        let details = DetailResolver::new(
            source,
            cache,
            locks,
            config.max_in_flight,
            config.detail_cache_ttl,
        );
        Self::new(ids, details, config.force_rerank)
    }

    /// Whether results are re-sorted by score.
    pub fn force_rerank(&self) -> bool {
        self.force_rerank
    }

    /// The id-list resolver.
    pub fn id_resolver(&self) -> &IdResolver<S> {
        &self.ids
    }

    /// The item-detail resolver.
    pub fn detail_resolver(&self) -> &DetailResolver<S> {
        &self.details
    }

    /// Returns up to `n` item details, best first.
    ///
    /// `n <= 0` yields an empty list without contacting upstream. Items whose
    /// detail could not be resolved are left out, so the result may be shorter
    /// than `n`. A failure to obtain the id list is returned as an error.
    #[instrument(skip(self), fields(force_rerank = self.force_rerank))]
    pub async fn top(&self, n: i64) -> UpstreamResult<Vec<ItemDetail>> {
        if n <= 0 {
            return Ok(Vec::new());
        }

        let ids = self.ids.best_ids().await?;
        let n = usize::try_from(n).unwrap_or(usize::MAX).min(ids.len());

        let outcomes = if self.force_rerank {
            self.details.details(&ids).await
        } else {
            self.details.details(&ids[..n]).await
        };

        let requested = outcomes.len();
        let mut items = Self::collect_resolved(outcomes);
        if items.len() < requested {
            warn!(
                dropped = requested - items.len(),
                requested, "Dropping items whose details could not be resolved"
            );
        }

        if self.force_rerank {
            items = Self::rerank(items, n);
        }

        debug!(returned = items.len(), "Top items assembled");
        Ok(items)
    }

    fn collect_resolved(outcomes: Vec<DetailOutcome>) -> Vec<ItemDetail> {
        outcomes
            .into_iter()
            .filter_map(DetailOutcome::into_detail)
            .collect()
    }

    /// Drops repeated ids (first occurrence wins), sorts by score descending
    /// and keeps `n`. The sort is stable, so equal scores keep id-list order.
    fn rerank(items: Vec<ItemDetail>, n: usize) -> Vec<ItemDetail> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut items: Vec<ItemDetail> = items
            .into_iter()
            .filter(|item| seen.insert(item.id))
            .collect();

        items.sort_by_key(|item| Reverse(item.score));
        items.truncate(n);
        items
    }
}
