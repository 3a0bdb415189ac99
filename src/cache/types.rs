//! Shared cache value type and the key scheme used by the resolvers.

use std::sync::Arc;

use super::ttl::CacheHandle;
use crate::constants::{BEST_IDS_KEY, ITEM_KEY_PREFIX};
use crate::model::{ItemDetail, ItemId};

/// Value stored in the shared cache. One instance serves both the id list
/// and the per-item details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    /// The ranked id list.
    Ids(Arc<Vec<ItemId>>),
    /// One item's detail.
    Item(ItemDetail),
}

impl CachedValue {
    /// Returns the id list, or `None` for an item value.
    #[inline]
    pub fn into_ids(self) -> Option<Arc<Vec<ItemId>>> {
        match self {
            CachedValue::Ids(ids) => Some(ids),
            CachedValue::Item(_) => None,
        }
    }

    /// Returns the item detail, or `None` for an id list.
    #[inline]
    pub fn into_item(self) -> Option<ItemDetail> {
        match self {
            CachedValue::Item(item) => Some(item),
            CachedValue::Ids(_) => None,
        }
    }

    /// Short variant name for logs.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            CachedValue::Ids(_) => "ids",
            CachedValue::Item(_) => "item",
        }
    }
}

/// The cache instance shared by the resolvers.
pub type StoryCache = CacheHandle<CachedValue>;

/// Key of the ranked id list.
#[inline]
pub fn best_ids_key() -> &'static str {
    BEST_IDS_KEY
}

/// Key of one item's detail.
#[inline]
pub fn item_key(id: ItemId) -> String {
    format!("{ITEM_KEY_PREFIX}{id}")
}
