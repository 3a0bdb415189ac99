//! In-memory key/value cache with per-entry absolute expiry.
//!
//! Expiry is checked lazily on read against the injected [`Clock`]; there is no
//! background sweeper. Storage is a bounded [`moka`] cache, so capacity
//! eviction still applies independently of TTL.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::clock::{Clock, SystemClock};
use crate::constants::DEFAULT_CACHE_CAPACITY;

/// A stored value together with the instant it stops being served.
///
/// `expires_at` is `None` when the TTL does not fit in an [`Instant`]; such an
/// entry never expires.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    /// Creates an entry that is fresh until `expires_at` (exclusive).
    #[inline]
    pub fn new(value: V, expires_at: Instant) -> Self {
        Self {
            value,
            expires_at: Some(expires_at),
        }
    }

    /// Creates an entry fresh for `ttl` after `now`.
    #[inline]
    pub fn with_ttl(value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    /// Returns `true` iff `now < expires_at`.
    #[inline]
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the expiry instant, or `None` if the entry never expires.
    #[inline]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }
}

/// TTL cache keyed by string.
///
/// [`get`](Self::get) treats an absent key and an expired entry identically.
/// [`set`](Self::set) always overwrites and is the only way to extend a lifetime.
pub struct TtlCache<V> {
    entries: Cache<String, CacheEntry<V>>,
    clock: Arc<dyn Clock>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache with the default capacity and the system clock.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache with a max entry capacity and the system clock.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    /// Creates a cache with a max entry capacity and an explicit clock.
    pub fn with_clock(capacity: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
            clock,
        }
    }

    /// Returns the value under `key` if present and not yet expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh_at(self.clock.now()) {
            Some(entry.value)
        } else {
            None
        }
    }

    /// Stores `value` under `key`, fresh for `ttl` from now.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry::with_ttl(value, self.clock.now(), ttl);
        self.entries.insert(key.into(), entry);
    }

    /// Returns `true` if `key` holds a fresh entry.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored slots, including expired ones not yet overwritten.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if no slots are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl<V> Default for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries.entry_count())
            .field("clock", &self.clock)
            .finish()
    }
}

/// Shared handle to a [`TtlCache`].
pub struct CacheHandle<V> {
    inner: Arc<TtlCache<V>>,
}

impl<V> Clone for CacheHandle<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> CacheHandle<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new handle with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::from_cache(TtlCache::new())
    }

    /// Creates a new handle with a specific capacity.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self::from_cache(TtlCache::with_capacity(capacity))
    }

    /// Creates a new handle with a specific capacity and clock.
    #[inline]
    pub fn with_clock(capacity: u64, clock: Arc<dyn Clock>) -> Self {
        Self::from_cache(TtlCache::with_clock(capacity, clock))
    }

    /// Wraps an existing cache.
    #[inline]
    pub fn from_cache(cache: TtlCache<V>) -> Self {
        Self {
            inner: Arc::new(cache),
        }
    }

    /// See [`TtlCache::get`].
    #[inline]
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key)
    }

    /// See [`TtlCache::set`].
    #[inline]
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.inner.set(key, value, ttl)
    }

    /// See [`TtlCache::contains`].
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    /// Returns the number of stored slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    /// Returns `true` if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Runs any pending maintenance tasks.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<V> Default for CacheHandle<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for CacheHandle<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheHandle")
            .field("strong_count", &Arc::strong_count(&self.inner))
            .finish()
    }
}
