//! Per-key miss coalescing.
//!
//! Callers on a cache miss take the key's lock, re-check the cache, and only
//! then go upstream. Concurrent misses on one key therefore queue behind the
//! first fetch instead of each issuing their own.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slot = Arc<AsyncMutex<()>>;

#[derive(Debug, Default)]
struct SlotEntry {
    lock: Slot,
    /// Holders plus waiters; the entry is removed when this reaches zero.
    users: usize,
}

/// Set of async locks addressed by cache key.
///
/// Slots are created on demand and removed when the last holder or waiter
/// releases them, including waiters cancelled before acquiring.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    slots: Mutex<HashMap<String, SlotEntry>>,
}

impl KeyedLocks {
    /// Creates an empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `key`.
    ///
    /// Cancel safe: dropping the returned future before it resolves
    /// unregisters the waiter.
    pub async fn lock(&self, key: &str) -> KeyGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock();
            let entry = slots.entry(key.to_owned()).or_default();
            entry.users += 1;
            Arc::clone(&entry.lock)
        };

        // Registered before the await so that cancellation runs `Drop`.
        let mut guard = KeyGuard {
            owner: self,
            key: key.to_owned(),
            guard: None,
        };
        guard.guard = Some(slot.lock_owned().await);
        guard
    }

    /// Number of keys currently held or waited on.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Returns `true` if no key is held or waited on.
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

/// Exclusive access to one key; released on drop.
pub struct KeyGuard<'a> {
    owner: &'a KeyedLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyGuard<'_> {
    /// The key this guard holds.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();

        let mut slots = self.owner.slots.lock();
        // Every live guard counts as a user, so the entry is still this one.
        if let Some(entry) = slots.get_mut(&self.key) {
            entry.users = entry.users.saturating_sub(1);
            if entry.users == 0 {
                slots.remove(&self.key);
            }
        }
    }
}

impl std::fmt::Debug for KeyGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGuard")
            .field("key", &self.key)
            .field("acquired", &self.guard.is_some())
            .finish()
    }
}
