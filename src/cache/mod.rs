//! Process-lifetime TTL cache shared by the resolvers.

pub mod clock;
pub mod coalesce;
pub mod ttl;
pub mod types;


#[cfg(any(test, feature = "mock"))]
pub use clock::MockClock;
pub use clock::{Clock, SystemClock};
pub use coalesce::{KeyGuard, KeyedLocks};
pub use ttl::{CacheEntry, CacheHandle, TtlCache};
pub use types::{CachedValue, StoryCache, best_ids_key, item_key};
