//! Read-through resolvers over the shared cache.
//!
//! [`IdResolver`] owns the single id-list entry; [`DetailResolver`] owns the
//! `item:{id}` entries and fans out concurrently with a bounded number of
//! upstream calls. Both coalesce concurrent misses on the same key through a
//! shared [`KeyedLocks`](crate::cache::KeyedLocks).

pub mod details;
pub mod ids;


pub use details::{DetailOutcome, DetailResolver};
pub use ids::IdResolver;
