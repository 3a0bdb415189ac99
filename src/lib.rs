//! Beststories library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`TtlCache`], [`CacheHandle`], [`StoryCache`] - Lazily expiring shared cache
//! - [`IdResolver`], [`DetailResolver`] - Read-through resolvers with miss coalescing
//! - [`Assembler`] - Top-N assembly with optional score re-ranking
//!
//! ## Upstream
//! - [`ItemSource`] - Seam over the Identifier and Detail sources
//! - [`HttpItemSource`] - reqwest implementation
//!
//! ## Test/Mock Support
//! [`MockItemSource`] and [`MockClock`] are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod assembler;
pub mod cache;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod model;
pub mod resolver;
pub mod upstream;

pub use assembler::Assembler;
#[cfg(any(test, feature = "mock"))]
pub use cache::MockClock;
pub use cache::{
    CacheEntry, CacheHandle, CachedValue, Clock, KeyedLocks, StoryCache, SystemClock, TtlCache,
    best_ids_key, item_key,
};
pub use config::{Config, ConfigError};
pub use gateway::{GatewayError, HandlerState, StoryResponse, create_router};
pub use model::{ItemDetail, ItemId};
pub use resolver::{DetailOutcome, DetailResolver, IdResolver};
#[cfg(any(test, feature = "mock"))]
pub use upstream::{MockItemSource, raw_story};
pub use upstream::{HttpItemSource, ItemSource, RawItem, UpstreamError, UpstreamResult};
