//! Read-only upstream: the Identifier Source and the Detail Source.
//!
//! The resolvers only see the [`ItemSource`] trait. [`HttpItemSource`] is the
//! production implementation; [`MockItemSource`] is available behind the
//! `mock` feature.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;

pub use client::HttpItemSource;
pub use error::{UpstreamError, UpstreamResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockItemSource, raw_story};
pub use model::RawItem;

use crate::model::ItemId;

/// Upstream that serves the ranked id list and per-item payloads.
pub trait ItemSource: Send + Sync {
    /// Fetches the full id list, best first.
    fn best_ids(&self) -> impl std::future::Future<Output = UpstreamResult<Vec<ItemId>>> + Send;

    /// Fetches one item's payload.
    fn item(&self, id: ItemId) -> impl std::future::Future<Output = UpstreamResult<RawItem>> + Send;
}
