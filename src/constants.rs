//! Cross-cutting, shared constants.
//!
//! Defaults here are used by [`crate::config::Config`] when no `BESTSTORIES_*`
//! override is present.

use std::time::Duration;

/// Default Identifier Source (ranked id list).
pub const DEFAULT_IDS_URL: &str = "https://hacker-news.firebaseio.com/v0/beststories.json";

/// Default Detail Source base URL; `{id}.json` is appended per item.
pub const DEFAULT_ITEM_URL: &str = "https://hacker-news.firebaseio.com/v0/item/";

/// Default TTL for the cached id list.
pub const DEFAULT_IDS_TTL_SECS: u64 = 60;

/// Default TTL for each cached item detail.
pub const DEFAULT_ITEM_TTL_SECS: u64 = 5 * 60;

/// Largest accepted cache TTL (one year).
pub const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Default cap on simultaneous upstream detail requests.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Default max entries held by the shared cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default per-request timeout for upstream HTTP calls.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Default end-to-end timeout for one inbound request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Cache key of the ranked id list.
pub const BEST_IDS_KEY: &str = "beststories";

/// Prefix of per-item cache keys (`item:{id}`).
pub const ITEM_KEY_PREFIX: &str = "item:";

/// Converts a whole number of seconds into a [`Duration`].
#[inline]
pub const fn secs(value: u64) -> Duration {
    Duration::from_secs(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_namespaces_do_not_overlap() {
        assert!(!BEST_IDS_KEY.starts_with(ITEM_KEY_PREFIX));
    }

    #[test]
    fn test_default_item_url_is_a_directory() {
        assert!(DEFAULT_ITEM_URL.ends_with('/'));
    }

    #[test]
    fn test_secs() {
        assert_eq!(secs(DEFAULT_IDS_TTL_SECS), Duration::from_secs(60));
    }
}
