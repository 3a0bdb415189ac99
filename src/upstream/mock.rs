use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::ItemSource;
use super::error::{UpstreamError, UpstreamResult};
use super::model::RawItem;
use crate::model::ItemId;

const MOCK_IDS_URL: &str = "mock://beststories.json";

/// Scriptable in-memory [`ItemSource`] that records every call.
#[derive(Debug, Default)]
pub struct MockItemSource {
    state: Mutex<MockState>,
    ids_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

#[derive(Debug, Default)]
struct MockState {
    ids: Option<Vec<ItemId>>,
    items: HashMap<ItemId, RawItem>,
    failing: HashSet<ItemId>,
    item_calls: HashMap<ItemId, usize>,
    latency: Duration,
}

impl MockItemSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the id list; until set, `best_ids` fails with status 503.
    pub fn with_ids(self, ids: impl Into<Vec<ItemId>>) -> Self {
        self.set_ids(ids);
        self
    }

    pub fn with_item(self, item: RawItem) -> Self {
        self.put_item(item);
        self
    }

    pub fn with_items(self, items: impl IntoIterator<Item = RawItem>) -> Self {
        for item in items {
            self.put_item(item);
        }
        self
    }

    /// Every upstream call sleeps this long before answering.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.state.lock().latency = latency;
        self
    }

    pub fn set_ids(&self, ids: impl Into<Vec<ItemId>>) {
        self.state.lock().ids = Some(ids.into());
    }

    pub fn clear_ids(&self) {
        self.state.lock().ids = None;
    }

    pub fn put_item(&self, item: RawItem) {
        self.state.lock().items.insert(item.id, item);
    }

    /// Makes `item(id)` answer with status 500 until [`Self::recover`].
    pub fn fail_item(&self, id: ItemId) {
        self.state.lock().failing.insert(id);
    }

    pub fn recover(&self, id: ItemId) {
        self.state.lock().failing.remove(&id);
    }

    pub fn ids_calls(&self) -> usize {
        self.ids_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self, id: ItemId) -> usize {
        self.state.lock().item_calls.get(&id).copied().unwrap_or(0)
    }

    pub fn total_item_calls(&self) -> usize {
        self.state.lock().item_calls.values().sum()
    }

    /// Highest number of `item` calls observed running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn latency(&self) -> Duration {
        self.state.lock().latency
    }
}

impl ItemSource for MockItemSource {
    async fn best_ids(&self) -> UpstreamResult<Vec<ItemId>> {
        self.ids_calls.fetch_add(1, Ordering::SeqCst);

        let latency = self.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.state
            .lock()
            .ids
            .clone()
            .ok_or_else(|| UpstreamError::Status {
                url: MOCK_IDS_URL.to_string(),
                status: 503,
            })
    }

    async fn item(&self, id: ItemId) -> UpstreamResult<RawItem> {
        let latency = {
            let mut state = self.state.lock();
            *state.item_calls.entry(id).or_default() += 1;
            state.latency
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let url = format!("mock://item/{id}.json");
        let state = self.state.lock();
        if state.failing.contains(&id) {
            return Err(UpstreamError::Status { url, status: 500 });
        }
        state
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| UpstreamError::Decode {
                url,
                message: "invalid type: null, expected struct RawItem".to_string(),
            })
    }
}

/// Builds a story payload with `kids` child comments.
pub fn raw_story(id: ItemId, score: i64, kids: usize) -> RawItem {
    RawItem {
        id,
        by: Some(format!("user{id}")),
        descendants: Some(kids as i64),
        kids: Some((0..kids as ItemId).map(|k| id * 100 + k).collect()),
        score: Some(score),
        time: Some(1_570_000_000 + id as i64),
        title: Some(format!("Story {id}")),
        kind: Some("story".to_string()),
        url: Some(format!("https://example.com/{id}")),
    }
}
