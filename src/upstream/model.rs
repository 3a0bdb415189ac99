use serde::Deserialize;

use crate::model::{ItemDetail, ItemId};

/// Item as served by the Detail Source.
///
/// Everything but `id` is optional upstream (deleted items, text posts and
/// jobs omit fields).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawItem {
    pub id: ItemId,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub descendants: Option<i64>,
    #[serde(default)]
    pub kids: Option<Vec<ItemId>>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<RawItem> for ItemDetail {
    fn from(raw: RawItem) -> Self {
        ItemDetail {
            id: raw.id,
            author: raw.by.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            score: raw.score.unwrap_or_default(),
            time: raw.time.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            comment_count: raw.kids.map_or(0, |kids| kids.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload_maps_fields() {
        let raw: RawItem = serde_json::from_value(serde_json::json!({
            "by": "ismaildonmez",
            "descendants": 588,
            "id": 21233041,
            "kids": [21233229, 21233577, 21233189],
            "score": 1757,
            "time": 1570887781,
            "title": "A uBlock Origin update was rejected from the Chrome Web Store",
            "type": "story",
            "url": "https://github.com/uBlockOrigin/uBlock-issues/issues/745"
        }))
        .expect("valid payload");

        assert_eq!(raw.kind.as_deref(), Some("story"));
        assert_eq!(raw.descendants, Some(588));

        let detail = ItemDetail::from(raw);
        assert_eq!(detail.id, 21233041);
        assert_eq!(detail.author, "ismaildonmez");
        assert_eq!(detail.score, 1757);
        assert_eq!(detail.time, 1570887781);
        assert_eq!(
            detail.url,
            "https://github.com/uBlockOrigin/uBlock-issues/issues/745"
        );
        assert_eq!(detail.comment_count, 3);
    }

    #[test]
    fn test_missing_kids_means_zero_comments() {
        let raw: RawItem =
            serde_json::from_value(serde_json::json!({ "id": 1, "score": 5 })).expect("valid");
        let detail = ItemDetail::from(raw);

        assert_eq!(detail.comment_count, 0);
        assert_eq!(detail.author, "");
        assert_eq!(detail.url, "");
        assert_eq!(detail.score, 5);
    }

    #[test]
    fn test_null_kids_means_zero_comments() {
        let raw: RawItem =
            serde_json::from_value(serde_json::json!({ "id": 1, "kids": null })).expect("valid");
        assert_eq!(ItemDetail::from(raw).comment_count, 0);
    }

    #[test]
    fn test_null_body_is_rejected() {
        let parsed = serde_json::from_str::<RawItem>("null");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw: RawItem = serde_json::from_value(serde_json::json!({
            "id": 2,
            "dead": true,
            "parts": [1, 2]
        }))
        .expect("valid");
        assert_eq!(raw.id, 2);
    }
}
