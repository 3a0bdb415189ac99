use serde::Serialize;

use crate::model::ItemDetail;

/// Outbound wire shape of one story. The internal id is not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    pub title: String,
    pub uri: String,
    pub posted_by: String,
    pub time: i64,
    pub score: i64,
    pub comment_count: usize,
}

impl From<ItemDetail> for StoryResponse {
    fn from(detail: ItemDetail) -> Self {
        Self {
            title: detail.title,
            uri: detail.url,
            posted_by: detail.author,
            time: detail.time,
            score: detail.score,
            comment_count: detail.comment_count,
        }
    }
}
