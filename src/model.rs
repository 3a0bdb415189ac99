//! Domain types shared by the resolvers, the assembler and the gateway.

/// Upstream item identifier.
pub type ItemId = u64;

/// One resolved item, already mapped out of the upstream wire shape.
///
/// `comment_count` is the number of direct child ids the upstream reported
/// (zero when the field was absent).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemDetail {
    /// Upstream id. Internal only; never serialized to clients.
    pub id: ItemId,
    /// Submitting user.
    pub author: String,
    /// Item title.
    pub title: String,
    /// Upstream score.
    pub score: i64,
    /// Submission time, unix seconds.
    pub time: i64,
    /// Linked URL (empty for text posts).
    pub url: String,
    /// Number of direct child comments.
    pub comment_count: usize,
}
