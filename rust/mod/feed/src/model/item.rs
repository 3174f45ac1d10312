use serde::{Deserialize, Serialize};

use ripple_store::DocId;

use crate::model::{CommentId, UserId};

/// A single post in a feed.
///
/// Like-lists are order-preserving and never contain the same user twice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedItem {
    #[serde(default)]
    pub id: DocId,

    /// The item kind with its contents record.
    #[serde(flatten)]
    pub kind: FeedItemKind,

    /// Users who liked this item.
    #[serde(default)]
    pub likes: Vec<UserId>,

    /// Comments in posting order.
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Next stable comment id for this item. Counts up, never reused.
    pub next_comment_id: CommentId,
}

/// The kind of a feed item, tagged so further kinds can be added without
/// weakening the type of the contents record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "contents", rename_all = "camelCase")]
pub enum FeedItemKind {
    StatusUpdate(StatusUpdate),
}

/// Contents of a status update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate {
    /// Author's user id; the resolver replaces it with the user document.
    pub author: UserId,

    /// Post time, epoch milliseconds.
    pub posted_at: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-text body. This is what search matches against.
    pub body: String,

    /// Like-list carried on the contents record itself.
    #[serde(default)]
    pub likes: Vec<UserId>,
}

/// A comment on a feed item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Stable per-item identifier.
    pub id: CommentId,

    pub author: UserId,

    /// Post time, epoch milliseconds.
    pub posted_at: i64,

    pub body: String,

    #[serde(default)]
    pub likes: Vec<UserId>,
}

impl FeedItem {
    /// The contents record. Every kind currently carries a status update.
    pub fn status(&self) -> &StatusUpdate {
        match &self.kind {
            FeedItemKind::StatusUpdate(status) => status,
        }
    }

    pub fn status_mut(&mut self) -> &mut StatusUpdate {
        match &mut self.kind {
            FeedItemKind::StatusUpdate(status) => status,
        }
    }

    /// The authoring user's id.
    pub fn author(&self) -> UserId {
        self.status().author
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tagging() {
        let item = FeedItem {
            id: 7,
            kind: FeedItemKind::StatusUpdate(StatusUpdate {
                author: 1,
                posted_at: 1_722_000_000_000,
                location: None,
                body: "hello".into(),
                likes: vec![],
            }),
            likes: vec![2],
            comments: vec![],
            next_comment_id: 1,
        };

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "statusUpdate");
        assert_eq!(value["contents"]["body"], "hello");

        let back: FeedItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }
}
