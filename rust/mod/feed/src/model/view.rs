use serde::Serialize;

use ripple_store::DocId;

use crate::model::{CommentId, User, UserId};

// Hydrated views returned by the reference resolver. These are transient
// copies of store state: author ids and top-level like-lists become full
// user documents, and nothing here is ever written back.

/// A feed item with its references resolved.
#[derive(Debug, Clone, Serialize)]
pub struct FeedItemView {
    pub id: DocId,

    #[serde(flatten)]
    pub kind: FeedItemKindView,

    /// The like-list, hydrated to user documents in stored order.
    pub likes: Vec<User>,

    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "contents", rename_all = "camelCase")]
pub enum FeedItemKindView {
    StatusUpdate(StatusUpdateView),
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateView {
    /// The author's full user document.
    pub author: User,

    pub posted_at: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    pub body: String,

    pub likes: Vec<UserId>,
}

/// A comment with its author resolved.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: CommentId,

    pub author: User,

    pub posted_at: i64,

    pub body: String,

    pub likes: Vec<UserId>,
}

/// A feed with every item resolved, in stored order.
#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub id: DocId,

    pub contents: Vec<FeedItemView>,
}
