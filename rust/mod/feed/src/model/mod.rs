mod feed;
mod input;
mod item;
mod user;
mod view;

pub use feed::Feed;
pub use input::{PostComment, PostStatusUpdate};
pub use item::{Comment, FeedItem, FeedItemKind, StatusUpdate};
pub use user::User;
pub use view::{CommentView, FeedItemKindView, FeedItemView, FeedView, StatusUpdateView};

/// A user's document-store identifier.
pub type UserId = ripple_store::DocId;

/// A feed item's document-store identifier.
pub type ItemId = ripple_store::DocId;

/// A comment's stable per-item identifier. Comment ids count up within
/// their feed item and are never reused, so a comment stays addressable
/// while earlier comments come and go.
pub type CommentId = u64;
