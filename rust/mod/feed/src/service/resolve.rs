//! Reference resolution: hydrating stored identifiers into full documents.
//!
//! Everything here is a pure function of current store state. Resolution
//! returns transient copies and never writes.

use crate::model::{
    Comment, CommentView, Feed, FeedItem, FeedItemKind, FeedItemKindView, FeedItemView, FeedView,
    ItemId, StatusUpdateView, User, UserId,
};
use crate::service::{FEED_ITEMS, FEEDS, FeedError, FeedService, USERS};

impl FeedService {
    /// Load and resolve a single feed item.
    pub fn resolve_feed_item(&self, item_id: ItemId) -> Result<FeedItemView, FeedError> {
        let item: FeedItem = self.store.read(FEED_ITEMS, item_id)?;
        self.resolve_item(&item)
    }

    /// Load a user's feed and resolve every item, preserving stored order.
    pub fn resolve_feed(&self, user_id: UserId) -> Result<FeedView, FeedError> {
        let user: User = self.store.read(USERS, user_id)?;
        let feed: Feed = self.store.read(FEEDS, user.feed)?;

        let contents = feed
            .contents
            .iter()
            .map(|item_id| self.resolve_feed_item(*item_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeedView {
            id: feed.id,
            contents,
        })
    }

    /// Resolve an already-loaded item: the author and the top-level
    /// like-list become user documents, comment authors are hydrated.
    pub(crate) fn resolve_item(&self, item: &FeedItem) -> Result<FeedItemView, FeedError> {
        let FeedItemKind::StatusUpdate(status) = &item.kind;
        let author: User = self.store.read(USERS, status.author)?;

        let likes = self.hydrate_users(&item.likes)?;
        let comments = item
            .comments
            .iter()
            .map(|comment| self.resolve_comment(comment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeedItemView {
            id: item.id,
            kind: FeedItemKindView::StatusUpdate(StatusUpdateView {
                author,
                posted_at: status.posted_at,
                location: status.location.clone(),
                body: status.body.clone(),
                likes: status.likes.clone(),
            }),
            likes,
            comments,
        })
    }

    pub(crate) fn resolve_comment(&self, comment: &Comment) -> Result<CommentView, FeedError> {
        let author: User = self.store.read(USERS, comment.author)?;
        Ok(CommentView {
            id: comment.id,
            author,
            posted_at: comment.posted_at,
            body: comment.body.clone(),
            likes: comment.likes.clone(),
        })
    }

    /// Hydrate a like-list, preserving its stored order.
    pub(crate) fn hydrate_users(&self, ids: &[UserId]) -> Result<Vec<User>, FeedError> {
        ids.iter()
            .map(|id| self.store.read(USERS, *id).map_err(FeedError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ripple_kv::MemoryStore;

    use super::*;
    use crate::model::PostStatusUpdate;

    fn test_service() -> Arc<FeedService> {
        FeedService::new(Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_resolve_feed_preserves_order() {
        let svc = test_service();

        // Feed 1 stores [2, 1].
        let feed = svc.resolve_feed(1).unwrap();
        assert_eq!(
            feed.contents.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![2, 1],
        );

        // A new post goes first.
        svc.post_status_update(
            Some(1),
            PostStatusUpdate {
                user_id: 1,
                location: None,
                contents: "newest".into(),
            },
        )
        .unwrap();
        let feed = svc.resolve_feed(1).unwrap();
        assert_eq!(
            feed.contents.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![3, 2, 1],
        );
    }

    #[test]
    fn test_resolve_hydrates_references() {
        let svc = test_service();

        let view = svc.resolve_feed_item(1).unwrap();
        let FeedItemKindView::StatusUpdate(status) = &view.kind;
        assert_eq!(status.author.id, 4);
        assert_eq!(status.author.name, "Dmitri Volkov");

        // Like-list hydrated in stored order.
        assert_eq!(
            view.likes.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![2, 3],
        );

        // Comment authors hydrated, comment like-lists stay as ids.
        assert_eq!(view.comments[0].author.name, "Ada Fenwick");
        assert_eq!(view.comments[0].likes, vec![4]);
    }

    #[test]
    fn test_resolution_never_mutates_the_store() {
        let svc = test_service();

        svc.resolve_feed(1).unwrap();
        svc.resolve_feed_item(1).unwrap();

        // The stored item still holds raw identifiers.
        let raw: FeedItem = svc.store.read(FEED_ITEMS, 1).unwrap();
        assert_eq!(raw.status().author, 4);
        assert_eq!(raw.likes, vec![2, 3]);
    }

    #[test]
    fn test_resolve_unknown_user_fails() {
        let svc = test_service();
        assert!(matches!(
            svc.resolve_feed(99),
            Err(FeedError::NotFound(_))
        ));
    }
}
