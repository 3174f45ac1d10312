use ripple_core::now_millis;
use tracing::debug;

use crate::model::{Comment, CommentId, CommentView, FeedItem, ItemId, PostComment, UserId};
use crate::service::{FEED_ITEMS, FeedError, FeedService};

impl FeedService {
    /// Append a comment to a feed item.
    ///
    /// The comment gets a fresh stable id from the item's own counter and
    /// an empty like-list. Returns the updated item, unresolved.
    pub fn post_comment(
        &self,
        caller: Option<UserId>,
        item_id: ItemId,
        input: PostComment,
    ) -> Result<FeedItem, FeedError> {
        if caller != Some(input.user_id) {
            return Err(FeedError::Unauthorized(
                "caller is not the declared author".into(),
            ));
        }
        let _guard = self.mutation_guard();

        let mut item: FeedItem = self.store.read(FEED_ITEMS, item_id)?;
        let comment = Comment {
            id: item.next_comment_id,
            author: input.user_id,
            posted_at: now_millis(),
            body: input.contents,
            likes: Vec::new(),
        };
        item.next_comment_id += 1;
        item.comments.push(comment);
        self.store.write(FEED_ITEMS, &item)?;

        debug!(item = item_id, author = input.user_id, "posted comment");
        Ok(item)
    }

    /// Add `user_id` to a comment's like-list if not already present.
    ///
    /// Returns the resolved comment. Unknown comment ids fail with
    /// `NotFound`.
    pub fn like_comment(
        &self,
        caller: Option<UserId>,
        item_id: ItemId,
        comment_id: CommentId,
        user_id: UserId,
    ) -> Result<CommentView, FeedError> {
        self.mutate_comment_likes(caller, item_id, comment_id, user_id, |likes| {
            if !likes.contains(&user_id) {
                likes.push(user_id);
                true
            } else {
                false
            }
        })
    }

    /// Remove `user_id` from a comment's like-list if present. A no-op
    /// when the user never liked the comment.
    pub fn unlike_comment(
        &self,
        caller: Option<UserId>,
        item_id: ItemId,
        comment_id: CommentId,
        user_id: UserId,
    ) -> Result<CommentView, FeedError> {
        self.mutate_comment_likes(caller, item_id, comment_id, user_id, |likes| {
            let before = likes.len();
            likes.retain(|id| *id != user_id);
            likes.len() != before
        })
    }

    fn mutate_comment_likes(
        &self,
        caller: Option<UserId>,
        item_id: ItemId,
        comment_id: CommentId,
        user_id: UserId,
        apply: impl FnOnce(&mut Vec<UserId>) -> bool,
    ) -> Result<CommentView, FeedError> {
        if caller != Some(user_id) {
            return Err(FeedError::Unauthorized(
                "caller may only like on their own behalf".into(),
            ));
        }
        let _guard = self.mutation_guard();

        let mut item: FeedItem = self.store.read(FEED_ITEMS, item_id)?;
        let idx = item
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| {
                FeedError::NotFound(format!("feedItems/{}/comments/{}", item_id, comment_id))
            })?;

        if apply(&mut item.comments[idx].likes) {
            self.store.write(FEED_ITEMS, &item)?;
        }
        self.resolve_comment(&item.comments[idx])
    }
}
