use ripple_core::now_millis;
use tracing::debug;

use crate::model::{
    Feed, FeedItem, FeedItemKind, FeedItemView, ItemId, PostStatusUpdate, StatusUpdate, User,
    UserId,
};
use crate::service::{FEED_ITEMS, FEEDS, FeedError, FeedService, USERS};

impl FeedService {
    /// Post a status update and prepend it to the author's feed.
    ///
    /// Returns the stored item, identifiers unresolved.
    pub fn post_status_update(
        &self,
        caller: Option<UserId>,
        input: PostStatusUpdate,
    ) -> Result<FeedItem, FeedError> {
        if caller != Some(input.user_id) {
            return Err(FeedError::Unauthorized(
                "caller is not the declared author".into(),
            ));
        }
        let _guard = self.mutation_guard();

        let item = FeedItem {
            id: 0,
            kind: FeedItemKind::StatusUpdate(StatusUpdate {
                author: input.user_id,
                posted_at: now_millis(),
                location: input.location,
                body: input.contents,
                likes: Vec::new(),
            }),
            likes: Vec::new(),
            comments: Vec::new(),
            next_comment_id: 1,
        };
        let item: FeedItem = self.store.create(FEED_ITEMS, &item)?;

        let author: User = self.store.read(USERS, input.user_id)?;
        let mut feed: Feed = self.store.read(FEEDS, author.feed)?;
        feed.contents.insert(0, item.id);
        self.store.write(FEEDS, &feed)?;

        debug!(item = item.id, author = input.user_id, "posted status update");
        Ok(item)
    }

    /// Delete a feed item and remove its id from every feed listing it.
    ///
    /// The cleanup is best-effort per feed: there is no cross-document
    /// transaction, so a failure partway leaves later feeds untouched.
    pub fn delete_feed_item(
        &self,
        caller: Option<UserId>,
        item_id: ItemId,
    ) -> Result<(), FeedError> {
        let _guard = self.mutation_guard();

        let item: FeedItem = self.store.read(FEED_ITEMS, item_id)?;
        if caller != Some(item.author()) {
            return Err(FeedError::Unauthorized("caller is not the author".into()));
        }

        self.store.delete(FEED_ITEMS, item_id)?;
        let feeds: Vec<Feed> = self.store.all(FEEDS)?;
        for mut feed in feeds {
            let before = feed.contents.len();
            feed.contents.retain(|id| *id != item_id);
            if feed.contents.len() != before {
                self.store.write(FEEDS, &feed)?;
            }
        }

        debug!(item = item_id, "deleted feed item");
        Ok(())
    }

    /// Overwrite a status update's body.
    ///
    /// `body` is `None` when the request carried something other than plain
    /// text; that fails validation, but only after the author check.
    pub fn edit_contents(
        &self,
        caller: Option<UserId>,
        item_id: ItemId,
        body: Option<String>,
    ) -> Result<FeedItemView, FeedError> {
        {
            let _guard = self.mutation_guard();

            let mut item: FeedItem = self.store.read(FEED_ITEMS, item_id)?;
            if caller != Some(item.author()) {
                return Err(FeedError::Unauthorized("caller is not the author".into()));
            }
            let body = body.ok_or_else(|| {
                FeedError::Validation("body must be plain text, not structured data".into())
            })?;

            item.status_mut().body = body;
            self.store.write(FEED_ITEMS, &item)?;
        }
        self.resolve_feed_item(item_id)
    }

    /// Add `user_id` to the item's like-list if not already present.
    ///
    /// Always returns the hydrated current like-list, whether or not an
    /// insertion happened — liking twice is a no-op, never an error.
    pub fn like_item(
        &self,
        caller: Option<UserId>,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<Vec<User>, FeedError> {
        if caller != Some(user_id) {
            return Err(FeedError::Unauthorized(
                "caller may only like on their own behalf".into(),
            ));
        }
        let _guard = self.mutation_guard();

        let mut item: FeedItem = self.store.read(FEED_ITEMS, item_id)?;
        if !item.likes.contains(&user_id) {
            item.likes.push(user_id);
            self.store.write(FEED_ITEMS, &item)?;
        }
        self.hydrate_users(&item.likes)
    }

    /// Remove `user_id` from the item's like-list if present.
    ///
    /// Succeeds even when the user never liked the item.
    pub fn unlike_item(
        &self,
        caller: Option<UserId>,
        item_id: ItemId,
        user_id: UserId,
    ) -> Result<Vec<User>, FeedError> {
        if caller != Some(user_id) {
            return Err(FeedError::Unauthorized(
                "caller may only unlike on their own behalf".into(),
            ));
        }
        let _guard = self.mutation_guard();

        let mut item: FeedItem = self.store.read(FEED_ITEMS, item_id)?;
        let before = item.likes.len();
        item.likes.retain(|id| *id != user_id);
        if item.likes.len() != before {
            self.store.write(FEED_ITEMS, &item)?;
        }
        self.hydrate_users(&item.likes)
    }
}
