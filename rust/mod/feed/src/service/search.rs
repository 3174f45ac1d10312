use crate::model::{Feed, FeedItem, FeedItemView, User, UserId};
use crate::service::{FEED_ITEMS, FEEDS, FeedError, FeedService, USERS};

impl FeedService {
    /// Scan a user's feed for items whose body contains the query.
    ///
    /// The query is trimmed and lowercased; matching is a plain substring
    /// test, so the empty query matches everything. Results keep feed
    /// order. No tokenization, no ranking, no pagination.
    pub fn search(&self, user_id: UserId, query: &str) -> Result<Vec<FeedItemView>, FeedError> {
        let needle = query.trim().to_lowercase();

        let user: User = self.store.read(USERS, user_id)?;
        let feed: Feed = self.store.read(FEEDS, user.feed)?;

        let mut hits = Vec::new();
        for item_id in &feed.contents {
            let item: FeedItem = self.store.read(FEED_ITEMS, *item_id)?;
            if item.status().body.to_lowercase().contains(&needle) {
                hits.push(self.resolve_item(&item)?);
            }
        }
        Ok(hits)
    }
}
