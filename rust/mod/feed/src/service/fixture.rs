//! Initial database state: four users with their feeds and a couple of
//! status updates. Loaded on first start and restored by `reset()`.

use ripple_store::Snapshot;
use serde_json::Value;

use crate::model::{Comment, Feed, FeedItem, FeedItemKind, StatusUpdate, User};

fn doc<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

fn user(id: u64, name: &str) -> Value {
    doc(&User {
        id,
        name: name.to_string(),
        avatar: None,
        feed: id,
    })
}

fn feed(id: u64, contents: &[u64]) -> Value {
    doc(&Feed {
        id,
        contents: contents.to_vec(),
    })
}

pub fn snapshot() -> Snapshot {
    let espresso_post = FeedItem {
        id: 1,
        kind: FeedItemKind::StatusUpdate(StatusUpdate {
            author: 4,
            posted_at: 1_722_000_000_000,
            location: Some("5th Avenue".to_string()),
            body: "Check out the new coffee place on 5th — best espresso in town.".to_string(),
            likes: vec![],
        }),
        likes: vec![2, 3],
        comments: vec![
            Comment {
                id: 1,
                author: 1,
                posted_at: 1_722_000_600_000,
                body: "Bold claim. I'll be the judge of that.".to_string(),
                likes: vec![4],
            },
            Comment {
                id: 2,
                author: 2,
                posted_at: 1_722_001_200_000,
                body: "Their cortado is even better.".to_string(),
                likes: vec![],
            },
        ],
        next_comment_id: 3,
    };

    let climbing_post = FeedItem {
        id: 2,
        kind: FeedItemKind::StatusUpdate(StatusUpdate {
            author: 1,
            posted_at: 1_722_080_000_000,
            location: None,
            body: "Looking for a climbing partner this weekend.".to_string(),
            likes: vec![],
        }),
        likes: vec![],
        comments: vec![],
        next_comment_id: 1,
    };

    Snapshot::new()
        .with("users", user(1, "Ada Fenwick"))
        .with("users", user(2, "Ben Ortiz"))
        .with("users", user(3, "Carol Ngai"))
        .with("users", user(4, "Dmitri Volkov"))
        // Newest first: the climbing post (item 2) is more recent.
        .with("feeds", feed(1, &[2, 1]))
        .with("feeds", feed(2, &[2, 1]))
        .with("feeds", feed(3, &[1]))
        .with("feeds", feed(4, &[1]))
        .with("feedItems", doc(&espresso_post))
        .with("feedItems", doc(&climbing_post))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_references_are_consistent() {
        let snap = snapshot();
        let collections: std::collections::BTreeMap<_, _> = snap.collections().collect();

        let item_ids: Vec<u64> = collections["feedItems"]
            .iter()
            .map(|d| d["id"].as_u64().unwrap())
            .collect();

        // Every feed entry must point at an existing feed item.
        for feed in collections["feeds"] {
            for entry in feed["contents"].as_array().unwrap() {
                assert!(item_ids.contains(&entry.as_u64().unwrap()));
            }
        }

        // Every user owns the feed with their own id.
        for user in collections["users"] {
            assert_eq!(user["id"], user["feed"]);
        }
    }
}
