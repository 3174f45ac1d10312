use serde::Deserialize;

use crate::model::UserId;

// Request shapes enforced before anything reaches the mutation engine.
// Unknown fields and wrong types are rejected with a client error, so
// malformed bodies never touch the store.

/// Body of `POST /feeditem`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PostStatusUpdate {
    /// Declared author. Must match the caller identity.
    pub user_id: UserId,

    #[serde(default)]
    pub location: Option<String>,

    /// Free-text body of the status update.
    pub contents: String,
}

/// Body of `POST /feeditem/{itemid}/comment`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PostComment {
    /// Declared author. Must match the caller identity.
    pub user_id: UserId,

    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_update_shape() {
        let input: PostStatusUpdate =
            serde_json::from_str(r#"{"userId": 4, "location": "5th Ave", "contents": "hi"}"#)
                .unwrap();
        assert_eq!(input.user_id, 4);
        assert_eq!(input.location.as_deref(), Some("5th Ave"));

        // location is optional
        assert!(serde_json::from_str::<PostStatusUpdate>(r#"{"userId": 4, "contents": "hi"}"#).is_ok());
        // unknown fields are rejected
        assert!(serde_json::from_str::<PostStatusUpdate>(
            r#"{"userId": 4, "contents": "hi", "admin": true}"#
        )
        .is_err());
        // wrong types are rejected
        assert!(serde_json::from_str::<PostStatusUpdate>(r#"{"userId": "4", "contents": "hi"}"#).is_err());
    }

    #[test]
    fn test_comment_shape() {
        assert!(serde_json::from_str::<PostComment>(r#"{"userId": 1, "contents": "nice"}"#).is_ok());
        assert!(serde_json::from_str::<PostComment>(r#"{"contents": "nice"}"#).is_err());
    }
}
