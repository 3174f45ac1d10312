use serde::{Deserialize, Serialize};

use ripple_store::DocId;

/// A user identity. Users are created at database initialization and are
/// not managed through this API surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: DocId,

    /// Display name.
    pub name: String,

    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// The user's own feed document.
    pub feed: DocId,
}
