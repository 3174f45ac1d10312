use serde::{Deserialize, Serialize};

use ripple_store::DocId;

use crate::model::ItemId;

/// A per-user ordered list of feed-item references, newest first.
///
/// Posting prepends the new item's id; deleting a feed item removes its id
/// from every feed that lists it, so no reference here may dangle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    #[serde(default)]
    pub id: DocId,

    /// Feed-item identifiers in display order.
    pub contents: Vec<ItemId>,
}
