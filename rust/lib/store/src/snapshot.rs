use std::collections::BTreeMap;

use serde_json::Value;

/// Snapshot declares the store's collections and their initial documents.
///
/// The store seeds from the snapshot on first start and restores it on
/// `reset()`. Every document must be a JSON object carrying a numeric
/// `id` field; the store validates this at seed time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    collections: BTreeMap<String, Vec<Value>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection, with no initial documents.
    pub fn collection(mut self, name: &str) -> Self {
        self.collections.entry(name.to_string()).or_default();
        self
    }

    /// Register a collection document. The collection is created if it was
    /// not registered yet.
    pub fn with(mut self, collection: &str, doc: Value) -> Self {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        self
    }

    /// Names of all registered collections.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Collections with their initial documents.
    pub fn collections(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.collections.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
