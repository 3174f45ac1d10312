use crate::error::KVError;

/// KVStore provides the byte-level storage interface the document store
/// builds on.
///
/// Keys follow a namespaced convention: `doc:feedItems:00000000000000000042`,
/// `seq:users`, etc. Every mutating call commits before returning; there is
/// no buffering and no transaction spanning multiple calls.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, committing before return.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting an absent key is not an error at this layer.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Set several key-value pairs in a single committed write.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError>;

    /// Delete several keys in a single committed write.
    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError>;

    /// Scan all keys matching a prefix. Returns (key, value) pairs sorted
    /// by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}
