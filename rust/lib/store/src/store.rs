use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use ripple_kv::KVStore;

use crate::error::StoreError;
use crate::snapshot::Snapshot;

/// Document identifier. Assigned by the store, monotonically unique within
/// a collection, never reused after deletion.
pub type DocId = u64;

/// Marker key set once the snapshot has been seeded.
const INIT_KEY: &str = "meta:init";

/// Ids are zero-padded in keys so a prefix scan yields numeric order.
fn doc_key(collection: &str, id: DocId) -> String {
    format!("doc:{}:{:020}", collection, id)
}

fn doc_prefix(collection: &str) -> String {
    format!("doc:{}:", collection)
}

fn seq_key(collection: &str) -> String {
    format!("seq:{}", collection)
}

/// DocStore owns named collections of JSON documents keyed by auto-assigned
/// identifiers, layered over a [`KVStore`].
///
/// Every mutating call commits to the backing medium before returning.
/// There is no transaction spanning multiple documents: callers performing
/// multi-document updates (e.g. cascading feed cleanup) get best-effort
/// semantics, and a crash mid-operation can leave dangling references.
pub struct DocStore {
    kv: Arc<dyn KVStore>,
    snapshot: Snapshot,
    collections: BTreeSet<String>,
}

impl DocStore {
    /// Open a document store over `kv`, seeding the snapshot if the backing
    /// medium has never been initialized.
    pub fn open(kv: Arc<dyn KVStore>, snapshot: Snapshot) -> Result<Self, StoreError> {
        let collections: BTreeSet<String> = snapshot.names().map(str::to_string).collect();
        let store = Self {
            kv,
            snapshot,
            collections,
        };

        if store.kv.get(INIT_KEY)?.is_none() {
            info!("empty store, seeding initial snapshot");
            store.seed()?;
        }
        Ok(store)
    }

    /// Drop everything and restore the initial snapshot.
    ///
    /// This backs the unauthenticated `/resetdb` debug operation: any caller
    /// may invoke it, by design.
    pub fn reset(&self) -> Result<(), StoreError> {
        let mut stale = Vec::new();
        for prefix in ["doc:", "seq:", "meta:"] {
            for (key, _) in self.kv.scan(prefix)? {
                stale.push(key);
            }
        }
        let keys: Vec<&str> = stale.iter().map(String::as_str).collect();
        self.kv.batch_delete(&keys)?;
        self.seed()
    }

    fn seed(&self) -> Result<(), StoreError> {
        let mut owned: Vec<(String, Vec<u8>)> = Vec::new();

        for (collection, docs) in self.snapshot.collections() {
            let mut max_id: DocId = 0;
            for doc in docs {
                let id = doc_id(doc)?;
                max_id = max_id.max(id);
                let bytes = serde_json::to_vec(doc)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                owned.push((doc_key(collection, id), bytes));
            }
            owned.push((seq_key(collection), (max_id + 1).to_string().into_bytes()));
            debug!(collection, docs = docs.len(), "seeded collection");
        }
        owned.push((INIT_KEY.to_string(), b"1".to_vec()));

        let entries: Vec<(&str, &[u8])> = owned
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        self.kv.batch_set(&entries)?;
        Ok(())
    }

    fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        if self.collections.contains(collection) {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("collection {}", collection)))
        }
    }

    /// Allocate the next identifier for a collection. Identifiers count up
    /// and are never handed out twice, even after deletions.
    fn next_id(&self, collection: &str) -> Result<DocId, StoreError> {
        let key = seq_key(collection);
        let next = match self.kv.get(&key)? {
            Some(bytes) => String::from_utf8_lossy(&bytes)
                .parse::<DocId>()
                .map_err(|e| StoreError::Serialization(format!("bad sequence value: {}", e)))?,
            None => 1,
        };
        self.kv.set(&key, (next + 1).to_string().as_bytes())?;
        Ok(next)
    }

    /// Insert a document, assigning a fresh identifier. Returns the stored
    /// document, including its new `id`.
    pub fn create<T>(&self, collection: &str, doc: &T) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.ensure_collection(collection)?;

        let mut value =
            serde_json::to_value(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let obj = value
            .as_object_mut()
            .ok_or_else(|| StoreError::Serialization("document is not a JSON object".into()))?;

        let id = self.next_id(collection)?;
        obj.insert("id".to_string(), Value::from(id));

        let bytes =
            serde_json::to_vec(&value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.kv.set(&doc_key(collection, id), &bytes)?;

        serde_json::from_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read a document by identifier.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, id: DocId) -> Result<T, StoreError> {
        self.ensure_collection(collection)?;
        let bytes = self
            .kv
            .get(&doc_key(collection, id))?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Replace a stored document in place. The document must already carry
    /// a valid identifier.
    pub fn write<T: Serialize>(&self, collection: &str, doc: &T) -> Result<(), StoreError> {
        self.ensure_collection(collection)?;

        let value =
            serde_json::to_value(doc).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let id = doc_id(&value)?;

        let key = doc_key(collection, id);
        if self.kv.get(&key)?.is_none() {
            return Err(StoreError::NotFound(format!("{}/{}", collection, id)));
        }
        let bytes =
            serde_json::to_vec(&value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.kv.set(&key, &bytes)?;
        Ok(())
    }

    /// Remove a document. Deleting an absent identifier fails — a retried
    /// delete is not idempotent.
    pub fn delete(&self, collection: &str, id: DocId) -> Result<(), StoreError> {
        self.ensure_collection(collection)?;
        let key = doc_key(collection, id);
        if self.kv.get(&key)?.is_none() {
            return Err(StoreError::NotFound(format!("{}/{}", collection, id)));
        }
        self.kv.delete(&key)?;
        Ok(())
    }

    /// Enumerate a collection's identifiers in numeric order.
    pub fn list_ids(&self, collection: &str) -> Result<Vec<DocId>, StoreError> {
        self.ensure_collection(collection)?;
        let prefix = doc_prefix(collection);
        let mut ids = Vec::new();
        for (key, _) in self.kv.scan(&prefix)? {
            let raw = &key[prefix.len()..];
            let id = raw
                .parse::<DocId>()
                .map_err(|e| StoreError::Serialization(format!("bad document key {}: {}", key, e)))?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Enumerate a collection's documents in identifier order.
    pub fn all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        self.ensure_collection(collection)?;
        let mut docs = Vec::new();
        for (_, bytes) in self.kv.scan(&doc_prefix(collection))? {
            let doc = serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            docs.push(doc);
        }
        Ok(docs)
    }
}

/// Extract the numeric `id` field from a serialized document.
fn doc_id(value: &Value) -> Result<DocId, StoreError> {
    value
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| StoreError::Serialization("document has no numeric id".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    use ripple_kv::{MemoryStore, RedbStore};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Note {
        #[serde(default)]
        id: DocId,
        text: String,
    }

    fn snapshot() -> Snapshot {
        Snapshot::new()
            .with("notes", json!({"id": 1, "text": "first"}))
            .with("notes", json!({"id": 2, "text": "second"}))
            .collection("drafts")
    }

    fn open_mem() -> DocStore {
        DocStore::open(Arc::new(MemoryStore::new()), snapshot()).unwrap()
    }

    #[test]
    fn test_create_assigns_monotonic_ids() {
        let store = open_mem();
        let a: Note = store.create("notes", &Note { id: 0, text: "a".into() }).unwrap();
        let b: Note = store.create("notes", &Note { id: 0, text: "b".into() }).unwrap();
        // Fixture ids 1 and 2 are taken, so new ids start at 3.
        assert_eq!(a.id, 3);
        assert_eq!(b.id, 4);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let store = open_mem();
        let a: Note = store.create("drafts", &Note { id: 0, text: "a".into() }).unwrap();
        store.delete("drafts", a.id).unwrap();
        let b: Note = store.create("drafts", &Note { id: 0, text: "b".into() }).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_read_write_roundtrip() {
        let store = open_mem();
        let mut note: Note = store.read("notes", 1).unwrap();
        assert_eq!(note.text, "first");

        note.text = "edited".into();
        store.write("notes", &note).unwrap();
        let back: Note = store.read("notes", 1).unwrap();
        assert_eq!(back.text, "edited");
    }

    #[test]
    fn test_not_found_cases() {
        let store = open_mem();
        assert!(matches!(
            store.read::<Note>("notes", 99),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.write("notes", &Note { id: 99, text: "x".into() }),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.create("nope", &Note { id: 0, text: "x".into() }),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_second_delete_fails() {
        let store = open_mem();
        store.delete("notes", 1).unwrap();
        assert!(matches!(
            store.delete("notes", 1),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_ids_ordered() {
        let store = open_mem();
        store.create("notes", &Note { id: 0, text: "c".into() }).unwrap();
        assert_eq!(store.list_ids("notes").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_reset_restores_snapshot() {
        let store = open_mem();
        store.create("notes", &Note { id: 0, text: "extra".into() }).unwrap();
        store.delete("notes", 1).unwrap();

        store.reset().unwrap();

        assert_eq!(store.list_ids("notes").unwrap(), vec![1, 2]);
        let first: Note = store.read("notes", 1).unwrap();
        assert_eq!(first.text, "first");
        // The sequence restarts with the snapshot too.
        let next: Note = store.create("notes", &Note { id: 0, text: "x".into() }).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_identifiers_survive_reload() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let created: Note;
        {
            let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
            let store = DocStore::open(kv, snapshot()).unwrap();
            created = store.create("notes", &Note { id: 0, text: "persisted".into() }).unwrap();
        }
        let kv = Arc::new(RedbStore::open(tmp.path()).unwrap());
        let store = DocStore::open(kv, snapshot()).unwrap();
        // Already seeded: the reopen must not reseed over live data.
        let back: Note = store.read("notes", created.id).unwrap();
        assert_eq!(back, created);
        let next: Note = store.create("notes", &Note { id: 0, text: "later".into() }).unwrap();
        assert!(next.id > created.id);
    }
}
