pub mod comment;
pub mod fixture;
pub mod item;
pub mod resolve;
pub mod search;

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use ripple_kv::KVStore;
use ripple_store::{DocStore, StoreError};

/// Collection names of the persisted layout.
pub const USERS: &str = "users";
pub const FEEDS: &str = "feeds";
pub const FEED_ITEMS: &str = "feedItems";

/// Feed service error type.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<StoreError> for FeedError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(m) => FeedError::NotFound(m),
            StoreError::Storage(m) => FeedError::Storage(m),
            StoreError::Serialization(m) => FeedError::Internal(m),
        }
    }
}

impl From<FeedError> for ripple_core::ServiceError {
    fn from(e: FeedError) -> Self {
        match e {
            FeedError::NotFound(m) => ripple_core::ServiceError::NotFound(m),
            FeedError::Validation(m) => ripple_core::ServiceError::Validation(m),
            FeedError::Unauthorized(m) => ripple_core::ServiceError::Unauthorized(m),
            FeedError::Storage(m) => ripple_core::ServiceError::Storage(m),
            FeedError::Internal(m) => ripple_core::ServiceError::Internal(m),
        }
    }
}

/// The feed service: mutation engine, reference resolver, and search over
/// one document store.
pub struct FeedService {
    pub(crate) store: DocStore,
    mutate: Mutex<()>,
}

impl FeedService {
    /// Create a new FeedService, seeding the fixture snapshot if the
    /// backing medium is empty.
    pub fn new(kv: Arc<dyn KVStore>) -> Result<Arc<Self>, FeedError> {
        let store = DocStore::open(kv, fixture::snapshot())?;
        Ok(Arc::new(Self {
            store,
            mutate: Mutex::new(()),
        }))
    }

    /// Exclusive section for read-modify-write sequences.
    ///
    /// The runtime handles requests in parallel, so without this two
    /// concurrent likes could read the same like-list and one write would
    /// drop the other. Every mutation holds the guard from first read to
    /// last write.
    pub(crate) fn mutation_guard(&self) -> MutexGuard<'_, ()> {
        self.mutate.lock().unwrap()
    }

    /// Restore the fixture snapshot. Backs the unauthenticated `/resetdb`
    /// debug endpoint.
    pub fn reset(&self) -> Result<(), FeedError> {
        let _guard = self.mutation_guard();
        self.store.reset()?;
        Ok(())
    }
}
