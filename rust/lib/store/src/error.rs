use ripple_kv::KVError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<KVError> for StoreError {
    fn from(e: KVError) -> Self {
        match e {
            KVError::Storage(m) => StoreError::Storage(m),
            KVError::Serialization(m) => StoreError::Serialization(m),
        }
    }
}
