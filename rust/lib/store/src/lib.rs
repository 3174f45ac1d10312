pub mod error;
pub mod snapshot;
pub mod store;

pub use error::StoreError;
pub use snapshot::Snapshot;
pub use store::{DocId, DocStore};
