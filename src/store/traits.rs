//! Repository abstraction over record storage

use crate::catalog::{Record, RecordKind};
use async_trait::async_trait;

/// Storage failures surfaced to callers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },
}

/// Backing store for one record collection.
///
/// `list` returns a snapshot in storage order; the query engine works on
/// that snapshot and never on the live collection.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// All records in storage order
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Look up a record by id
    async fn get(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// Store a new record, assigning its id
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Replace the record with `id`, keeping its position and id
    async fn update(&self, id: &str, record: T) -> Result<T, StoreError>;

    /// Remove the record with `id`, returning it
    async fn delete(&self, id: &str) -> Result<T, StoreError>;

    /// Number of stored records
    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list().await?.len())
    }
}
