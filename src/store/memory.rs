//! In-memory repository

use super::traits::{Repository, StoreError};
use crate::catalog::Record;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

struct Inner<T> {
    records: Vec<T>,
    next_id: u64,
}

/// Vec-backed repository guarded by an async lock.
///
/// Ids are decimal strings handed out from a counter that starts above the
/// largest numeric id already present, so deleted ids are never reused.
pub struct InMemoryRepository<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Start with existing records, keeping their ids
    pub fn with_records(records: Vec<T>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            inner: RwLock::new(Inner { records, next_id }),
        }
    }

    fn not_found(id: &str) -> StoreError {
        StoreError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, mut record: T) -> Result<T, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id.to_string();
        inner.next_id += 1;

        record.set_id(id);
        inner.records.push(record.clone());
        debug!("Inserted {} {}", T::KIND, record.id());
        Ok(record)
    }

    async fn update(&self, id: &str, mut record: T) -> Result<T, StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        record.set_id(id.to_string());
        *slot = record.clone();
        debug!("Updated {} {}", T::KIND, id);
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<T, StoreError> {
        let mut inner = self.inner.write().await;
        let idx = inner
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        debug!("Deleted {} {}", T::KIND, id);
        Ok(inner.records.remove(idx))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().await.records.len())
    }
}
