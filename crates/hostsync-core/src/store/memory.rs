// # Memory Record Store
//
// In-memory implementation of RecordStore.
//
// ## Purpose
//
// A store with no persistence, for tests and embedded use where the
// committed snapshot is managed elsewhere. Everything is lost when the
// process exits.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::record_store::{Record, RecordStore};

/// In-memory record store implementation
///
/// # Example
///
/// ```rust,no_run
/// use hostsync_core::store::MemoryRecordStore;
/// use hostsync_core::traits::{Record, RecordStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryRecordStore::new();
///
///     store
///         .save(&[Record::new("example.com", "93.184.216.34")])
///         .await?;
///     assert_eq!(store.load().await?.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<RwLock<Vec<Record>>>,
}

impl MemoryRecordStore {
    /// Create a new empty memory record store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load(&self) -> Result<Vec<Record>, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, records: &[Record]) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        *guard = records.to_vec();
        Ok(())
    }
}

/// Factory for creating memory record stores
pub struct MemoryStoreFactory;

impl crate::traits::record_store::RecordStoreFactory for MemoryStoreFactory {
    fn create(
        &self,
        config: &crate::config::StoreConfig,
    ) -> Result<Box<dyn RecordStore>, Error> {
        match config {
            crate::config::StoreConfig::Memory => Ok(Box::new(MemoryRecordStore::new())),
            _ => Err(Error::config("Invalid config for memory record store")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_replaces_previous_contents() {
        let store = MemoryRecordStore::new();
        assert!(store.is_empty().await);

        store
            .save(&[
                Record::new("a.example", "192.0.2.1"),
                Record::new("b.example", "192.0.2.2"),
            ])
            .await
            .unwrap();
        assert_eq!(store.len().await, 2);

        store
            .save(&[Record::new("c.example", "192.0.2.3")])
            .await
            .unwrap();

        let records = store.load().await.unwrap();
        assert_eq!(records, vec![Record::new("c.example", "192.0.2.3")]);
    }
}
