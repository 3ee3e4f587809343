// # Record Store Trait
//
// Defines the interface for persisting the hosts record snapshot.
//
// ## Purpose
//
// The record store owns the lifecycle of the JSON snapshot file:
// created on the first successful publish, overwritten on each
// subsequent publish where the rendered content changed.
//
// ## Wire Format
//
// A JSON array of 2-element string arrays, UTF-8, insertion order
// preserved:
//
// ```json
// [
//   ["example.com", "93.184.216.34"],
//   ["api.example.com", "2606:2800:220:1::1"]
// ]
// ```
//
// ## Implementations
//
// - File-based: `FileRecordStore` (JSON on disk, atomic writes)
// - In-memory: `MemoryRecordStore` (tests and embedding)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single hosts entry: a hostname and the address it resolves to.
///
/// Serialized as a 2-element JSON array to stay compatible with the
/// committed snapshot format. A malformed element (wrong arity or a
/// non-string field) fails the whole load; there is no partial
/// recovery.
///
/// Order in a record list matters for rendering but carries no other
/// meaning. Duplicates are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Record {
    /// Domain name or hostname
    pub name: String,
    /// IPv4/IPv6 literal
    pub address: String,
}

impl Record {
    /// Create a new record
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

impl From<(String, String)> for Record {
    fn from((name, address): (String, String)) -> Self {
        Self { name, address }
    }
}

impl From<Record> for (String, String) {
    fn from(record: Record) -> Self {
        (record.name, record.address)
    }
}

/// Trait for record store implementations
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Contract
///
/// - `load()` on an absent file returns an empty list, not an error.
///   Some deployments run before any snapshot has ever been committed;
///   treating absence as fatal would make first runs impossible.
/// - `load()` on a present but malformed file returns
///   [`Error::Decode`](crate::Error::Decode).
/// - `save()` either succeeds completely or leaves the previous
///   snapshot untouched.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the persisted record list
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: The stored records (empty if no snapshot exists)
    /// - `Err(Error)`: Decode failure or storage error
    async fn load(&self) -> Result<Vec<Record>, crate::Error>;

    /// Persist the record list, replacing any previous snapshot
    ///
    /// # Parameters
    ///
    /// - `records`: The records to persist, in render order
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Successfully persisted
    /// - `Err(Error)`: Storage error
    async fn save(&self, records: &[Record]) -> Result<(), crate::Error>;
}

/// Helper trait for constructing record stores from configuration
pub trait RecordStoreFactory: Send + Sync {
    /// Create a RecordStore instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this record store type
    ///
    /// # Returns
    ///
    /// A boxed RecordStore trait object
    fn create(
        &self,
        config: &crate::config::StoreConfig,
    ) -> Result<Box<dyn RecordStore>, crate::Error>;
}
