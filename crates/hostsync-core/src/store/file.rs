// # File Record Store
//
// File-based implementation of RecordStore.
//
// ## Purpose
//
// Persists the record list as the committed `hosts.json` snapshot:
// a JSON array of `[name, address]` pairs, pretty-printed, UTF-8 with
// non-ASCII characters written verbatim.
//
// ## Durability
//
// - Atomic writes: new content goes to a temporary file which is then
//   renamed over the snapshot, so a crashed save leaves the previous
//   snapshot intact.
// - Absent snapshot: `load()` returns an empty list. First runs happen
//   before any snapshot exists.
// - Malformed snapshot: `load()` fails with a decode error. No partial
//   recovery is attempted.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::traits::record_store::{Record, RecordStore};

/// File-based record store
///
/// # Example
///
/// ```rust,no_run
/// use hostsync_core::store::FileRecordStore;
/// use hostsync_core::traits::{Record, RecordStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileRecordStore::new("hosts.json");
///
///     store
///         .save(&[Record::new("example.com", "93.184.216.34")])
///         .await?;
///
///     let records = store.load().await?;
///     assert_eq!(records.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    /// Create a store backed by the given snapshot path
    ///
    /// The file is not touched until the first `load()` or `save()`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get path to the temporary file used for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn load(&self) -> Result<Vec<Record>, Error> {
        if !self.path.exists() {
            tracing::info!(
                "Snapshot {} not found, treating as empty record list",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            Error::store(format!(
                "Failed to read snapshot {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let records: Vec<Record> = serde_json::from_str(&content).map_err(|e| {
            Error::decode(format!(
                "Snapshot {} is not a valid array of [name, address] pairs: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(
            "Loaded {} record(s) from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    async fn save(&self, records: &[Record]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::store(format!(
                        "Failed to create snapshot directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // serde_json writes non-ASCII characters as-is, matching the
        // committed snapshot's full-Unicode format.
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| Error::store(format!("Failed to serialize records: {}", e)))?;

        // Write to temporary file first
        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::store(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::store(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::store(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        // Atomic rename (temp -> snapshot)
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::store(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(
            "Wrote {} record(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Factory for creating file record stores
pub struct FileStoreFactory;

impl crate::traits::record_store::RecordStoreFactory for FileStoreFactory {
    fn create(&self, config: &crate::config::StoreConfig) -> Result<Box<dyn RecordStore>, Error> {
        match config {
            crate::config::StoreConfig::File { path } => Ok(Box::new(FileRecordStore::new(path))),
            _ => Err(Error::config("Invalid config for file record store")),
        }
    }
}
