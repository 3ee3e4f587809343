// # Snapshot Record Source
//
// Serves the record list from a previously committed JSON snapshot.
//
// ## Purpose
//
// The republish path: a scheduled job that re-renders artifacts from
// the last committed `hosts.json` without any address discovery. An
// absent snapshot yields an empty list, which the pipeline treats as
// "nothing to publish".

use std::path::Path;

use async_trait::async_trait;

use crate::config::SourceConfig;
use crate::store::FileRecordStore;
use crate::traits::record_source::{RecordSource, RecordSourceFactory};
use crate::traits::record_store::{Record, RecordStore};
use crate::{Error, Result};

/// Record source backed by a committed JSON snapshot
pub struct SnapshotSource {
    store: FileRecordStore,
}

impl SnapshotSource {
    /// Create a source reading from the given snapshot path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            store: FileRecordStore::new(path),
        }
    }
}

#[async_trait]
impl RecordSource for SnapshotSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        self.store.load().await
    }

    fn source_name(&self) -> &'static str {
        "snapshot"
    }
}

/// Factory for creating snapshot sources
pub struct SnapshotFactory;

impl RecordSourceFactory for SnapshotFactory {
    fn create(&self, config: &SourceConfig) -> Result<Box<dyn RecordSource>> {
        match config {
            SourceConfig::Snapshot { path } => Ok(Box::new(SnapshotSource::new(path))),
            _ => Err(Error::config("Invalid config for snapshot record source")),
        }
    }
}
