//! Test doubles and common utilities for pipeline contract tests
//!
//! These doubles count calls so tests can verify which side effects a
//! run actually performed.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hostsync_core::config::{OutputConfig, PipelineConfig, RunConfig};
use hostsync_core::error::{Error, Result};
use hostsync_core::store::MemoryRecordStore;
use hostsync_core::traits::{Record, RecordSource, RecordStore};

/// README template used by all pipeline tests
pub const TEMPLATE: &str =
    "# test readme\n\n```bash\n{hosts_str}```\n\nLast sync: {update_time}\n";

/// A record source that counts fetches
#[derive(Clone)]
pub struct CountingSource {
    records: Vec<Record>,
    fetch_count: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times fetch() was called
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for CountingSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }

    fn source_name(&self) -> &'static str {
        "counting"
    }
}

/// A record source that fails the first N fetches
#[derive(Clone)]
pub struct FlakySource {
    records: Vec<Record>,
    failures: usize,
    transient: bool,
    fetch_count: Arc<AtomicUsize>,
}

impl FlakySource {
    /// Fail the first `failures` fetches with a transient source error
    pub fn transient(records: Vec<Record>, failures: usize) -> Self {
        Self {
            records,
            failures,
            transient: true,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail every fetch with a decode error
    pub fn decode_failure() -> Self {
        Self {
            records: Vec::new(),
            failures: usize::MAX,
            transient: false,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for FlakySource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        let attempt = self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            if self.transient {
                return Err(Error::source("simulated transient failure"));
            }
            return Err(Error::decode("simulated malformed snapshot"));
        }
        Ok(self.records.clone())
    }

    fn source_name(&self) -> &'static str {
        "flaky"
    }
}

/// A record store that counts saves
#[derive(Clone, Default)]
pub struct CountingStore {
    inner: MemoryRecordStore,
    save_count: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of times save() was called
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn load(&self) -> Result<Vec<Record>> {
        self.inner.load().await
    }

    async fn save(&self, records: &[Record]) -> Result<()> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        self.inner.save(records).await
    }
}

/// Build a pipeline config writing into `dir`, with the template file
/// already in place and retry delays disabled for tests.
pub fn test_config(dir: &std::path::Path) -> PipelineConfig {
    std::fs::write(dir.join("README_template.md"), TEMPLATE).expect("template write succeeds");

    let mut config = PipelineConfig::new(OutputConfig {
        hosts_path: dir.join("hosts").to_string_lossy().into_owned(),
        readme_path: dir.join("README.md").to_string_lossy().into_owned(),
        template_path: dir.join("README_template.md").to_string_lossy().into_owned(),
    });
    config.run = RunConfig {
        fetch_attempts: 3,
        retry_delay_secs: 0,
        event_channel_capacity: 64,
    };
    config
}

/// The record pair the end-to-end scenario uses throughout
pub fn example_records() -> Vec<Record> {
    vec![Record::new("example.com", "93.184.216.34")]
}

/// Drain all currently buffered pipeline events
pub fn drain_events(
    rx: &mut tokio::sync::mpsc::Receiver<hostsync_core::PipelineEvent>,
) -> Vec<hostsync_core::PipelineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
