// # Fixed Record Source
//
// Serves a fixed in-memory record list.
//
// ## When to Use
//
// - Tests that need a deterministic pair list
// - Embedding, where the host application already has the records
// - Smoke runs with placeholder data

use async_trait::async_trait;

use crate::config::SourceConfig;
use crate::traits::record_source::{RecordSource, RecordSourceFactory};
use crate::traits::record_store::Record;
use crate::{Error, Result};

/// Record source that always returns the same list
#[derive(Debug, Clone)]
pub struct FixedSource {
    records: Vec<Record>,
}

impl FixedSource {
    /// Create a source serving the given records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for FixedSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// Factory for creating fixed sources
pub struct FixedFactory;

impl RecordSourceFactory for FixedFactory {
    fn create(&self, config: &SourceConfig) -> Result<Box<dyn RecordSource>> {
        match config {
            SourceConfig::Fixed { records } => Ok(Box::new(FixedSource::new(records.clone()))),
            _ => Err(Error::config("Invalid config for fixed record source")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_returns_the_configured_records() {
        let records = vec![
            Record::new("example.com", "93.184.216.34"),
            Record::new("example.org", "93.184.216.35"),
        ];
        let source = FixedSource::new(records.clone());

        assert_eq!(source.fetch().await.unwrap(), records);
        // Repeated fetches are stable
        assert_eq!(source.fetch().await.unwrap(), records);
    }
}
