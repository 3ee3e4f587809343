// # Record Source Trait
//
// Defines the interface for the external collaborator that supplies
// the current (name, address) pair list.
//
// ## Implementations
//
// - Snapshot-based: `SnapshotSource` reads a previously committed JSON
//   snapshot.
// - Fixed: `FixedSource` serves an in-memory list (tests, embedding).
// - External resolvers (anything that probes real infrastructure for
//   fresh addresses) live outside this crate and plug in through this
//   trait.
//
// ## Usage
//
// ```rust,ignore
// use hostsync_core::RecordSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* RecordSource implementation */;
//
//     let records = source.fetch().await?;
//     for record in &records {
//         println!("{} -> {}", record.name, record.address);
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::traits::record_store::Record;

/// Trait for record source implementations
///
/// Sources are observers of the outside world. They hand the pipeline
/// a pair list and nothing more: no rendering, no change detection, no
/// writes. Transient failures should surface as
/// [`Error::Source`](crate::Error::Source) so the pipeline retry loop
/// can pick them up; deterministic failures (a snapshot that does not
/// parse) should surface as [`Error::Decode`](crate::Error::Decode)
/// and fail the run immediately.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the current record list
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: The current pair list, in render order
    /// - `Err(Error)`: If the source cannot produce a list
    async fn fetch(&self) -> Result<Vec<Record>, crate::Error>;

    /// Human-readable source name for logging
    fn source_name(&self) -> &'static str;
}

impl std::fmt::Debug for dyn RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSource")
            .field("source_name", &self.source_name())
            .finish()
    }
}

/// Helper trait for constructing record sources from configuration
pub trait RecordSourceFactory: Send + Sync {
    /// Create a RecordSource instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this source type
    ///
    /// # Returns
    ///
    /// A boxed RecordSource trait object
    fn create(
        &self,
        config: &crate::config::SourceConfig,
    ) -> Result<Box<dyn RecordSource>, crate::Error>;
}
