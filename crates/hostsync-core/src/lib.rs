// # hostsync-core
//
// Core library for the hostsync publishing pipeline.
//
// ## Architecture Overview
//
// This library keeps a hosts-override file, a JSON record snapshot,
// and a README block in sync for a configured set of domains:
// - **RecordSource**: Trait for the collaborator that supplies the
//   current (name, address) pair list
// - **RecordStore**: Trait for persisting the pair list as JSON
// - **render**: Pure formatting of the banner-wrapped hosts block
// - **diff**: Change detection against the published README
// - **Publisher**: Conditional writes of the three output artifacts
// - **Pipeline**: Orchestrates fetch → render → compare → publish
// - **SourceRegistry**: Plugin-based registry for sources and stores
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Address discovery is not this
//    crate's business; it arrives through the RecordSource seam
// 2. **Idempotency**: Rendering is pure and change detection ignores
//    the timestamp line, so an unchanged record list never rewrites
//    the README or snapshot
// 3. **Library-First**: The daemon is a thin wrapper; everything here
//    can be embedded directly

pub mod config;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod publish;
pub mod registry;
pub mod render;
pub mod source;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::{OutputConfig, PipelineConfig, SourceConfig, StoreConfig};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineEvent, RunReport};
pub use publish::Publisher;
pub use registry::{SourceRegistry, builtin_registry};
pub use source::{FixedSource, SnapshotSource};
pub use store::{FileRecordStore, MemoryRecordStore};
pub use traits::{Record, RecordSource, RecordStore};
