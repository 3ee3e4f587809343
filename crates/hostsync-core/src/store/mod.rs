//! Record store implementations
//!
//! - [`FileRecordStore`]: Persistent JSON snapshot on disk
//! - [`MemoryRecordStore`]: Non-persistent store for testing and embedding

pub mod file;
pub mod memory;

pub use file::{FileRecordStore, FileStoreFactory};
pub use memory::{MemoryRecordStore, MemoryStoreFactory};
