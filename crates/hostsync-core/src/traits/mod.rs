//! Core traits for the hostsync pipeline
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`RecordSource`]: Supply the current (name, address) pair list
//! - [`RecordStore`]: Persist the pair list as a JSON snapshot

pub mod record_source;
pub mod record_store;

pub use record_source::{RecordSource, RecordSourceFactory};
pub use record_store::{Record, RecordStore, RecordStoreFactory};
