//! Plugin-based component registry
//!
//! The registry allows record sources and record stores to be
//! registered dynamically at runtime, avoiding hardcoded if-else
//! chains in embedders and the daemon.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hostsync_core::registry::{SourceRegistry, builtin_registry};
//! use hostsync_core::config::SourceConfig;
//!
//! # fn try_main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = builtin_registry();
//!
//! let config = SourceConfig::Snapshot {
//!     path: "hosts.json".to_string(),
//! };
//! let source = registry.create_source(&config)?;
//! # Ok(())
//! # }
//! ```
//!
//! External crates register their own factories under a name and
//! select them through the `Custom { factory, .. }` config variants.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::{SourceConfig, StoreConfig};
use crate::error::{Error, Result};
use crate::traits::{RecordSource, RecordSourceFactory, RecordStore, RecordStoreFactory};

/// Registry of record source and record store factories
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing
/// concurrent reads and exclusive writes.
#[derive(Default)]
pub struct SourceRegistry {
    /// Registered record source factories
    sources: RwLock<HashMap<String, Box<dyn RecordSourceFactory>>>,

    /// Registered record store factories
    stores: RwLock<HashMap<String, Box<dyn RecordStoreFactory>>>,
}

impl SourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record source factory
    ///
    /// # Parameters
    ///
    /// - `name`: Source type name (e.g., "snapshot", "fixed")
    /// - `factory`: Factory object for creating source instances
    pub fn register_source(&self, name: impl Into<String>, factory: Box<dyn RecordSourceFactory>) {
        let name = name.into();
        let mut sources = self.sources.write().unwrap();
        sources.insert(name, factory);
    }

    /// Register a record store factory
    ///
    /// # Parameters
    ///
    /// - `name`: Store type name (e.g., "file", "memory")
    /// - `factory`: Factory object for creating store instances
    pub fn register_store(&self, name: impl Into<String>, factory: Box<dyn RecordStoreFactory>) {
        let name = name.into();
        let mut stores = self.stores.write().unwrap();
        stores.insert(name, factory);
    }

    /// Create a record source from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn RecordSource>)`: Created source instance
    /// - `Err(Error)`: If the source type is not registered or creation fails
    pub fn create_source(&self, config: &SourceConfig) -> Result<Box<dyn RecordSource>> {
        let source_type = config.type_name();
        let sources = self.sources.read().unwrap();

        let factory = sources
            .get(source_type)
            .ok_or_else(|| Error::config(format!("Unknown record source type: {}", source_type)))?;

        factory.create(config)
    }

    /// Create a record store from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn RecordStore>)`: Created store instance
    /// - `Err(Error)`: If the store type is not registered or creation fails
    pub fn create_store(&self, config: &StoreConfig) -> Result<Box<dyn RecordStore>> {
        let store_type = config.type_name();
        let stores = self.stores.read().unwrap();

        let factory = stores
            .get(store_type)
            .ok_or_else(|| Error::config(format!("Unknown record store type: {}", store_type)))?;

        factory.create(config)
    }

    /// List all registered source types
    pub fn list_sources(&self) -> Vec<String> {
        let sources = self.sources.read().unwrap();
        sources.keys().cloned().collect()
    }

    /// List all registered store types
    pub fn list_stores(&self) -> Vec<String> {
        let stores = self.stores.read().unwrap();
        stores.keys().cloned().collect()
    }

    /// Check if a source type is registered
    pub fn has_source(&self, name: &str) -> bool {
        let sources = self.sources.read().unwrap();
        sources.contains_key(name)
    }

    /// Check if a store type is registered
    pub fn has_store(&self, name: &str) -> bool {
        let stores = self.stores.read().unwrap();
        stores.contains_key(name)
    }
}

/// Create a registry with all built-in sources and stores registered
pub fn builtin_registry() -> SourceRegistry {
    let registry = SourceRegistry::new();
    registry.register_source("snapshot", Box::new(crate::source::SnapshotFactory));
    registry.register_source("fixed", Box::new(crate::source::FixedFactory));
    registry.register_store("file", Box::new(crate::store::FileStoreFactory));
    registry.register_store("memory", Box::new(crate::store::MemoryStoreFactory));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSourceFactory;

    impl RecordSourceFactory for FailingSourceFactory {
        fn create(&self, _config: &SourceConfig) -> Result<Box<dyn RecordSource>> {
            Err(Error::config("not implemented"))
        }
    }

    #[test]
    fn registration_round_trip() {
        let registry = SourceRegistry::new();

        assert!(!registry.has_source("mock"));
        registry.register_source("mock", Box::new(FailingSourceFactory));
        assert!(registry.has_source("mock"));
        assert!(registry.list_sources().contains(&"mock".to_string()));
    }

    #[test]
    fn builtin_registry_covers_config_defaults() {
        let registry = builtin_registry();

        registry.create_source(&SourceConfig::default()).unwrap();
        registry.create_store(&StoreConfig::default()).unwrap();
        registry.create_store(&StoreConfig::Memory).unwrap();
    }

    #[test]
    fn unknown_type_is_a_config_error() {
        let registry = builtin_registry();
        let config = SourceConfig::Custom {
            factory: "nonexistent".to_string(),
            config: serde_json::json!({}),
        };
        assert!(matches!(
            registry.create_source(&config).unwrap_err(),
            Error::Config(_)
        ));
    }
}
