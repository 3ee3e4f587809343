//! Configuration types for the hostsync pipeline
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

use crate::traits::record_store::Record;

/// Main pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Record source configuration
    pub source: SourceConfig,

    /// Record store configuration
    pub store: StoreConfig,

    /// Output artifact paths
    pub output: OutputConfig,

    /// Hostnames handed to address-discovering sources
    ///
    /// Kept in configuration rather than as a process-wide constant so
    /// embedders can sync whatever domain set they need. Sources that
    /// replay a committed snapshot ignore it, so it may be empty.
    #[serde(default)]
    pub domains: Vec<String>,

    /// Optional run settings
    #[serde(default)]
    pub run: RunConfig,
}

impl PipelineConfig {
    /// Create a configuration with default source/store/run settings
    pub fn new(output: OutputConfig) -> Self {
        Self {
            source: SourceConfig::default(),
            store: StoreConfig::default(),
            output,
            domains: Vec::new(),
            run: RunConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.output.validate()?;
        self.source.validate()?;
        self.run.validate()?;

        for domain in &self.domains {
            validate_domain_name(domain)?;
        }

        Ok(())
    }
}

/// Record source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Replay a previously committed JSON snapshot
    Snapshot {
        /// Path to the snapshot file
        path: String,
    },

    /// Serve a fixed in-memory record list
    Fixed {
        /// The records to serve
        records: Vec<Record>,
    },

    /// Custom record source
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl SourceConfig {
    /// Validate the source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            SourceConfig::Snapshot { path } => {
                if path.is_empty() {
                    return Err(crate::Error::config("Snapshot source path cannot be empty"));
                }
                Ok(())
            }
            SourceConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom record source factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom record source config cannot be null",
                    ));
                }
                Ok(())
            }
            SourceConfig::Fixed { .. } => Ok(()),
        }
    }

    /// Get the source type name
    pub fn type_name(&self) -> &str {
        match self {
            SourceConfig::Snapshot { .. } => "snapshot",
            SourceConfig::Fixed { .. } => "fixed",
            SourceConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Snapshot {
            path: "hosts.json".to_string(),
        }
    }
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// File-based record store
    File {
        /// Path to the snapshot file
        path: String,
    },

    /// In-memory record store (not persistent)
    Memory,

    /// Custom record store
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl StoreConfig {
    /// Get the store type name
    pub fn type_name(&self) -> &str {
        match self {
            StoreConfig::File { .. } => "file",
            StoreConfig::Memory => "memory",
            StoreConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: "hosts.json".to_string(),
        }
    }
}

/// Output artifact paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the hosts-format file (rewritten on every run)
    pub hosts_path: String,

    /// Path of the README (rewritten only on change)
    pub readme_path: String,

    /// Path of the README template with `{hosts_str}` and
    /// `{update_time}` placeholders
    pub template_path: String,
}

impl OutputConfig {
    /// Validate the output configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.hosts_path.is_empty() {
            return Err(crate::Error::config("Hosts output path cannot be empty"));
        }
        if self.readme_path.is_empty() {
            return Err(crate::Error::config("README output path cannot be empty"));
        }
        if self.template_path.is_empty() {
            return Err(crate::Error::config("README template path cannot be empty"));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            hosts_path: "hosts".to_string(),
            readme_path: "README.md".to_string(),
            template_path: "README_template.md".to_string(),
        }
    }
}

/// Run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Total fetch attempts for transient source failures
    #[serde(default = "default_fetch_attempts")]
    pub fetch_attempts: usize,

    /// Fixed delay between fetch attempts (in seconds)
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,

    /// Capacity of the pipeline event channel
    ///
    /// When full, new events are dropped with a warning log.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl RunConfig {
    /// Validate the run settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.fetch_attempts == 0 {
            return Err(crate::Error::config("fetch_attempts must be at least 1"));
        }
        if self.event_channel_capacity == 0 {
            return Err(crate::Error::config(
                "event_channel_capacity must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            fetch_attempts: default_fetch_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

fn default_fetch_attempts() -> usize {
    3
}

fn default_retry_delay_secs() -> u64 {
    1
}

fn default_event_channel_capacity() -> usize {
    64
}

/// Validate that a string is a valid domain name
///
/// Basic RFC 1035 checks: total and per-label length limits,
/// alphanumeric-and-hyphen labels, no leading or trailing hyphen.
pub fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    if domain.is_empty() {
        return Err(crate::Error::config("Domain name cannot be empty"));
    }

    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Domain name too long: {} chars (max 253): {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Domain label too long: {} chars (max 63): '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(crate::Error::config(format!(
                "Domain label contains invalid characters: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Domain label cannot start or end with hyphen: '{}'",
                label
            )));
        }
    }

    Ok(())
}
