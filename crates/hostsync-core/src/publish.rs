//! Publisher
//!
//! Owns the three output artifacts and their write ordering:
//!
//! 1. The hosts-format file is rewritten on every run, unconditionally.
//! 2. The README is re-rendered from its template only when the change
//!    detector reports a difference.
//! 3. The JSON snapshot is persisted through the record store, also
//!    only on change.
//!
//! Any I/O failure aborts the publish and surfaces to the caller. The
//! hosts write in step 1 may already have landed by then; the three
//! files are not a transaction and this window is accepted.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::Error;
use crate::diff;
use crate::traits::record_store::{Record, RecordStore};

/// Placeholder in the README template replaced with the rendered block
const HOSTS_PLACEHOLDER: &str = "{hosts_str}";

/// Placeholder in the README template replaced with the update timestamp
const UPDATE_TIME_PLACEHOLDER: &str = "{update_time}";

/// Writes the hosts file, README, and JSON snapshot
#[derive(Debug, Clone)]
pub struct Publisher {
    hosts_path: PathBuf,
    readme_path: PathBuf,
    template_path: PathBuf,
}

impl Publisher {
    /// Create a publisher for the given output paths
    pub fn new<P: AsRef<Path>>(hosts_path: P, readme_path: P, template_path: P) -> Self {
        Self {
            hosts_path: hosts_path.as_ref().to_path_buf(),
            readme_path: readme_path.as_ref().to_path_buf(),
            template_path: template_path.as_ref().to_path_buf(),
        }
    }

    /// Publish rendered content, persisting the snapshot when it changed
    ///
    /// Returns `true` when the README and snapshot were rewritten,
    /// `false` when the content was already up to date (the hosts file
    /// is rewritten either way).
    pub async fn publish(
        &self,
        content: &str,
        update_time: &str,
        records: &[Record],
        store: &dyn RecordStore,
    ) -> Result<bool, Error> {
        self.write_hosts_file(content).await?;

        let existing_readme = self.read_readme().await?;
        if !diff::has_changed(content, existing_readme.as_deref()) {
            tracing::info!("Hosts content unchanged, skipping README and snapshot");
            return Ok(false);
        }

        self.write_readme(content, update_time).await?;
        store.save(records).await?;
        Ok(true)
    }

    /// Write the hosts-format file verbatim
    async fn write_hosts_file(&self, content: &str) -> Result<(), Error> {
        if let Some(parent) = self.hosts_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::publish(format!(
                        "Failed to create output directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        fs::write(&self.hosts_path, content).await.map_err(|e| {
            Error::publish(format!(
                "Failed to write hosts file {}: {}",
                self.hosts_path.display(),
                e
            ))
        })?;

        tracing::info!("Wrote hosts file to {}", self.hosts_path.display());
        Ok(())
    }

    /// Read the previously published README, absent file mapping to `None`
    async fn read_readme(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.readme_path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::publish(format!(
                "Failed to read README {}: {}",
                self.readme_path.display(),
                e
            ))),
        }
    }

    /// Render the README template and write it
    async fn write_readme(&self, content: &str, update_time: &str) -> Result<(), Error> {
        let template = fs::read_to_string(&self.template_path).await.map_err(|e| {
            Error::publish(format!(
                "Failed to read README template {}: {}",
                self.template_path.display(),
                e
            ))
        })?;

        let rendered = template
            .replace(HOSTS_PLACEHOLDER, content)
            .replace(UPDATE_TIME_PLACEHOLDER, update_time);

        fs::write(&self.readme_path, rendered).await.map_err(|e| {
            Error::publish(format!(
                "Failed to write README {}: {}",
                self.readme_path.display(),
                e
            ))
        })?;

        tracing::info!("Updated README at {}", self.readme_path.display());
        Ok(())
    }
}
