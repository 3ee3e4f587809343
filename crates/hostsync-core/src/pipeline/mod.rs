//! Core publishing pipeline
//!
//! The Pipeline is responsible for:
//! - Fetching the current record list via RecordSource (with retry)
//! - Rendering the banner-wrapped hosts block
//! - Running change detection against the published README
//! - Publishing the hosts file, README, and JSON snapshot
//!
//! ## Control Flow
//!
//! ```text
//! ┌──────────────┐
//! │ RecordSource │─── Vec<Record> ───┐
//! └──────────────┘                   │
//!                                    ▼
//!                           ┌──────────────┐
//!                           │   Pipeline   │
//!                           └──────────────┘
//!                                    │
//!        ┌───────────────────────────┼───────────────────────────┐
//!        │                           │                           │
//!        ▼                           ▼                           ▼
//! ┌─────────────┐           ┌──────────────┐           ┌─────────────┐
//! │  Renderer   │           │  Publisher   │           │   Events    │
//! │  (format)   │           │  (write)     │           │  (notify)   │
//! └─────────────┘           └──────────────┘           └─────────────┘
//! ```
//!
//! One invocation performs at most one fetch (with retries), one
//! render, one comparison, and up to three writes, then returns. There
//! is no scheduling and no coordination between concurrent
//! invocations; two runs racing on the same file set end as
//! last-writer-wins.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::publish::Publisher;
use crate::render;
use crate::traits::record_store::Record;
use crate::traits::{RecordSource, RecordStore};

/// Events emitted by the Pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Run started
    Started,

    /// A fetch attempt failed transiently and will be retried
    FetchRetried {
        attempt: usize,
        error: String,
    },

    /// Content changed; README and snapshot were rewritten
    Published {
        record_count: usize,
    },

    /// Content unchanged; only the hosts file was rewritten
    Unchanged {
        record_count: usize,
    },
}

/// Outcome of a pipeline run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Whether the README and snapshot were rewritten
    pub changed: bool,
    /// Number of records rendered
    pub record_count: usize,
    /// The rendered hosts block (empty when no records were fetched)
    pub content: String,
}

/// Core publishing pipeline
///
/// ## Lifecycle
///
/// 1. Create with [`Pipeline::new()`]
/// 2. Run with [`Pipeline::run_once()`]
/// 3. Inspect the returned [`RunReport`] or the event stream
///
/// Each run is independent; the pipeline holds no mutable state
/// between runs.
pub struct Pipeline {
    /// Record source supplying the pair list
    source: Box<dyn RecordSource>,

    /// Record store persisting the JSON snapshot
    store: Box<dyn RecordStore>,

    /// Writer for the three output artifacts
    publisher: Publisher,

    /// Total fetch attempts for transient failures
    fetch_attempts: usize,

    /// Fixed delay between fetch attempts (in seconds)
    retry_delay_secs: u64,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<PipelineEvent>,
}

impl Pipeline {
    /// Create a new pipeline
    ///
    /// # Parameters
    ///
    /// - `source`: Record source implementation
    /// - `store`: Record store implementation
    /// - `config`: Pipeline configuration
    ///
    /// # Returns
    ///
    /// A tuple of (pipeline, event_receiver) where event_receiver
    /// yields pipeline events
    pub fn new(
        source: Box<dyn RecordSource>,
        store: Box<dyn RecordStore>,
        config: PipelineConfig,
    ) -> Result<(Self, mpsc::Receiver<PipelineEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.run.event_channel_capacity);

        let publisher = Publisher::new(
            &config.output.hosts_path,
            &config.output.readme_path,
            &config.output.template_path,
        );

        let pipeline = Self {
            source,
            store,
            publisher,
            fetch_attempts: config.run.fetch_attempts,
            retry_delay_secs: config.run.retry_delay_secs,
            event_tx: tx,
        };

        Ok((pipeline, rx))
    }

    /// Run the pipeline once, stamped with the current wall-clock time
    ///
    /// # Returns
    ///
    /// - `Ok(RunReport)`: The run completed; `changed` says whether the
    ///   README and snapshot were rewritten
    /// - `Err(Error)`: Fetch, render, or publish failed
    pub async fn run_once(&self) -> Result<RunReport> {
        self.run_once_at(Utc::now()).await
    }

    /// Run the pipeline once with an explicit timestamp
    ///
    /// The renderer is pure in `records` and `now`, so passing a fixed
    /// timestamp makes whole runs reproducible. Production callers
    /// should use [`run_once()`](Self::run_once).
    pub async fn run_once_at(&self, now: DateTime<Utc>) -> Result<RunReport> {
        self.emit_event(PipelineEvent::Started);
        info!("Starting publish run (source: {})", self.source.source_name());

        let records = self.fetch_with_retry().await?;

        if records.is_empty() {
            warn!("Record source returned no records, leaving all artifacts untouched");
            self.emit_event(PipelineEvent::Unchanged { record_count: 0 });
            return Ok(RunReport {
                changed: false,
                record_count: 0,
                content: String::new(),
            });
        }

        let content = render::render(&records, now);
        let update_time = render::format_update_time(now);

        let changed = self
            .publisher
            .publish(&content, &update_time, &records, &*self.store)
            .await?;

        if changed {
            info!("Published {} record(s)", records.len());
            self.emit_event(PipelineEvent::Published {
                record_count: records.len(),
            });
        } else {
            info!("Content unchanged ({} record(s))", records.len());
            self.emit_event(PipelineEvent::Unchanged {
                record_count: records.len(),
            });
        }

        Ok(RunReport {
            changed,
            record_count: records.len(),
            content,
        })
    }

    /// Fetch the record list, retrying transient failures
    ///
    /// Decode failures are deterministic and abort immediately; only
    /// errors flagged [`Error::is_transient()`] consume further
    /// attempts.
    async fn fetch_with_retry(&self) -> Result<Vec<Record>> {
        let mut last_error = None;

        for attempt in 1..=self.fetch_attempts {
            match self.source.fetch().await {
                Ok(records) => {
                    debug!(
                        "Fetched {} record(s) on attempt {}",
                        records.len(),
                        attempt
                    );
                    return Ok(records);
                }
                Err(e) if e.is_transient() && attempt < self.fetch_attempts => {
                    warn!(
                        "Fetch attempt {}/{} failed: {}",
                        attempt, self.fetch_attempts, e
                    );
                    self.emit_event(PipelineEvent::FetchRetried {
                        attempt,
                        error: e.to_string(),
                    });
                    last_error = Some(e);

                    if self.retry_delay_secs > 0 {
                        tokio::time::sleep(tokio::time::Duration::from_secs(
                            self.retry_delay_secs,
                        ))
                        .await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| Error::source("fetch produced no result")))
    }

    /// Emit a pipeline event
    fn emit_event(&self, event: PipelineEvent) {
        // Send event, logging a warning if the channel is full. The
        // event is then dropped rather than blocking the run.
        if self.event_tx.try_send(event).is_err() {
            warn!("Event channel full, dropping event. Consider increasing event_channel_capacity.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_events_are_comparable() {
        let event = PipelineEvent::Published { record_count: 3 };
        assert_eq!(event.clone(), event);
        assert_ne!(event, PipelineEvent::Unchanged { record_count: 3 });
    }
}
