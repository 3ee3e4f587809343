//! Minimal embedding example for hostsync-core
//!
//! This example demonstrates using hostsync-core as a library in a
//! custom application: a hand-written record source feeds the
//! pipeline, and artifacts are written into a scratch directory.

use std::path::PathBuf;

use hostsync_core::config::{OutputConfig, PipelineConfig, RunConfig, SourceConfig, StoreConfig};
use hostsync_core::store::MemoryRecordStore;
use hostsync_core::traits::{Record, RecordSource};
use hostsync_core::{Pipeline, Result};

/// Custom record source for embedded usage
///
/// A real embedder would resolve addresses here; this demo serves a
/// canned list.
struct EmbeddedSource {
    records: Vec<Record>,
}

#[async_trait::async_trait]
impl RecordSource for EmbeddedSource {
    async fn fetch(&self) -> Result<Vec<Record>> {
        println!("[Embedded] Serving {} record(s)", self.records.len());
        Ok(self.records.clone())
    }

    fn source_name(&self) -> &'static str {
        "embedded"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Embedded hostsync-core Example ===\n");

    let workdir: PathBuf = std::env::temp_dir().join("hostsync-embedded-demo");
    std::fs::create_dir_all(&workdir).map_err(hostsync_core::Error::Io)?;

    let template_path = workdir.join("README_template.md");
    std::fs::write(
        &template_path,
        "# demo\n\n```bash\n{hosts_str}```\n\nLast sync: {update_time}\n",
    )
    .map_err(hostsync_core::Error::Io)?;

    // Custom components
    let source = EmbeddedSource {
        records: vec![
            Record::new("github.com", "140.82.112.3"),
            Record::new("api.github.com", "140.82.112.6"),
            Record::new("raw.githubusercontent.com", "185.199.108.133"),
        ],
    };
    let store = MemoryRecordStore::new();

    // Configuration
    let config = PipelineConfig {
        source: SourceConfig::Fixed { records: vec![] }, // components are passed directly below
        store: StoreConfig::Memory,
        output: OutputConfig {
            hosts_path: workdir.join("hosts").to_string_lossy().into_owned(),
            readme_path: workdir.join("README.md").to_string_lossy().into_owned(),
            template_path: template_path.to_string_lossy().into_owned(),
        },
        domains: vec![
            "github.com".to_string(),
            "api.github.com".to_string(),
            "raw.githubusercontent.com".to_string(),
        ],
        run: RunConfig::default(),
    };

    println!("1. Creating pipeline...");
    let (pipeline, mut event_rx) = Pipeline::new(Box::new(source), Box::new(store), config)?;

    println!("2. First run (everything is new)...");
    let first = pipeline.run_once().await?;
    println!("   changed = {}", first.changed);

    println!("3. Second run (same records)...");
    let second = pipeline.run_once().await?;
    println!("   changed = {}", second.changed);

    println!("\n4. Events observed:");
    while let Ok(event) = event_rx.try_recv() {
        println!("   [Event] {:?}", event);
    }

    println!("\n5. Rendered content:\n{}", second.content);
    println!("Artifacts written under {}", workdir.display());

    Ok(())
}
