// # hostsyncd - hostsync runner
//
// A THIN integration layer: all pipeline logic lives in hostsync-core.
// The runner is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing the runtime and tracing
// 3. Building the source, store, and pipeline from the registry
// 4. Running the pipeline exactly once and mapping the outcome to an
//    exit code
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Record Source
// - `HOSTSYNC_SOURCE_TYPE`: Type of record source (snapshot, fixed)
// - `HOSTSYNC_SOURCE_PATH`: Snapshot file to read (for snapshot)
//
// ### Record Store
// - `HOSTSYNC_STORE_TYPE`: Type of record store (file, memory)
// - `HOSTSYNC_STORE_PATH`: Path of the JSON snapshot (for file store)
//
// ### Outputs
// - `HOSTSYNC_HOSTS_PATH`: Hosts-format output file
// - `HOSTSYNC_README_PATH`: README output file
// - `HOSTSYNC_TEMPLATE_PATH`: README template with {hosts_str} and
//   {update_time} placeholders
//
// ### Domains
// - `HOSTSYNC_DOMAINS`: Comma-separated hostnames handed to
//   address-discovering sources (optional for snapshot sources)
//
// ### Run
// - `HOSTSYNC_FETCH_ATTEMPTS`: Total fetch attempts
// - `HOSTSYNC_RETRY_DELAY_SECS`: Delay between fetch attempts
// - `HOSTSYNC_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export HOSTSYNC_SOURCE_TYPE=snapshot
// export HOSTSYNC_SOURCE_PATH=hosts.json
// export HOSTSYNC_STORE_PATH=hosts.json
// export HOSTSYNC_HOSTS_PATH=hosts
//
// hostsyncd
// ```

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use hostsync_core::config::{
    OutputConfig, PipelineConfig, RunConfig, SourceConfig, StoreConfig, validate_domain_name,
};
use hostsync_core::{Pipeline, builtin_registry};

/// Exit codes for different termination scenarios
///
/// - 0: Run completed (published or unchanged)
/// - 1: Configuration or startup error
/// - 2: Runtime error (fetch or publish failed)
#[derive(Debug, Clone, Copy)]
enum HostsyncExitCode {
    /// Run completed successfully
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<HostsyncExitCode> for ExitCode {
    fn from(code: HostsyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    source_type: String,
    source_path: String,
    store_type: String,
    store_path: String,
    hosts_path: String,
    readme_path: String,
    template_path: String,
    domains: Vec<String>,
    fetch_attempts: Option<usize>,
    retry_delay_secs: Option<u64>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            source_type: env::var("HOSTSYNC_SOURCE_TYPE")
                .unwrap_or_else(|_| "snapshot".to_string()),
            source_path: env::var("HOSTSYNC_SOURCE_PATH")
                .unwrap_or_else(|_| "hosts.json".to_string()),
            store_type: env::var("HOSTSYNC_STORE_TYPE").unwrap_or_else(|_| "file".to_string()),
            store_path: env::var("HOSTSYNC_STORE_PATH")
                .unwrap_or_else(|_| "hosts.json".to_string()),
            hosts_path: env::var("HOSTSYNC_HOSTS_PATH").unwrap_or_else(|_| "hosts".to_string()),
            readme_path: env::var("HOSTSYNC_README_PATH")
                .unwrap_or_else(|_| "README.md".to_string()),
            template_path: env::var("HOSTSYNC_TEMPLATE_PATH")
                .unwrap_or_else(|_| "README_template.md".to_string()),
            domains: env::var("HOSTSYNC_DOMAINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            fetch_attempts: env::var("HOSTSYNC_FETCH_ATTEMPTS")
                .ok()
                .map(|s| s.parse().unwrap_or(3)),
            retry_delay_secs: env::var("HOSTSYNC_RETRY_DELAY_SECS")
                .ok()
                .map(|s| s.parse().unwrap_or(1)),
            log_level: env::var("HOSTSYNC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        match self.source_type.as_str() {
            "snapshot" | "fixed" => {}
            _ => anyhow::bail!(
                "HOSTSYNC_SOURCE_TYPE '{}' is not supported. \
                Supported types: snapshot, fixed",
                self.source_type
            ),
        }

        match self.store_type.as_str() {
            "file" | "memory" => {}
            _ => anyhow::bail!(
                "HOSTSYNC_STORE_TYPE '{}' is not supported. \
                Supported types: file, memory",
                self.store_type
            ),
        }

        if self.source_type == "snapshot" && self.source_path.is_empty() {
            anyhow::bail!(
                "HOSTSYNC_SOURCE_PATH cannot be empty when HOSTSYNC_SOURCE_TYPE=snapshot. \
                Set it via: export HOSTSYNC_SOURCE_PATH=hosts.json"
            );
        }

        if self.store_type == "file" {
            if self.store_path.is_empty() {
                anyhow::bail!(
                    "HOSTSYNC_STORE_PATH cannot be empty when HOSTSYNC_STORE_TYPE=file"
                );
            }

            if let Some(parent) = std::path::Path::new(&self.store_path).parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                anyhow::bail!(
                    "HOSTSYNC_STORE_PATH parent directory does not exist: {}. \
                        Create it first: mkdir -p {}",
                    parent.display(),
                    parent.display()
                );
            }
        }

        if self.hosts_path.is_empty() {
            anyhow::bail!("HOSTSYNC_HOSTS_PATH cannot be empty");
        }
        if self.readme_path.is_empty() {
            anyhow::bail!("HOSTSYNC_README_PATH cannot be empty");
        }
        if self.template_path.is_empty() {
            anyhow::bail!("HOSTSYNC_TEMPLATE_PATH cannot be empty");
        }

        for domain in &self.domains {
            validate_domain_name(domain)
                .map_err(|e| anyhow::anyhow!("HOSTSYNC_DOMAINS entry rejected: {}", e))?;
        }

        if let Some(attempts) = self.fetch_attempts
            && (attempts == 0 || attempts > 10)
        {
            anyhow::bail!(
                "HOSTSYNC_FETCH_ATTEMPTS must be between 1 and 10. Got: {}",
                attempts
            );
        }

        if let Some(delay) = self.retry_delay_secs
            && delay > 300
        {
            anyhow::bail!(
                "HOSTSYNC_RETRY_DELAY_SECS must be at most 300 seconds. Got: {}",
                delay
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "HOSTSYNC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Build the core pipeline configuration
    fn to_pipeline_config(&self) -> PipelineConfig {
        let source = match self.source_type.as_str() {
            "fixed" => SourceConfig::Fixed {
                records: Vec::new(),
            },
            _ => SourceConfig::Snapshot {
                path: self.source_path.clone(),
            },
        };

        let store = match self.store_type.as_str() {
            "memory" => StoreConfig::Memory,
            _ => StoreConfig::File {
                path: self.store_path.clone(),
            },
        };

        let mut run = RunConfig::default();
        if let Some(attempts) = self.fetch_attempts {
            run.fetch_attempts = attempts;
        }
        if let Some(delay) = self.retry_delay_secs {
            run.retry_delay_secs = delay;
        }

        PipelineConfig {
            source,
            store,
            output: OutputConfig {
                hosts_path: self.hosts_path.clone(),
                readme_path: self.readme_path.clone(),
                template_path: self.template_path.clone(),
            },
            domains: self.domains.clone(),
            run,
        }
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return HostsyncExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return HostsyncExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return HostsyncExitCode::ConfigError.into();
    }

    info!("Starting hostsyncd");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return HostsyncExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run(config).await {
            error!("Run failed: {}", e);
            HostsyncExitCode::RuntimeError
        } else {
            HostsyncExitCode::Success
        }
    });

    result.into()
}

/// Build the pipeline from the registry and run it once
async fn run(config: Config) -> Result<()> {
    let registry = builtin_registry();
    let pipeline_config = config.to_pipeline_config();

    info!("Record source type: {}", pipeline_config.source.type_name());
    info!("Record store type: {}", pipeline_config.store.type_name());
    if !pipeline_config.domains.is_empty() {
        info!("Tracking {} domain(s)", pipeline_config.domains.len());
    }

    let source = registry.create_source(&pipeline_config.source)?;
    let store = registry.create_store(&pipeline_config.store)?;

    let (pipeline, mut event_rx) = Pipeline::new(source, store, pipeline_config)?;

    // Log pipeline events as they arrive
    let event_task = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            tracing::debug!("Pipeline event: {:?}", event);
        }
    });

    let report = pipeline.run_once().await?;

    if report.changed {
        info!(
            "Published {} record(s); README and snapshot rewritten",
            report.record_count
        );
    } else {
        info!(
            "No changes ({} record(s)); README and snapshot left untouched",
            report.record_count
        );
    }

    // The pipeline (and its event sender) still lives; drop it so the
    // logging task sees the channel close.
    drop(pipeline);
    let _ = event_task.await;

    Ok(())
}
