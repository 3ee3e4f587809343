//! Contract: fetch retry policy
//!
//! Only transient source failures are retried, up to the configured
//! attempt count with a fixed delay. Decode failures are deterministic
//! and abort the run on the first attempt.

mod common;

use common::*;
use hostsync_core::{Error, Pipeline, PipelineEvent};
use tempfile::tempdir;

#[tokio::test]
async fn transient_failures_are_retried() {
    let dir = tempdir().unwrap();
    let source = FlakySource::transient(example_records(), 2);

    let (pipeline, mut event_rx) = Pipeline::new(
        Box::new(source.clone()),
        Box::new(CountingStore::new()),
        test_config(dir.path()),
    )
    .unwrap();

    let report = pipeline.run_once().await.unwrap();
    assert!(report.changed);
    assert_eq!(source.fetch_count(), 3, "two failures plus one success");

    let retries: Vec<_> = drain_events(&mut event_rx)
        .into_iter()
        .filter(|e| matches!(e, PipelineEvent::FetchRetried { .. }))
        .collect();
    assert_eq!(retries.len(), 2);
}

#[tokio::test]
async fn exhausted_attempts_surface_the_error() {
    let dir = tempdir().unwrap();
    let source = FlakySource::transient(example_records(), 10);

    let (pipeline, _event_rx) = Pipeline::new(
        Box::new(source.clone()),
        Box::new(CountingStore::new()),
        test_config(dir.path()),
    )
    .unwrap();

    let err = pipeline.run_once().await.unwrap_err();
    assert!(matches!(err, Error::Source(_)), "got {:?}", err);
    assert_eq!(source.fetch_count(), 3, "attempts are bounded");

    // A failed fetch never reaches the publisher
    assert!(!dir.path().join("hosts").exists());
}

#[tokio::test]
async fn decode_failure_is_not_retried() {
    let dir = tempdir().unwrap();
    let source = FlakySource::decode_failure();

    let (pipeline, _event_rx) = Pipeline::new(
        Box::new(source.clone()),
        Box::new(CountingStore::new()),
        test_config(dir.path()),
    )
    .unwrap();

    let err = pipeline.run_once().await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {:?}", err);
    assert_eq!(source.fetch_count(), 1, "decode failures abort immediately");
}
