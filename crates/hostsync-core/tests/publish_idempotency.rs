//! Contract: publishing is idempotent
//!
//! Running the pipeline twice with an unchanged record list must
//! rewrite only the hosts file on the second run; the README and the
//! JSON snapshot stay untouched even though the timestamp differs.

mod common;

use chrono::{TimeZone, Utc};
use common::*;
use hostsync_core::{Pipeline, PipelineEvent, Record, RecordStore};
use tempfile::tempdir;

fn at(hour: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 16, hour, 0, 0).unwrap()
}

#[tokio::test]
async fn second_run_with_same_records_is_unchanged() {
    let dir = tempdir().unwrap();
    let source = CountingSource::new(example_records());
    let store = CountingStore::new();

    let (pipeline, mut event_rx) = Pipeline::new(
        Box::new(source),
        Box::new(store.clone()),
        test_config(dir.path()),
    )
    .expect("pipeline construction succeeds");

    // First run: no README exists yet, everything is written
    let first = pipeline.run_once_at(at(1)).await.unwrap();
    assert!(first.changed, "first run must publish");
    assert_eq!(store.save_count(), 1);

    let readme_after_first = std::fs::read_to_string(dir.path().join("README.md")).unwrap();

    // Second run: same records, later timestamp
    let second = pipeline.run_once_at(at(2)).await.unwrap();
    assert!(!second.changed, "unchanged records must not republish");
    assert_eq!(store.save_count(), 1, "snapshot must not be saved again");

    let readme_after_second = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert_eq!(
        readme_after_first, readme_after_second,
        "README bytes must be identical across unchanged runs"
    );

    // The hosts file has no gate: it carries the second run's timestamp
    let hosts = std::fs::read_to_string(dir.path().join("hosts")).unwrap();
    assert_eq!(hosts, second.content);
    assert_ne!(first.content, second.content, "timestamps differ");

    let events = drain_events(&mut event_rx);
    assert!(events.contains(&PipelineEvent::Published { record_count: 1 }));
    assert!(events.contains(&PipelineEvent::Unchanged { record_count: 1 }));
}

#[tokio::test]
async fn record_change_triggers_republish() {
    let dir = tempdir().unwrap();
    let store = CountingStore::new();
    let config = test_config(dir.path());

    let (pipeline, _event_rx) = Pipeline::new(
        Box::new(CountingSource::new(example_records())),
        Box::new(store.clone()),
        config.clone(),
    )
    .unwrap();
    assert!(pipeline.run_once_at(at(1)).await.unwrap().changed);

    // Same workspace, new address for the same name
    let updated = vec![Record::new("example.com", "93.184.216.35")];
    let (pipeline, _event_rx) = Pipeline::new(
        Box::new(CountingSource::new(updated.clone())),
        Box::new(store.clone()),
        config,
    )
    .unwrap();

    let report = pipeline.run_once_at(at(2)).await.unwrap();
    assert!(report.changed, "a differing record list must republish");
    assert_eq!(store.save_count(), 2);
    assert_eq!(store.load().await.unwrap(), updated);
}

#[tokio::test]
async fn hosts_file_is_rewritten_even_when_unchanged() {
    let dir = tempdir().unwrap();
    let store = CountingStore::new();

    let (pipeline, _event_rx) = Pipeline::new(
        Box::new(CountingSource::new(example_records())),
        Box::new(store),
        test_config(dir.path()),
    )
    .unwrap();

    pipeline.run_once_at(at(1)).await.unwrap();

    // Someone deleted the hosts file between runs
    std::fs::remove_file(dir.path().join("hosts")).unwrap();

    let report = pipeline.run_once_at(at(2)).await.unwrap();
    assert!(!report.changed);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("hosts")).unwrap(),
        report.content,
        "hosts file must be restored verbatim despite no content change"
    );
}
