//! End-to-end scenario with real file-backed components
//!
//! First run: no prior artifacts → everything is written, including a
//! correctly padded hosts line and the JSON snapshot. Second run with
//! the same input: nothing but the hosts file is rewritten.

mod common;

use common::*;
use hostsync_core::render::NAME_COLUMN_WIDTH;
use hostsync_core::store::FileRecordStore;
use hostsync_core::traits::RecordStore;
use hostsync_core::{Pipeline, SnapshotSource};
use tempfile::tempdir;

#[tokio::test]
async fn snapshot_republish_cycle() {
    let dir = tempdir().unwrap();
    let snapshot_path = dir.path().join("hosts.json");

    // A previously committed snapshot is the record source
    std::fs::write(&snapshot_path, r#"[["example.com", "93.184.216.34"]]"#).unwrap();

    let (pipeline, _event_rx) = Pipeline::new(
        Box::new(SnapshotSource::new(&snapshot_path)),
        Box::new(FileRecordStore::new(&snapshot_path)),
        test_config(dir.path()),
    )
    .unwrap();

    // First run: publishes everything
    let first = pipeline.run_once().await.unwrap();
    assert!(first.changed);
    assert_eq!(first.record_count, 1);

    let hosts = std::fs::read_to_string(dir.path().join("hosts")).unwrap();
    let line = hosts
        .lines()
        .find(|l| l.starts_with("example.com"))
        .expect("hosts file contains the record");
    assert_eq!(
        line,
        format!("{:<width$}93.184.216.34", "example.com", width = NAME_COLUMN_WIDTH)
    );

    // The snapshot was re-persisted in the canonical pretty format
    let snapshot = FileRecordStore::new(&snapshot_path);
    assert_eq!(snapshot.load().await.unwrap(), example_records());

    // Plant a marker: if the second run saved, it would overwrite this
    std::fs::write(&snapshot_path, r#"[["example.com", "93.184.216.34"]]"#).unwrap();
    let marker = std::fs::read_to_string(&snapshot_path).unwrap();

    // Second run: same records, so README and snapshot are untouched
    let second = pipeline.run_once().await.unwrap();
    assert!(!second.changed);
    assert_eq!(
        std::fs::read_to_string(&snapshot_path).unwrap(),
        marker,
        "snapshot must not be rewritten on an unchanged run"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("hosts")).unwrap(),
        second.content,
        "hosts file is rewritten verbatim regardless"
    );
}
