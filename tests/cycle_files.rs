// tests/cycle_files.rs
use keyword_trends::config::{AppConfig, EnrichConfig, SourceConfig, SourceKind};
use keyword_trends::{run_cycle, SnapshotStore};
use std::fs;

fn offline_config(data_path: std::path::PathBuf) -> AppConfig {
    AppConfig {
        data_path,
        enrich: EnrichConfig {
            enabled: false,
            ..EnrichConfig::default()
        },
        sources: vec![SourceConfig {
            name: "offline".to_string(),
            kind: SourceKind::Fixed,
            url: None,
            bias: 1.0,
            keywords: vec!["하나".to_string(), "둘".to_string()],
        }],
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn cycle_creates_document_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("trends.json");

    let report = run_cycle(&offline_config(path.clone())).await.unwrap();
    assert_eq!(report.trends.len(), 2);

    let store = SnapshotStore::load(&path).unwrap();
    assert_eq!(store.timestamps().unwrap(), vec![report.timestamp]);
    assert_eq!(store.snapshot(report.timestamp).unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_document_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trends.json");
    fs::write(&path, "{ not json").unwrap();

    let err = run_cycle(&offline_config(path.clone())).await.unwrap_err();
    assert!(format!("{err:#}").contains("malformed"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test]
async fn non_mapping_root_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trends.json");
    fs::write(&path, "[1, 2]").unwrap();

    assert!(run_cycle(&offline_config(path.clone())).await.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2]");
}
