//! Tests for loading the closure profile table from disk.

use std::fs;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use snowday_core::{ProfileStore, RegionId};
use snowday_data::{JsonProfileStore, ProfileLoadError};
use tempfile::TempDir;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn table_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("school_trends.json")).expect("utf-8 temp path")
}

#[rstest]
fn loads_profiles_from_disk(dir: TempDir) {
    let path = table_path(&dir);
    fs::write(
        &path,
        r#"{"05401": {"closure_inch_threshold": 4, "historical_closure_weight": 3}}"#,
    )
    .expect("write table");

    let store = JsonProfileStore::load(&path).expect("table loads");
    assert_eq!(store.len(), 1);
    assert_eq!(store.origin(), path.as_str());
    let profile = store
        .lookup(&RegionId::new("05401").expect("valid region"))
        .expect("lookup")
        .expect("profile stored");
    assert_eq!(profile.historical_closure_weight, Some(3.0));
}

#[rstest]
fn missing_file_is_an_error_for_load(dir: TempDir) {
    let path = table_path(&dir);
    let result = JsonProfileStore::load(&path);
    assert!(matches!(result, Err(ProfileLoadError::Read { .. })));
}

#[rstest]
fn missing_file_is_empty_for_load_or_empty(dir: TempDir) {
    let path = table_path(&dir);
    let store = JsonProfileStore::load_or_empty(&path).expect("missing table tolerated");
    assert!(store.is_empty());
}

#[rstest]
fn malformed_file_is_not_tolerated(dir: TempDir) {
    let path = table_path(&dir);
    fs::write(&path, "{ not json").expect("write table");

    let result = JsonProfileStore::load_or_empty(&path);
    assert!(matches!(result, Err(ProfileLoadError::Parse { .. })));
}
