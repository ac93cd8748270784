use super::*;

// =============================================================================
// MemoryStore
// =============================================================================

#[test]
fn memory_store_starts_empty() {
    assert_eq!(MemoryStore::default().read(), None);
}

#[test]
fn memory_store_write_then_read() {
    let store = MemoryStore::default();
    store.write("t1").unwrap();
    assert_eq!(store.read().as_deref(), Some("t1"));
    store.write("t2").unwrap();
    assert_eq!(store.read().as_deref(), Some("t2"));
}

#[test]
fn memory_store_clear_is_idempotent() {
    let store = MemoryStore::with_token("t1");
    store.clear().unwrap();
    store.clear().unwrap();
    assert_eq!(store.read(), None);
}

// =============================================================================
// FileStore
// =============================================================================

#[test]
fn file_store_missing_file_reads_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("token"));
    assert_eq!(store.read(), None);
}

#[test]
fn file_store_round_trips_raw_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("token"));
    store.write("eyJhbGciOi.opaque.sig").unwrap();
    assert_eq!(store.read().as_deref(), Some("eyJhbGciOi.opaque.sig"));
}

#[test]
fn file_store_survives_new_handle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    FileStore::new(&path).write("t1").unwrap();
    assert_eq!(FileStore::new(&path).read().as_deref(), Some("t1"));
}

#[test]
fn file_store_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested").join("deeper").join("token"));
    store.write("t1").unwrap();
    assert_eq!(store.read().as_deref(), Some("t1"));
}

#[test]
fn file_store_empty_file_reads_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, "").unwrap();
    assert_eq!(FileStore::new(path).read(), None);
}

#[test]
fn file_store_clear_removes_file_and_tolerates_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("token"));
    store.write("t1").unwrap();
    store.clear().unwrap();
    assert!(!store.path().exists());
    store.clear().unwrap();
    assert_eq!(store.read(), None);
}

#[test]
fn file_store_directory_path_reads_absent_and_write_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert_eq!(store.read(), None);
    let err = store.write("t1").unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(err.to_string().contains("token file"));
}
