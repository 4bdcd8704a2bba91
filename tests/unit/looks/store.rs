use super::*;

fn exercise(store: &mut dyn KeyValueStore) {
    assert_eq!(store.get("a").unwrap(), None);
    store.set("a", "1").unwrap();
    store.set("a", "2").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    store.remove("a").unwrap();
    store.remove("a").unwrap();
    assert_eq!(store.get("a").unwrap(), None);
}

#[test]
fn memory_store_last_write_wins() {
    let mut store = MemoryStore::new();
    exercise(&mut store);
    assert!(store.is_empty());
}

#[test]
fn file_store_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("looks")).unwrap();
    exercise(&mut store);
}

#[test]
fn file_store_keys_cannot_escape_the_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set("../saved_looks:alice", "[]").unwrap();
    assert!(dir.path().join("%2E%2E%2Fsaved_looks%3Aalice.json").exists());
    assert_eq!(store.get("../saved_looks:alice").unwrap().as_deref(), Some("[]"));
    assert!(store.set("", "x").is_err());
}

#[test]
fn file_store_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    FileStore::open(dir.path()).unwrap().set("k", "v").unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn file_store_keeps_similar_keys_apart() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set("saved_looks:a.b", "dot").unwrap();
    store.set("saved_looks:a_b", "underscore").unwrap();
    store.set("saved_looks:a%2Eb", "escaped").unwrap();
    assert_eq!(store.get("saved_looks:a.b").unwrap().as_deref(), Some("dot"));
    assert_eq!(store.get("saved_looks:a_b").unwrap().as_deref(), Some("underscore"));
    assert_eq!(store.get("saved_looks:a%2Eb").unwrap().as_deref(), Some("escaped"));
    store.remove("saved_looks:a_b").unwrap();
    assert_eq!(store.get("saved_looks:a.b").unwrap().as_deref(), Some("dot"));
}
