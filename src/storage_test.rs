use editor::doc::Scene;
use editor::persist::{EDITOR_KEY, load_scene, restore, save_scene};

use super::*;

#[test]
fn set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set("theme", "modern").unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("modern"));
    assert!(dir.path().join("theme.json").exists());
}

#[test]
fn missing_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert!(store.get("formData").is_none());
}

#[test]
fn remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set(EDITOR_KEY, "{}").unwrap();
    store.remove(EDITOR_KEY).unwrap();
    store.remove(EDITOR_KEY).unwrap();
    assert!(store.get(EDITOR_KEY).is_none());
}

#[test]
fn open_creates_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    FileStore::open(&nested).unwrap();
    assert!(nested.is_dir());
}

#[test]
fn keys_are_sanitized_into_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set("../escape", "x").unwrap();
    assert!(dir.path().join("___escape.json").exists());
}

#[test]
fn scene_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    let seeded = restore(&store).scene;
    save_scene(&mut store, &seeded).unwrap();

    let reopened = FileStore::open(dir.path()).unwrap();
    let loaded: Option<Scene> = load_scene(&reopened);
    assert_eq!(loaded, Some(seeded));
}
