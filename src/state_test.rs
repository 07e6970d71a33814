use editor::persist::{load_scene, load_theme};
use editor::theme::Theme;

use super::*;

fn config_in(dir: &std::path::Path) -> AppConfig {
    AppConfig { state_dir: dir.join("state"), ..AppConfig::default() }
}

#[test]
fn fresh_session_seeds_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(config_in(dir.path())).unwrap();
    assert!(!session.is_dirty());
    assert_eq!(session.engine.scene.len(), 2);
    assert_eq!(load_scene(&session.store), Some(session.engine.scene.clone()));
}

#[test]
fn reopen_keeps_element_ids() {
    let dir = tempfile::tempdir().unwrap();
    let first = Session::open(config_in(dir.path())).unwrap();
    let second = Session::open(config_in(dir.path())).unwrap();
    assert_eq!(first.engine.scene, second.engine.scene);
}

#[test]
fn mutation_marks_dirty_until_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::open(config_in(dir.path())).unwrap();
    session.engine.add_text();
    assert!(session.is_dirty());
    session.save().unwrap();
    assert!(!session.is_dirty());
}

#[test]
fn theme_is_written_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::open(config_in(dir.path())).unwrap();
    session.engine.theme = Theme::Professional;
    session.save_theme().unwrap();
    assert_eq!(load_theme(&session.store), Theme::Professional);
}

#[test]
fn unreadable_stored_scene_is_kept_aside() {
    let dir = tempfile::tempdir().unwrap();
    let state_dir = dir.path().join("state");
    std::fs::create_dir_all(&state_dir).unwrap();
    let raw = r#"{"elements":[{"type":"text","id":"title-1","content":"My Title","position":{"x":10,"y":20}}]}"#;
    std::fs::write(state_dir.join("editorData.json"), raw).unwrap();

    let session = Session::open(config_in(dir.path())).unwrap();
    assert_eq!(session.engine.scene.len(), 2);

    let backup = std::fs::read_to_string(state_dir.join("editorDataUnreadable.json")).unwrap();
    assert!(backup.contains("My Title"));
    assert_eq!(load_scene(&session.store), Some(session.engine.scene.clone()));
}

#[test]
fn readable_scene_leaves_no_backup() {
    let dir = tempfile::tempdir().unwrap();
    let _ = Session::open(config_in(dir.path())).unwrap();
    let _ = Session::open(config_in(dir.path())).unwrap();
    assert!(!dir.path().join("state").join("editorDataUnreadable.json").exists());
}
