use std::time::Duration;

use editor::persist::load_scene;

use super::*;
use crate::config::AppConfig;
use crate::state::Session;

fn shared_session(dir: &std::path::Path) -> SharedSession {
    let config = AppConfig { state_dir: dir.to_path_buf(), ..AppConfig::default() };
    Session::open(config).unwrap().into_shared()
}

#[tokio::test]
async fn burst_of_edits_saves_latest_state_after_window() {
    let dir = tempfile::tempdir().unwrap();
    let session = shared_session(dir.path());
    let saver = spawn_save_task(session.clone(), 30);

    for _ in 0..3 {
        session.lock().await.engine.add_text();
        saver.touch();
    }
    assert!(session.lock().await.is_dirty());

    tokio::time::sleep(Duration::from_millis(200)).await;
    let guard = session.lock().await;
    assert!(!guard.is_dirty());
    assert_eq!(load_scene(&guard.store).map(|s| s.len()), Some(5));
    drop(guard);
    saver.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_flushes_pending_save() {
    let dir = tempfile::tempdir().unwrap();
    let session = shared_session(dir.path());
    let saver = spawn_save_task(session.clone(), 60_000);

    session.lock().await.engine.add_text();
    saver.touch();
    saver.shutdown().await.unwrap();

    let guard = session.lock().await;
    assert!(!guard.is_dirty());
    assert_eq!(load_scene(&guard.store).map(|s| s.len()), Some(3));
}

#[tokio::test]
async fn idle_task_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let session = shared_session(dir.path());
    let before = session.lock().await.engine.revision();
    let saver = spawn_save_task(session.clone(), 10);
    tokio::time::sleep(Duration::from_millis(50)).await;
    saver.shutdown().await.unwrap();
    assert_eq!(session.lock().await.engine.revision(), before);
}
