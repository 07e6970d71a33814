//! Persistence service: trailing-edge debounced scene saves.
//!
//! DESIGN
//! ======
//! Command handlers send a unit touch on a channel after each scene
//! mutation. A background task feeds touches into a [`SaveDebouncer`] and
//! sleeps until its deadline; when the deadline passes without a newer
//! touch the scene is written once. Bursts of edits (a drag, a typing
//! session) collapse into a single write.
//!
//! Closing the channel flushes any pending save before the task exits, so
//! a clean shutdown never loses the last edit.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::time::Duration;

use editor::persist::SaveDebouncer;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error};

use crate::state::SharedSession;

/// Handle to the running save task.
pub struct SaveHandle {
    tx: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl SaveHandle {
    /// Report a scene mutation; restarts the debounce window.
    pub fn touch(&self) {
        if self.tx.send(()).is_err() {
            error!("save task is gone; edit will not be persisted");
        }
    }

    /// Flush any pending save and wait for the task to exit.
    ///
    /// # Errors
    ///
    /// Returns the join error if the task panicked.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        drop(self.tx);
        self.task.await
    }
}

/// Spawn the background save task.
pub fn spawn_save_task(session: SharedSession, debounce_ms: u64) -> SaveHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<()>();
    let task = tokio::spawn(async move {
        let start = Instant::now();
        let mut debouncer = SaveDebouncer::new(debounce_ms);
        loop {
            let deadline = debouncer.deadline().map(|ms| start + Duration::from_millis(ms));
            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(()) => debouncer.touch(elapsed_ms(start)),
                    None => {
                        if debouncer.flush() {
                            flush(&session).await;
                        }
                        break;
                    }
                },
                () = wait_until(deadline) => {
                    if debouncer.poll(elapsed_ms(start)) {
                        flush(&session).await;
                    }
                }
            }
        }
        debug!("save task stopped");
    });
    SaveHandle { tx, task }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

async fn flush(session: &SharedSession) {
    let mut session = session.lock().await;
    if !session.is_dirty() {
        return;
    }
    if let Err(e) = session.save() {
        error!(error = %e, "debounced save failed");
    }
}
