//! Editing session state.
//!
//! DESIGN
//! ======
//! `Session` pairs the editor engine with its file-backed store. Scene
//! saves are driven by the engine's revision counter: the session is dirty
//! whenever the engine has moved past the last saved revision. Form and
//! theme changes are small and written immediately.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use editor::engine::EngineCore;
use editor::persist;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::CliError;
use crate::storage::FileStore;

/// Session shared between the command loop and the save task.
pub type SharedSession = Arc<Mutex<Session>>;

pub struct Session {
    pub engine: EngineCore,
    pub store: FileStore,
    pub config: AppConfig,
    saved_revision: u64,
}

impl Session {
    /// Restore the session from the configured state directory. A freshly
    /// seeded scene is saved right away so element ids stay stable; an
    /// unreadable stored scene is copied aside first.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::StateDir`] if the state directory cannot be
    /// created, or a persist error if the seeded scene cannot be saved.
    pub fn open(config: AppConfig) -> Result<Self, CliError> {
        let mut store = FileStore::open(&config.state_dir)
            .map_err(|source| CliError::StateDir { path: config.state_dir.clone(), source })?;
        let restored = persist::restore(&store);
        info!(
            seeded = restored.seeded,
            elements = restored.scene.len(),
            theme = %restored.theme,
            dir = %store.dir().display(),
            "session restored"
        );
        let seeded = restored.seeded;
        if let Some(raw) = restored.unreadable_scene.as_deref() {
            persist::preserve_unreadable_scene(&mut store, raw)?;
            warn!(
                backup = persist::EDITOR_BACKUP_KEY,
                "stored scene could not be read; a fresh layout replaces it"
            );
        }
        let engine = EngineCore::new(restored.scene, restored.form, restored.theme);
        let mut session = Self { engine, store, config, saved_revision: 0 };
        if seeded {
            session.save()?;
        }
        Ok(session)
    }

    #[must_use]
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Whether the scene changed since the last save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.engine.revision() != self.saved_revision
    }

    /// Write the scene now.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Persist`] if the write fails; the session stays dirty.
    pub fn save(&mut self) -> Result<(), CliError> {
        persist::save_scene(&mut self.store, &self.engine.scene)?;
        self.saved_revision = self.engine.revision();
        debug!(revision = self.saved_revision, "scene saved");
        Ok(())
    }

    /// Write the form record.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Persist`] if the write fails.
    pub fn save_form(&mut self) -> Result<(), CliError> {
        persist::save_form(&mut self.store, &self.engine.form)?;
        Ok(())
    }

    /// Write the theme identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Persist`] if the write fails.
    pub fn save_theme(&mut self) -> Result<(), CliError> {
        persist::save_theme(&mut self.store, self.engine.theme)?;
        Ok(())
    }
}
