//! Scene ⇄ key-value persistence bridge.
//!
//! DESIGN
//! ======
//! Three independently keyed JSON values live in the host's key-value store:
//! the form record, the theme identifier, and the editor scene. Reads never
//! fail: a missing or corrupt entry degrades to its default and the parse
//! error is logged. An unparseable scene blob is handed back to the host in
//! [`RestoredState`] so it can be copied to [`EDITOR_BACKUP_KEY`] before the
//! seed replaces it. Writes go through [`SaveDebouncer`], a pure trailing-edge
//! timer the host polls, so a drag's many moves collapse into one write of
//! the latest state.
//!
//! ERROR HANDLING
//! ==============
//! Only writes return errors ([`PersistError`]). The host logs them; the
//! in-memory scene is unaffected.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::consts::SAVE_DEBOUNCE_MS;
use crate::doc::Scene;
use crate::form::{FormRecord, seed_elements};
use crate::theme::Theme;

/// Storage key of the form record.
pub const FORM_KEY: &str = "formData";
/// Storage key of the theme identifier.
pub const THEME_KEY: &str = "theme";
/// Storage key of the editor scene blob.
pub const EDITOR_KEY: &str = "editorData";
/// Storage key an unparseable scene blob is moved to before it is replaced.
pub const EDITOR_BACKUP_KEY: &str = "editorDataUnreadable";

/// Failure to write persisted state.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage write failed for {key}: {message}")]
    Storage { key: String, message: String },
    #[error("storage unavailable")]
    Unavailable,
}

/// String key-value storage (browser `localStorage`, a directory of files, memory).
pub trait KeyValueStore {
    /// Read a value; `None` when the key is absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Delete a value. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the backend rejects the delete.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`.
#[cfg(feature = "browser")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(feature = "browser")]
impl LocalStorage {
    /// Open the window's local storage.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Unavailable`] outside a browser window or when
    /// storage is disabled.
    pub fn open() -> Result<Self, PersistError> {
        let window = web_sys::window().ok_or(PersistError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) | Err(_) => Err(PersistError::Unavailable),
        }
    }
}

#[cfg(feature = "browser")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = ?e, "localStorage read failed");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PersistError::Storage { key: key.to_string(), message: format!("{e:?}") })
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.storage
            .remove_item(key)
            .map_err(|e| PersistError::Storage { key: key.to_string(), message: format!("{e:?}") })
    }
}

// =============================================================================
// SCENE
// =============================================================================

/// Load the persisted scene.
///
/// Returns `None` when nothing is stored, the blob is corrupt, or it holds no
/// elements; the caller seeds defaults in every case.
pub fn load_scene(store: &dyn KeyValueStore) -> Option<Scene> {
    let raw = store.get(EDITOR_KEY)?;
    match parse_scene(&raw) {
        Ok(scene) => scene,
        Err(e) => {
            warn!(error = %e, "discarding corrupt editor state");
            None
        }
    }
}

/// Parse a stored scene blob. `Ok(None)` for a well-formed blob with no elements.
fn parse_scene(raw: &str) -> Result<Option<Scene>, serde_json::Error> {
    let mut scene = serde_json::from_str::<Scene>(raw)?;
    if scene.elements.is_empty() {
        debug!("stored editor state has no elements");
        return Ok(None);
    }
    let elements = std::mem::take(&mut scene.elements);
    scene.load_elements(elements);
    scene.background_overlay_opacity = scene.background_overlay_opacity.min(100);
    Ok(Some(scene))
}

/// Write the full scene.
///
/// # Errors
///
/// Returns [`PersistError`] if serialization or the storage write fails.
pub fn save_scene(store: &mut dyn KeyValueStore, scene: &Scene) -> Result<(), PersistError> {
    let json = serde_json::to_string(scene)?;
    store.set(EDITOR_KEY, &json)?;
    debug!(elements = scene.len(), bytes = json.len(), "editor state saved");
    Ok(())
}

/// Delete the stored scene so the next load reseeds.
///
/// # Errors
///
/// Returns [`PersistError::Storage`] if the backend rejects the delete.
pub fn clear_scene(store: &mut dyn KeyValueStore) -> Result<(), PersistError> {
    store.remove(EDITOR_KEY)
}

// =============================================================================
// FORM / THEME
// =============================================================================

/// Load the form record; missing or corrupt entries yield the default record.
#[must_use]
pub fn load_form(store: &dyn KeyValueStore) -> FormRecord {
    let Some(raw) = store.get(FORM_KEY) else {
        return FormRecord::default();
    };
    match serde_json::from_str(&raw) {
        Ok(form) => form,
        Err(e) => {
            warn!(error = %e, "discarding corrupt form data");
            FormRecord::default()
        }
    }
}

/// Copy an unparseable scene blob to [`EDITOR_BACKUP_KEY`] so the seeded
/// scene can be saved without losing it.
///
/// # Errors
///
/// Returns [`PersistError::Storage`] if the storage write fails.
pub fn preserve_unreadable_scene(store: &mut dyn KeyValueStore, raw: &str) -> Result<(), PersistError> {
    store.set(EDITOR_BACKUP_KEY, raw)?;
    warn!(key = EDITOR_BACKUP_KEY, bytes = raw.len(), "unreadable editor state moved aside");
    Ok(())
}

/// Write the form record.
///
/// # Errors
///
/// Returns [`PersistError`] if serialization or the storage write fails.
pub fn save_form(store: &mut dyn KeyValueStore, form: &FormRecord) -> Result<(), PersistError> {
    let json = serde_json::to_string(form)?;
    store.set(FORM_KEY, &json)
}

/// Load the theme identifier. Stored as a bare id; a JSON-quoted id is
/// accepted too. Unknown ids resolve to classic.
#[must_use]
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    store.get(THEME_KEY).map_or_else(Theme::default, |raw| Theme::parse(raw.trim().trim_matches('"')))
}

/// Write the theme identifier.
///
/// # Errors
///
/// Returns [`PersistError::Storage`] if the storage write fails.
pub fn save_theme(store: &mut dyn KeyValueStore, theme: Theme) -> Result<(), PersistError> {
    store.set(THEME_KEY, theme.id())
}

/// Everything a session starts from.
#[derive(Debug, Clone)]
pub struct RestoredState {
    pub form: FormRecord,
    pub theme: Theme,
    pub scene: Scene,
    /// `true` when the scene was seeded because nothing usable was stored.
    pub seeded: bool,
    /// The stored scene blob when it existed but could not be parsed. Hosts
    /// pass it to [`preserve_unreadable_scene`] before saving the seed.
    pub unreadable_scene: Option<String>,
}

/// Default scene for a form record and theme.
#[must_use]
pub fn seeded_scene(form: &FormRecord, theme: Theme) -> Scene {
    let mut scene = Scene::new(theme.background_image().to_string());
    scene.load_elements(seed_elements(form));
    scene
}

/// Load form, theme, and scene, seeding the scene when none is stored.
#[must_use]
pub fn restore(store: &dyn KeyValueStore) -> RestoredState {
    let form = load_form(store);
    let theme = load_theme(store);
    let (scene, unreadable_scene) = match store.get(EDITOR_KEY) {
        None => (None, None),
        Some(raw) => match parse_scene(&raw) {
            Ok(scene) => (scene, None),
            Err(e) => {
                warn!(error = %e, "stored editor state is unreadable");
                (None, Some(raw))
            }
        },
    };
    match scene {
        Some(scene) => RestoredState { form, theme, scene, seeded: false, unreadable_scene },
        None => {
            let scene = seeded_scene(&form, theme);
            RestoredState { form, theme, scene, seeded: true, unreadable_scene }
        }
    }
}

// =============================================================================
// DEBOUNCE
// =============================================================================

/// Trailing-edge save timer.
///
/// Every [`touch`](Self::touch) pushes the deadline out to `now + window`;
/// [`poll`](Self::poll) reports `true` once the deadline has passed and then
/// disarms. Time is caller-supplied milliseconds, so the debouncer works with
/// any clock.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    window_ms: u64,
    deadline: Option<u64>,
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::new(SAVE_DEBOUNCE_MS)
    }
}

impl SaveDebouncer {
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self { window_ms, deadline: None }
    }

    #[must_use]
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Record a mutation at `now_ms`.
    pub fn touch(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(self.window_ms));
    }

    /// Whether a save is due at `now_ms`. Disarms when it returns `true`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarm and report whether a save was pending (used on shutdown).
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
