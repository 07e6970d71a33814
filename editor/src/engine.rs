//! Editor engine: scene store operations and the interaction state machine.
//!
//! DESIGN
//! ======
//! `EngineCore` owns every piece of mutable editor state (scene, selection,
//! hover, gesture, pending uploads, export guard) so rendering and
//! persistence read one object instead of scattered flags. Store operations
//! (`add_text`, `update_element`, ...) mutate directly and return plain
//! values; input handlers translate raw pointer and key events into store
//! operations and return [`Action`]s for the host to react to.
//!
//! Every scene mutation bumps [`EngineCore::revision`]. Hosts compare it
//! against the last saved revision to arm the save debouncer.
//!
//! TRADE-OFFS
//! ==========
//! Drag moves are committed to the scene on every pointer-move rather than
//! once on release, so snapping and guides always reflect what is stored.
//! The debounced save absorbs the write volume.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::fmt::Display;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::align::{
    AlignTarget, AlignmentGuides, HeuristicMeasure, TextMeasure, aligned_position, clamp_to_page,
    element_extent, snap_to_page_center, visual_center_offset,
};
use crate::camera::{Point, Viewport};
use crate::consts::{DEFAULT_IMAGE_SIZE, PAGE_HEIGHT, PAGE_WIDTH, SNAP_THRESHOLD_PX};
use crate::doc::{
    DEFAULT_TEXT_COLOR, Element, ElementId, ElementPatch, FontWeight, ImageElement, Scene, Size, TextAlign,
    TextElement,
};
use crate::form::{FormRecord, seed_elements};
use crate::hit::{HitPart, hit_test};
use crate::input::{
    Button, EditOutcome, ElementState, InputState, Key, Modifiers, TextEditSession, TextField, UiState,
};
use crate::theme::Theme;
use crate::upload::{UploadError, UploadTarget, UploadTicket, UploadTracker};

/// Content of a freshly added text element.
pub const NEW_TEXT_CONTENT: &str = "New Text";

/// Font size of a freshly added text element.
pub const NEW_TEXT_FONT_SIZE: u32 = 16;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(Element),
    ElementUpdated { id: ElementId, patch: ElementPatch },
    ElementDeleted { id: ElementId },
    SelectionChanged(Option<ElementId>),
    /// Open the text-edit modal for this element.
    EditTextRequested { id: ElementId },
    /// Open a file picker; deliver the result with [`EngineCore::complete_upload`].
    PickImageRequested(UploadTicket),
    GuidesChanged(AlignmentGuides),
    BackgroundChanged,
    /// Ask the user whether to discard the layout for the new theme.
    ConfirmThemeReset { theme: Theme },
    ThemeChanged(Theme),
    /// Elements were replaced wholesale (theme reset).
    SceneReset,
    SetCursor(&'static str),
    /// Blocking, user-visible error message.
    Alert(String),
    RenderNeeded,
}

/// Answer to a [`Action::ConfirmThemeReset`] prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    /// Discard elements and reseed the default layout with the new theme.
    ResetLayout,
    /// Keep the current layout; only the theme identifier changes.
    KeepLayout,
}

/// Core engine state: all editor logic, independent of any host.
pub struct EngineCore {
    pub scene: Scene,
    pub form: FormRecord,
    pub theme: Theme,
    pub ui: UiState,
    pub input: InputState,
    pub viewport: Viewport,
    measure: Box<dyn TextMeasure>,
    pending_theme: Option<Theme>,
    uploads: UploadTracker,
    export_pending: bool,
    cursor: &'static str,
    revision: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Scene::new(Theme::default().background_image().to_string()), FormRecord::default(), Theme::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(scene: Scene, form: FormRecord, theme: Theme) -> Self {
        Self {
            scene,
            form,
            theme,
            ui: UiState::default(),
            input: InputState::default(),
            viewport: Viewport::default(),
            measure: Box::new(HeuristicMeasure),
            pending_theme: None,
            uploads: UploadTracker::new(),
            export_pending: false,
            cursor: "default",
            revision: 0,
        }
    }

    /// Replace the text-extent strategy used for snapping, alignment, and hit-testing.
    #[must_use]
    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    /// Bumped on every scene mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn mark_dirty(&mut self) {
        self.revision += 1;
    }

    // --- Store operations ---

    /// Insert a text element near the page center with default style and select it.
    pub fn add_text(&mut self) -> ElementId {
        let id = Uuid::new_v4();
        self.scene.insert(Element::Text(TextElement {
            id,
            position: Point::new(PAGE_WIDTH / 2.0 - 100.0, PAGE_HEIGHT / 2.0 - 20.0),
            content: NEW_TEXT_CONTENT.to_string(),
            font_size: NEW_TEXT_FONT_SIZE,
            font_weight: FontWeight::Normal,
            color: DEFAULT_TEXT_COLOR.to_string(),
            opacity: 100,
            align: TextAlign::Center,
        }));
        self.ui.selected_id = Some(id);
        self.mark_dirty();
        info!(%id, "text element added");
        id
    }

    /// Insert a 100×100 image centered on the page and select it. An empty
    /// source means no file was chosen and is a no-op.
    pub fn add_image(&mut self, src: String) -> Option<ElementId> {
        if src.is_empty() {
            return None;
        }
        let id = Uuid::new_v4();
        let half = DEFAULT_IMAGE_SIZE / 2.0;
        self.scene.insert(Element::Image(ImageElement {
            id,
            position: Point::new(PAGE_WIDTH / 2.0 - half, PAGE_HEIGHT / 2.0 - half),
            src,
            size: Size::new(DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE),
        }));
        self.ui.selected_id = Some(id);
        self.mark_dirty();
        info!(%id, "image element added");
        Some(id)
    }

    /// Merge a sparse update into an element.
    ///
    /// Positions are clamped to non-negative coordinates and, only while this
    /// element is being dragged, snapped to the page center lines. Returns
    /// the patch as stored (after clamping and snapping), or `None` for an
    /// unknown id.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> Option<ElementPatch> {
        let mut style = patch.clone();
        style.position = None;
        if !self.scene.apply_patch(id, &style) {
            debug!(%id, "update for unknown element ignored");
            return None;
        }

        if let Some(proposed) = patch.position {
            let mut position = clamp_to_page(proposed);
            if self.input.dragging_id() == Some(*id) {
                if let Some(element) = self.scene.get(id) {
                    let offset = visual_center_offset(element, self.measure.as_ref());
                    let snap = snap_to_page_center(position, offset, SNAP_THRESHOLD_PX);
                    position = snap.position;
                    self.ui.guides = snap.guides;
                }
            }
            self.scene.apply_patch(id, &ElementPatch::position(position));
        }

        self.mark_dirty();
        self.scene.get(id).map(|element| stored_patch(element, &patch))
    }

    /// Remove an element, clearing selection and hover if they pointed at it.
    /// Unknown ids are a no-op.
    pub fn delete_element(&mut self, id: &ElementId) -> bool {
        if self.scene.remove(id).is_none() {
            return false;
        }
        if self.ui.selected_id == Some(*id) {
            self.ui.selected_id = None;
        }
        if self.ui.hovered_id == Some(*id) {
            self.ui.hovered_id = None;
        }
        if self.gesture_target() == Some(*id) {
            self.input = InputState::Idle;
            self.ui.guides = AlignmentGuides::default();
        }
        self.uploads.forget_element(*id);
        self.mark_dirty();
        info!(%id, "element deleted");
        true
    }

    pub fn set_background_image(&mut self, src: String) {
        self.scene.background_image = src;
        self.mark_dirty();
    }

    /// Set the overlay color and opacity percent (clamped to 100).
    pub fn set_background_overlay(&mut self, color: String, opacity_percent: u8) {
        self.scene.background_overlay = color;
        self.scene.background_overlay_opacity = opacity_percent.min(100);
        self.mark_dirty();
    }

    /// Move the selected element to a page edge or center line. Returns the
    /// applied patch, or `None` when nothing is selected.
    pub fn align_selected(&mut self, target: AlignTarget) -> Option<ElementPatch> {
        let id = self.ui.selected_id?;
        let element = self.scene.get(&id)?;
        let extent = element_extent(element, self.measure.as_ref());
        let offset = visual_center_offset(element, self.measure.as_ref());
        let position = aligned_position(element.position(), extent, offset, target);
        let patch = ElementPatch::position(position);
        self.scene.apply_patch(&id, &patch);
        self.mark_dirty();
        debug!(%id, ?target, x = position.x, y = position.y, "element aligned");
        Some(patch)
    }

    /// Discard all elements, reseed the default layout from the form record,
    /// and switch to the theme's background. The overlay is kept.
    pub fn reset_to_theme_defaults(&mut self, theme: Theme) {
        self.scene.load_elements(seed_elements(&self.form));
        self.scene.background_image = theme.background_image().to_string();
        self.theme = theme;
        self.ui = UiState::default();
        self.input = InputState::Idle;
        self.mark_dirty();
        info!(theme = %theme, elements = self.scene.len(), "layout reset to theme defaults");
    }

    /// Set a form field by its storage key. Returns `false` for unknown keys.
    pub fn set_form_field(&mut self, key: &str, value: String) -> bool {
        self.form.set_field(key, value)
    }

    // --- Theme ---

    /// Change the active theme. With elements on the page the change waits
    /// for [`resolve_theme_change`](Self::resolve_theme_change).
    pub fn request_theme_change(&mut self, theme: Theme) -> Vec<Action> {
        if theme == self.theme {
            return Vec::new();
        }
        if self.scene.is_empty() {
            self.theme = theme;
            self.set_background_image(theme.background_image().to_string());
            return vec![Action::ThemeChanged(theme), Action::BackgroundChanged, Action::RenderNeeded];
        }
        self.pending_theme = Some(theme);
        vec![Action::ConfirmThemeReset { theme }]
    }

    pub fn resolve_theme_change(&mut self, choice: ThemeChoice) -> Vec<Action> {
        let Some(theme) = self.pending_theme.take() else {
            return Vec::new();
        };
        match choice {
            ThemeChoice::KeepLayout => {
                self.theme = theme;
                vec![Action::ThemeChanged(theme)]
            }
            ThemeChoice::ResetLayout => {
                self.reset_to_theme_defaults(theme);
                vec![Action::ThemeChanged(theme), Action::SceneReset, Action::SelectionChanged(None), Action::RenderNeeded]
            }
        }
    }

    #[must_use]
    pub fn pending_theme(&self) -> Option<Theme> {
        self.pending_theme
    }

    // --- Text edit modal ---

    /// Open the text-edit modal for a text element, selecting it.
    pub fn begin_text_edit(&mut self, id: &ElementId) -> Vec<Action> {
        let Some(original) = self.scene.get(id).and_then(Element::as_text).cloned() else {
            return Vec::new();
        };
        self.input = InputState::EditingText(TextEditSession { id: *id, original });
        let mut actions = self.select(Some(*id));
        actions.push(Action::EditTextRequested { id: *id });
        actions
    }

    /// Apply one modal field edit immediately.
    pub fn edit_text(&mut self, field: TextField) -> Vec<Action> {
        let InputState::EditingText(session) = &self.input else {
            return Vec::new();
        };
        let id = session.id;
        let patch = match field {
            TextField::Content(content) => ElementPatch { content: Some(content), ..Default::default() },
            TextField::FontSize(size) => ElementPatch { font_size: Some(size), ..Default::default() },
            TextField::FontWeight(weight) => ElementPatch { font_weight: Some(weight), ..Default::default() },
            TextField::Color(color) => ElementPatch { color: Some(color), ..Default::default() },
            TextField::Opacity(opacity) => ElementPatch { opacity: Some(opacity), ..Default::default() },
            TextField::Align(align) => ElementPatch { align: Some(align), ..Default::default() },
        };
        self.update_element(&id, patch)
            .map(|patch| vec![Action::ElementUpdated { id, patch }, Action::RenderNeeded])
            .unwrap_or_default()
    }

    /// Close the modal. Cancel restores the style captured when it opened.
    pub fn finish_text_edit(&mut self, outcome: EditOutcome) -> Vec<Action> {
        let InputState::EditingText(session) = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        if outcome == EditOutcome::Save {
            return vec![Action::RenderNeeded];
        }
        self.update_element(&session.id, ElementPatch::restore_text(&session.original))
            .map(|patch| vec![Action::ElementUpdated { id: session.id, patch }, Action::RenderNeeded])
            .unwrap_or_default()
    }

    // --- Uploads ---

    /// Start a file read for `target`, superseding any earlier read for it.
    pub fn begin_upload(&mut self, target: UploadTarget) -> UploadTicket {
        self.uploads.begin(target)
    }

    /// Deliver the result of a file read. Stale tickets are dropped; failures
    /// alert without touching the scene.
    pub fn complete_upload(&mut self, ticket: UploadTicket, result: Result<String, UploadError>) -> Vec<Action> {
        if !self.uploads.finish(ticket) {
            debug!(?ticket, "stale upload dropped");
            return Vec::new();
        }
        let data_uri = match result {
            Ok(uri) => uri,
            Err(e) => {
                warn!(error = %e, ?ticket, "image read failed");
                return vec![Action::Alert(format!("Failed to load image: {e}")), Action::RenderNeeded];
            }
        };
        match ticket.target {
            UploadTarget::Element(id) => self
                .update_element(&id, ElementPatch { src: Some(data_uri), ..Default::default() })
                .map(|patch| vec![Action::ElementUpdated { id, patch }, Action::RenderNeeded])
                .unwrap_or_default(),
            UploadTarget::Background => {
                self.set_background_image(data_uri);
                vec![Action::BackgroundChanged, Action::RenderNeeded]
            }
            UploadTarget::NewImage => match self.add_image(data_uri) {
                Some(id) => {
                    let created = self.scene.get(&id).cloned().map(Action::ElementCreated);
                    created
                        .into_iter()
                        .chain([Action::SelectionChanged(Some(id)), Action::RenderNeeded])
                        .collect()
                }
                None => Vec::new(),
            },
        }
    }

    /// The picker was dismissed without a file.
    pub fn cancel_upload(&mut self, target: UploadTarget) -> Vec<Action> {
        if self.uploads.cancel(target) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    #[must_use]
    pub fn is_uploading(&self, target: UploadTarget) -> bool {
        self.uploads.is_uploading(target)
    }

    // --- Export ---

    /// Take a scene snapshot for export. Returns `None` while an export is
    /// already running.
    pub fn begin_export(&mut self) -> Option<Scene> {
        if self.export_pending {
            return None;
        }
        self.export_pending = true;
        Some(self.scene.clone())
    }

    /// Re-enable export and alert on failure.
    pub fn finish_export<E: Display>(&mut self, result: Result<(), E>) -> Vec<Action> {
        self.export_pending = false;
        match result {
            Ok(()) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "export failed");
                vec![Action::Alert(format!("Failed to generate PDF: {e}"))]
            }
        }
    }

    #[must_use]
    pub fn export_pending(&self) -> bool {
        self.export_pending
    }

    /// Select an element directly, or clear the selection with `None`.
    /// Unknown ids leave the selection unchanged.
    pub fn set_selection(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if let Some(target) = id
            && self.scene.get(&target).is_none()
        {
            debug!(%target, "select of unknown element ignored");
            return Vec::new();
        }
        self.select(id)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        // Clicks inside the modal never reach the engine.
        if matches!(self.input, InputState::EditingText(_)) {
            return self.finish_text_edit(EditOutcome::Save);
        }

        let page = self.viewport.screen_to_page(screen_pt);
        let Some(hit) = hit_test(page, &self.scene, &self.ui, self.measure.as_ref()) else {
            return self.select(None);
        };
        let id = hit.element_id;

        match hit.part {
            HitPart::DeleteButton => {
                let was_selected = self.ui.selected_id == Some(id);
                if !self.delete_element(&id) {
                    return Vec::new();
                }
                let mut actions = vec![Action::ElementDeleted { id }];
                if was_selected {
                    actions.push(Action::SelectionChanged(None));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            HitPart::EditButton => self.begin_text_edit(&id),
            HitPart::ReplaceButton => {
                let mut actions = self.select(Some(id));
                actions.push(Action::PickImageRequested(self.begin_upload(UploadTarget::Element(id))));
                actions
            }
            HitPart::ResizeHandle => {
                let Some(image) = self.scene.get(&id).and_then(Element::as_image) else {
                    return Vec::new();
                };
                self.input = InputState::ResizingImage { id, start_page: page, orig_size: image.size };
                let mut actions = self.select(Some(id));
                actions.extend(self.set_cursor("nwse-resize"));
                actions
            }
            HitPart::DragHandle => {
                let Some(orig) = self.scene.get(&id).map(Element::position) else {
                    return Vec::new();
                };
                let grab_offset = Point::new(page.x - orig.x, page.y - orig.y);
                self.input = InputState::PendingDrag { id, grab_offset, orig };
                self.select(Some(id))
            }
            HitPart::Body => self.select(Some(id)),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let page = self.viewport.screen_to_page(screen_pt);

        if let InputState::PendingDrag { id, grab_offset, orig } = self.input {
            self.input = InputState::DraggingElement { id, grab_offset, orig };
        }

        match self.input.clone() {
            InputState::DraggingElement { id, grab_offset, .. } => {
                let before = self.ui.guides;
                let proposed = Point::new(page.x - grab_offset.x, page.y - grab_offset.y);
                let Some(patch) = self.update_element(&id, ElementPatch::position(proposed)) else {
                    return Vec::new();
                };
                let mut actions = vec![Action::ElementUpdated { id, patch }];
                if self.ui.guides != before {
                    actions.push(Action::GuidesChanged(self.ui.guides));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::ResizingImage { id, start_page, orig_size } => {
                let size = Size::new(
                    orig_size.width + (page.x - start_page.x),
                    orig_size.height + (page.y - start_page.y),
                )
                .clamped_to_min();
                self.update_element(&id, ElementPatch::size(size))
                    .map(|patch| vec![Action::ElementUpdated { id, patch }, Action::RenderNeeded])
                    .unwrap_or_default()
            }
            InputState::EditingText(_) | InputState::PendingDrag { .. } => Vec::new(),
            InputState::Idle => self.update_hover(page),
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.input.captures_pointer() {
            return Vec::new();
        }
        let finished = std::mem::take(&mut self.input);
        let mut actions = Vec::new();
        if matches!(finished, InputState::DraggingElement { .. }) {
            actions.extend(self.clear_guides());
        }
        if matches!(finished, InputState::ResizingImage { .. }) {
            actions.extend(self.set_cursor("default"));
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// The pointer left an element's bounds. Gestures keep tracking; only hover clears.
    pub fn on_pointer_leave_element(&mut self, id: &ElementId) -> Vec<Action> {
        if self.ui.hovered_id != Some(*id) || self.input.captures_pointer() {
            return Vec::new();
        }
        self.ui.hovered_id = None;
        let mut actions = self.set_cursor("default");
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is("Escape") {
            return self.cancel_gesture();
        }
        if key.is("Delete") || key.is("Backspace") {
            if !matches!(self.input, InputState::Idle) {
                return Vec::new();
            }
            let Some(id) = self.ui.selected_id else {
                return Vec::new();
            };
            if self.delete_element(&id) {
                return vec![Action::ElementDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded];
            }
        }
        Vec::new()
    }

    fn cancel_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::EditingText(session) => {
                self.input = InputState::EditingText(session);
                self.finish_text_edit(EditOutcome::Cancel)
            }
            InputState::DraggingElement { id, orig, .. } => {
                let restore = ElementPatch::position(orig);
                self.scene.apply_patch(&id, &restore);
                self.mark_dirty();
                let mut actions = vec![Action::ElementUpdated { id, patch: restore }];
                actions.extend(self.clear_guides());
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::ResizingImage { id, orig_size, .. } => {
                let restore = ElementPatch::size(orig_size);
                self.scene.apply_patch(&id, &restore);
                self.mark_dirty();
                let mut actions = vec![Action::ElementUpdated { id, patch: restore }];
                actions.extend(self.set_cursor("default"));
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::PendingDrag { .. } => Vec::new(),
            InputState::Idle => self.select(None),
        }
    }

    // --- Helpers ---

    fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    fn clear_guides(&mut self) -> Vec<Action> {
        if !self.ui.guides.any() {
            return Vec::new();
        }
        self.ui.guides = AlignmentGuides::default();
        vec![Action::GuidesChanged(self.ui.guides)]
    }

    fn set_cursor(&mut self, cursor: &'static str) -> Vec<Action> {
        if self.cursor == cursor {
            return Vec::new();
        }
        self.cursor = cursor;
        vec![Action::SetCursor(cursor)]
    }

    fn update_hover(&mut self, page: Point) -> Vec<Action> {
        let hit = hit_test(page, &self.scene, &self.ui, self.measure.as_ref());
        let hovered = hit.map(|h| h.element_id);
        let cursor = match hit.map(|h| h.part) {
            Some(HitPart::DragHandle) => "move",
            Some(HitPart::ResizeHandle) => "nwse-resize",
            Some(HitPart::EditButton | HitPart::ReplaceButton | HitPart::DeleteButton | HitPart::Body) => "pointer",
            None => "default",
        };
        let mut actions = self.set_cursor(cursor);
        if hovered != self.ui.hovered_id {
            self.ui.hovered_id = hovered;
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn gesture_target(&self) -> Option<ElementId> {
        match &self.input {
            InputState::PendingDrag { id, .. }
            | InputState::DraggingElement { id, .. }
            | InputState::ResizingImage { id, .. } => Some(*id),
            InputState::EditingText(session) => Some(session.id),
            InputState::Idle => None,
        }
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.scene.get(id)
    }

    /// Interaction state of one element, derived from selection, hover, and gesture.
    #[must_use]
    pub fn element_state(&self, id: &ElementId) -> ElementState {
        match &self.input {
            InputState::DraggingElement { id: target, .. } if target == id => return ElementState::Dragging,
            InputState::ResizingImage { id: target, .. } if target == id => return ElementState::Resizing,
            InputState::EditingText(session) if session.id == *id => return ElementState::EditingModal,
            _ => {}
        }
        if self.ui.selected_id == Some(*id) {
            ElementState::Selected
        } else if self.ui.hovered_id == Some(*id) {
            ElementState::Hovered
        } else {
            ElementState::Idle
        }
    }

    #[must_use]
    pub fn measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }
}

/// Echo the fields of `requested` with the values actually stored on `element`.
fn stored_patch(element: &Element, requested: &ElementPatch) -> ElementPatch {
    let mut out = requested.clone();
    if out.position.is_some() {
        out.position = Some(element.position());
    }
    match element {
        Element::Text(text) => {
            if out.font_size.is_some() {
                out.font_size = Some(text.font_size);
            }
            if out.opacity.is_some() {
                out.opacity = Some(text.opacity);
            }
            out.size = None;
            out.src = None;
        }
        Element::Image(image) => {
            if out.size.is_some() {
                out.size = Some(image.size);
            }
            out.content = None;
            out.font_size = None;
            out.font_weight = None;
            out.color = None;
            out.opacity = None;
            out.align = None;
        }
    }
    out
}
