//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying all context needed to compute deltas, revert on
//! Escape, and report final element updates on release. `UiState` holds the
//! persistent, non-persisted view state (selection, hover, snap guides).
//!
//! Per-element states (`ElementState`) are derived from these two, never
//! stored, so there is exactly one source of truth for "who is selected" and
//! "what is being dragged".

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::align::AlignmentGuides;
use crate::camera::Point;
use crate::doc::{ElementId, Size, TextElement};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Persistent UI state visible to the renderer. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// The id of the element under the pointer, if any.
    pub hovered_id: Option<ElementId>,
    /// Center lines the dragged element is currently snapped to.
    pub guides: AlignmentGuides,
}

/// Derived interaction state of a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Idle,
    Hovered,
    Selected,
    Dragging,
    Resizing,
    EditingModal,
}

/// Open text-edit modal: the element being edited and its style when the
/// modal opened.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    pub id: ElementId,
    pub original: TextElement,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Pointer went down on a drag handle but has not moved yet.
    PendingDrag {
        /// Id of the pressed element.
        id: ElementId,
        /// Pointer position minus element position at press time, in page space.
        grab_offset: Point,
        /// Element position at press time.
        orig: Point,
    },
    /// The user is moving an element across the page.
    DraggingElement {
        /// Id of the element being dragged.
        id: ElementId,
        /// Pointer position minus element position at press time, in page space.
        grab_offset: Point,
        /// Element position at the start of the drag, used to revert on Escape.
        orig: Point,
    },
    /// The user is resizing an image from its bottom-right handle.
    ResizingImage {
        /// Id of the image being resized.
        id: ElementId,
        /// Page-space pointer position at the start of the resize.
        start_page: Point,
        /// Image size at the start of the resize.
        orig_size: Size,
    },
    /// The text-edit modal is open.
    EditingText(TextEditSession),
}

impl InputState {
    /// Id of the element an active drag (not a pending press) is moving.
    #[must_use]
    pub fn dragging_id(&self) -> Option<ElementId> {
        match self {
            Self::DraggingElement { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Whether a drag or resize currently captures pointer input.
    #[must_use]
    pub fn captures_pointer(&self) -> bool {
        matches!(self, Self::PendingDrag { .. } | Self::DraggingElement { .. } | Self::ResizingImage { .. })
    }
}

/// Outcome chosen when closing the text-edit modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Keep the live edits (Save button or click outside).
    Save,
    /// Restore the style captured when the modal opened (Cancel button or Escape).
    Cancel,
}

/// A single field change made in the text-edit modal.
#[derive(Debug, Clone, PartialEq)]
pub enum TextField {
    Content(String),
    FontSize(u32),
    FontWeight(crate::doc::FontWeight),
    Color(String),
    Opacity(u8),
    Align(crate::doc::TextAlign),
}
