use uuid::Uuid;

use super::*;

// =============================================================
// Modifiers / Key
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
}

#[test]
fn key_matches_by_name() {
    let k = Key("Escape".into());
    assert!(k.is("Escape"));
    assert!(!k.is("Delete"));
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default_has_nothing_selected() {
    let ui = UiState::default();
    assert!(ui.selected_id.is_none());
    assert!(ui.hovered_id.is_none());
    assert!(!ui.guides.any());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
}

#[test]
fn dragging_id_only_for_active_drag() {
    let id = Uuid::new_v4();
    let pending = InputState::PendingDrag { id, grab_offset: Point::default(), orig: Point::default() };
    assert_eq!(pending.dragging_id(), None);

    let dragging = InputState::DraggingElement { id, grab_offset: Point::default(), orig: Point::default() };
    assert_eq!(dragging.dragging_id(), Some(id));
}

#[test]
fn captures_pointer_for_gestures_only() {
    let id = Uuid::new_v4();
    assert!(!InputState::Idle.captures_pointer());
    assert!(
        InputState::ResizingImage { id, start_page: Point::default(), orig_size: Size::new(100.0, 100.0) }
            .captures_pointer()
    );
    assert!(InputState::PendingDrag { id, grab_offset: Point::default(), orig: Point::default() }.captures_pointer());
}

#[test]
fn edit_outcome_variants_distinct() {
    assert_ne!(EditOutcome::Save, EditOutcome::Cancel);
}
