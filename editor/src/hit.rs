#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::align::{TextMeasure, element_extent};
use crate::camera::Point;
use crate::consts::{CONTROL_BUTTON_PX, RESIZE_HANDLE_PX, SELECTION_RING_PX};
use crate::doc::{Element, ElementId, Scene};
use crate::input::UiState;

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The selection ring around the element; selects without arming a drag.
    Body,
    /// The element content; selects and arms a drag.
    DragHandle,
    /// Bottom-right resize handle (images only).
    ResizeHandle,
    /// "Edit" button in the control strip (text only).
    EditButton,
    /// "Replace image" button in the control strip (images only).
    ReplaceButton,
    /// "Delete" button in the control strip.
    DeleteButton,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Axis-aligned rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    #[must_use]
    pub fn inflate(&self, by: f64) -> Rect {
        Rect { x: self.x - by, y: self.y - by, width: self.width + 2.0 * by, height: self.height + 2.0 * by }
    }
}

/// Bounding box of an element on the editing surface.
#[must_use]
pub fn element_bounds(element: &Element, measure: &dyn TextMeasure) -> Rect {
    let p = element.position();
    let size = element_extent(element, measure);
    Rect { x: p.x, y: p.y, width: size.width, height: size.height }
}

/// Rect of the `slot`-th control button counted from the right edge.
fn control_rect(bounds: &Rect, slot: u8) -> Rect {
    let right = bounds.x + bounds.width - f64::from(slot) * CONTROL_BUTTON_PX;
    Rect { x: right - CONTROL_BUTTON_PX, y: bounds.y, width: CONTROL_BUTTON_PX, height: CONTROL_BUTTON_PX }
}

fn resize_rect(bounds: &Rect) -> Rect {
    Rect {
        x: bounds.x + bounds.width - RESIZE_HANDLE_PX,
        y: bounds.y + bounds.height - RESIZE_HANDLE_PX,
        width: RESIZE_HANDLE_PX,
        height: RESIZE_HANDLE_PX,
    }
}

fn hit_element(pt: Point, element: &Element, controls_visible: bool, measure: &dyn TextMeasure) -> Option<HitPart> {
    let bounds = element_bounds(element, measure);
    if controls_visible {
        if control_rect(&bounds, 0).contains(pt) {
            return Some(HitPart::DeleteButton);
        }
        if control_rect(&bounds, 1).contains(pt) {
            return Some(if element.is_text() { HitPart::EditButton } else { HitPart::ReplaceButton });
        }
        if element.is_image() && resize_rect(&bounds).contains(pt) {
            return Some(HitPart::ResizeHandle);
        }
    }
    if bounds.contains(pt) {
        return Some(HitPart::DragHandle);
    }
    if bounds.inflate(SELECTION_RING_PX).contains(pt) {
        return Some(HitPart::Body);
    }
    None
}

/// Test which element (if any) is under `page_pt`.
///
/// The selected element is visually raised, so it is tested first; the rest
/// are tested topmost-first. Controls and the resize handle only count when
/// the element is hovered or selected.
#[must_use]
pub fn hit_test(page_pt: Point, scene: &Scene, ui: &UiState, measure: &dyn TextMeasure) -> Option<Hit> {
    let selected = ui.selected_id.and_then(|id| scene.get(&id));
    let rest = scene.elements().iter().rev().filter(|e| Some(e.id()) != ui.selected_id);

    for element in selected.into_iter().chain(rest) {
        let id = element.id();
        let controls_visible = ui.selected_id == Some(id) || ui.hovered_id == Some(id);
        if let Some(part) = hit_element(page_pt, element, controls_visible, measure) {
            return Some(Hit { element_id: id, part });
        }
    }
    None
}
