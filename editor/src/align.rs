//! Geometry helpers: text-extent estimation, center snapping, and explicit
//! alignment against the fixed page.
//!
//! Everything here is a pure function of its inputs and runs synchronously
//! inside every drag-move event.
//!
//! TRADE-OFFS
//! ==========
//! Text extent is a character-count heuristic (`len * size * 0.6`), not real
//! font metrics. Proportional fonts will be off by a few pixels. Callers go
//! through [`TextMeasure`] so a metrics-backed measurer can replace
//! [`HeuristicMeasure`] without touching snap or hit-test logic.

#[cfg(test)]
#[path = "align_test.rs"]
mod align_test;

use crate::camera::Point;
use crate::consts::{
    ALIGN_EDGE_PADDING, GLYPH_WIDTH_RATIO, LINE_HEIGHT_RATIO, PAGE_HEIGHT, PAGE_WIDTH, TEXT_MIN_HEIGHT, TEXT_MIN_WIDTH,
};
use crate::doc::{Element, Size};

/// Approximate half the rendered width of `text` at `font_size`.
///
/// Length is counted in UTF-16 code units, so characters outside the Basic
/// Multilingual Plane (emoji) count twice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn estimate_text_center_offset(text: &str, font_size: f64) -> f64 {
    text.encode_utf16().count() as f64 * font_size * GLYPH_WIDTH_RATIO / 2.0
}

/// Whether `value` lies strictly within `threshold` of `center`.
#[must_use]
pub fn is_near_center(value: f64, center: f64, threshold: f64) -> bool {
    (value - center).abs() < threshold
}

/// Strategy for estimating rendered text extents. Shared across threads
/// with the engine that owns it.
pub trait TextMeasure: Send + Sync {
    /// Distance from the left edge of a text block to its visual horizontal center.
    fn center_offset(&self, text: &str, font_size: f64) -> f64;

    /// Rendered width of a single line.
    fn line_width(&self, line: &str, font_size: f64) -> f64;

    /// Baseline-to-baseline distance.
    fn line_height(&self, font_size: f64) -> f64 {
        font_size * LINE_HEIGHT_RATIO
    }
}

/// Character-count text measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasure;

impl TextMeasure for HeuristicMeasure {
    fn center_offset(&self, text: &str, font_size: f64) -> f64 {
        estimate_text_center_offset(text, font_size)
    }

    fn line_width(&self, line: &str, font_size: f64) -> f64 {
        estimate_text_center_offset(line, font_size) * 2.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn line_count(text: &str) -> f64 {
    text.split('\n').count().max(1) as f64
}

/// Offset from an element's top-left corner to its estimated visual center.
#[must_use]
pub fn visual_center_offset(element: &Element, measure: &dyn TextMeasure) -> Point {
    match element {
        Element::Text(t) => {
            let size = f64::from(t.font_size);
            Point::new(
                measure.center_offset(&t.content, size),
                line_count(&t.content) * measure.line_height(size) / 2.0,
            )
        }
        Element::Image(i) => Point::new(i.size.width / 2.0, i.size.height / 2.0),
    }
}

/// Estimated bounding box size of an element on the editing surface.
#[must_use]
pub fn element_extent(element: &Element, measure: &dyn TextMeasure) -> Size {
    match element {
        Element::Text(t) => {
            let size = f64::from(t.font_size);
            let width = measure.center_offset(&t.content, size) * 2.0;
            let height = line_count(&t.content) * measure.line_height(size);
            Size::new(width.max(TEXT_MIN_WIDTH), height.max(TEXT_MIN_HEIGHT))
        }
        Element::Image(i) => i.size,
    }
}

/// Clamp a proposed position so neither coordinate is negative.
#[must_use]
pub fn clamp_to_page(position: Point) -> Point {
    Point::new(position.x.max(0.0), position.y.max(0.0))
}

/// Which page center lines an element is currently locked to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentGuides {
    /// Element center sits on the vertical line `x = PAGE_WIDTH / 2`.
    pub vertical: bool,
    /// Element center sits on the horizontal line `y = PAGE_HEIGHT / 2`.
    pub horizontal: bool,
}

impl AlignmentGuides {
    #[must_use]
    pub fn any(self) -> bool {
        self.vertical || self.horizontal
    }
}

/// Result of snapping a proposed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub position: Point,
    pub guides: AlignmentGuides,
}

/// Snap each axis independently so the element's visual center lands exactly
/// on the page center line when it is within `threshold`.
///
/// `position` should already be clamped; the snapped result is clamped again,
/// which only matters for elements larger than half the page.
#[must_use]
pub fn snap_to_page_center(position: Point, center_offset: Point, threshold: f64) -> SnapResult {
    let page_cx = PAGE_WIDTH / 2.0;
    let page_cy = PAGE_HEIGHT / 2.0;
    let mut out = position;
    let mut guides = AlignmentGuides::default();

    if is_near_center(position.x + center_offset.x, page_cx, threshold) {
        out.x = page_cx - center_offset.x;
        guides.vertical = true;
    }
    if is_near_center(position.y + center_offset.y, page_cy, threshold) {
        out.y = page_cy - center_offset.y;
        guides.horizontal = true;
    }

    SnapResult { position: clamp_to_page(out), guides }
}

/// One-shot alignment target for the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignTarget {
    Left,
    HorizontalCenter,
    Right,
    Top,
    VerticalCenter,
    Bottom,
}

/// Compute the aligned position for an element with the given extent.
///
/// Only the coordinate on the target's axis changes. Left, top, and bottom
/// keep a 20px margin from the page edge; right sits flush.
#[must_use]
pub fn aligned_position(current: Point, extent: Size, center_offset: Point, target: AlignTarget) -> Point {
    let mut p = current;
    match target {
        AlignTarget::Left => p.x = ALIGN_EDGE_PADDING,
        AlignTarget::HorizontalCenter => p.x = PAGE_WIDTH / 2.0 - center_offset.x,
        AlignTarget::Right => p.x = PAGE_WIDTH - extent.width,
        AlignTarget::Top => p.y = ALIGN_EDGE_PADDING,
        AlignTarget::VerticalCenter => p.y = PAGE_HEIGHT / 2.0 - center_offset.y,
        AlignTarget::Bottom => p.y = PAGE_HEIGHT - extent.height - ALIGN_EDGE_PADDING,
    }
    clamp_to_page(p)
}
