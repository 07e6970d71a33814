#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{FontWeight, ImageElement, TextAlign, TextElement};

fn text_el(content: &str, font_size: u32) -> Element {
    Element::Text(TextElement {
        id: Uuid::new_v4(),
        position: Point::new(0.0, 0.0),
        content: content.into(),
        font_size,
        font_weight: FontWeight::Normal,
        color: "#000000".into(),
        opacity: 100,
        align: TextAlign::Center,
    })
}

fn image_el(w: f64, h: f64) -> Element {
    Element::Image(ImageElement {
        id: Uuid::new_v4(),
        position: Point::new(0.0, 0.0),
        src: String::new(),
        size: Size::new(w, h),
    })
}

// =============================================================
// estimate_text_center_offset / is_near_center
// =============================================================

#[test]
fn center_offset_matches_heuristic() {
    // 5 chars * 20px * 0.6 / 2
    assert_eq!(estimate_text_center_offset("Hello", 20.0), 30.0);
}

#[test]
fn center_offset_is_deterministic() {
    let a = estimate_text_center_offset("Course Code: CSE101", 18.0);
    let b = estimate_text_center_offset("Course Code: CSE101", 18.0);
    assert_eq!(a, b);
}

#[test]
fn center_offset_counts_astral_chars_as_two_units() {
    assert_eq!(estimate_text_center_offset("😀", 10.0), estimate_text_center_offset("ab", 10.0));
}

#[test]
fn center_offset_counts_chars_not_bytes() {
    assert_eq!(estimate_text_center_offset("ééé", 10.0), estimate_text_center_offset("eee", 10.0));
}

#[test]
fn center_offset_empty_is_zero() {
    assert_eq!(estimate_text_center_offset("", 72.0), 0.0);
}

#[test]
fn near_center_is_strict() {
    assert!(is_near_center(297.5, 297.5, 5.0));
    assert!(is_near_center(293.0, 297.5, 5.0));
    assert!(!is_near_center(292.5, 297.5, 5.0));
    assert!(!is_near_center(310.0, 297.5, 5.0));
}

// =============================================================
// visual_center_offset / element_extent
// =============================================================

#[test]
fn image_center_is_half_size() {
    let el = image_el(100.0, 60.0);
    assert_eq!(visual_center_offset(&el, &HeuristicMeasure), Point::new(50.0, 30.0));
}

#[test]
fn text_center_uses_measure_and_line_count() {
    let el = text_el("ab\ncd", 10);
    let c = visual_center_offset(&el, &HeuristicMeasure);
    // 5 chars (newline included) * 10 * 0.6 / 2 = 15; 2 lines * 12 / 2 = 12
    assert_eq!(c.x, 15.0);
    assert!((c.y - 12.0).abs() < 1e-9);
}

#[test]
fn text_extent_respects_minimum_box() {
    let el = text_el("a", 8);
    let size = element_extent(&el, &HeuristicMeasure);
    assert_eq!(size.width, 50.0);
    assert_eq!(size.height, 24.0);
}

#[test]
fn image_extent_is_stored_size() {
    let el = image_el(120.0, 80.0);
    assert_eq!(element_extent(&el, &HeuristicMeasure), Size::new(120.0, 80.0));
}

// =============================================================
// clamp / snap
// =============================================================

#[test]
fn clamp_removes_negative_coordinates() {
    assert_eq!(clamp_to_page(Point::new(-4.0, 10.0)), Point::new(0.0, 10.0));
    assert_eq!(clamp_to_page(Point::new(3.0, -0.1)), Point::new(3.0, 0.0));
}

#[test]
fn snap_locks_center_exactly_within_threshold() {
    let result = snap_to_page_center(Point::new(245.0, 100.0), Point::new(50.0, 50.0), 5.0);
    assert_eq!(result.position.x + 50.0, PAGE_WIDTH / 2.0);
    assert_eq!(result.position.y, 100.0);
    assert!(result.guides.vertical);
    assert!(!result.guides.horizontal);
}

#[test]
fn snap_axes_are_independent() {
    let result = snap_to_page_center(Point::new(249.0, 372.0), Point::new(50.0, 50.0), 5.0);
    assert!(result.guides.vertical);
    assert!(result.guides.horizontal);
    assert_eq!(result.position.y + 50.0, PAGE_HEIGHT / 2.0);
}

#[test]
fn snap_outside_threshold_leaves_position() {
    let p = Point::new(200.0, 200.0);
    let result = snap_to_page_center(p, Point::new(50.0, 50.0), 5.0);
    assert_eq!(result.position, p);
    assert!(!result.guides.any());
}

#[test]
fn snap_never_goes_negative_for_oversized_elements() {
    let result = snap_to_page_center(Point::new(0.0, 0.0), Point::new(298.0, 10.0), 5.0);
    assert!(result.guides.vertical);
    assert!(result.position.x >= 0.0);
}

// =============================================================
// aligned_position
// =============================================================

#[test]
fn align_left_and_top_use_padding() {
    let p = Point::new(100.0, 100.0);
    let extent = Size::new(100.0, 100.0);
    let center = Point::new(50.0, 50.0);
    assert_eq!(aligned_position(p, extent, center, AlignTarget::Left), Point::new(20.0, 100.0));
    assert_eq!(aligned_position(p, extent, center, AlignTarget::Top), Point::new(100.0, 20.0));
}

#[test]
fn align_right_is_flush_and_bottom_is_padded() {
    let p = Point::new(100.0, 100.0);
    let extent = Size::new(100.0, 100.0);
    let center = Point::new(50.0, 50.0);
    assert_eq!(aligned_position(p, extent, center, AlignTarget::Right).x, PAGE_WIDTH - 100.0);
    assert_eq!(aligned_position(p, extent, center, AlignTarget::Bottom).y, PAGE_HEIGHT - 120.0);
}

#[test]
fn align_centers_use_visual_center() {
    let p = Point::new(0.0, 0.0);
    let extent = Size::new(100.0, 40.0);
    let center = Point::new(50.0, 20.0);
    assert_eq!(aligned_position(p, extent, center, AlignTarget::HorizontalCenter).x, 247.5);
    assert_eq!(aligned_position(p, extent, center, AlignTarget::VerticalCenter).y, 401.0);
}

#[test]
fn align_changes_only_one_axis() {
    let p = Point::new(33.0, 44.0);
    let out = aligned_position(p, Size::new(10.0, 10.0), Point::new(5.0, 5.0), AlignTarget::Left);
    assert_eq!(out.y, 44.0);
}
