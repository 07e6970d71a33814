#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Point
// =============================================================

#[test]
fn point_new_sets_fields() {
    let p = Point::new(3.0, -4.5);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, -4.5);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn default_viewport_is_identity() {
    let vp = Viewport::default();
    let p = Point::new(120.0, 340.0);
    assert_eq!(vp.screen_to_page(p), p);
    assert_eq!(vp.page_to_screen(p), p);
}

#[test]
fn screen_to_page_removes_offset_then_scale() {
    let vp = Viewport::new(100.0, 50.0, 2.0);
    let page = vp.screen_to_page(Point::new(300.0, 250.0));
    assert_eq!(page, Point::new(100.0, 100.0));
}

#[test]
fn page_to_screen_inverts_screen_to_page() {
    let vp = Viewport::new(-40.0, 12.5, 0.75);
    let page = Point::new(297.5, 421.0);
    let back = vp.screen_to_page(vp.page_to_screen(page));
    assert!((back.x - page.x).abs() < 1e-9);
    assert!((back.y - page.y).abs() < 1e-9);
}

#[test]
fn screen_dist_scales_inversely_with_zoom() {
    let vp = Viewport::new(0.0, 0.0, 4.0);
    assert_eq!(vp.screen_dist_to_page(20.0), 5.0);
}

#[test]
fn invalid_scale_falls_back_to_one() {
    assert_eq!(Viewport::new(0.0, 0.0, 0.0).scale, 1.0);
    assert_eq!(Viewport::new(0.0, 0.0, -2.0).scale, 1.0);
    assert_eq!(Viewport::new(0.0, 0.0, f64::NAN).scale, 1.0);
}
