#![allow(clippy::float_cmp)]

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// parse_hex
// =============================================================

#[test]
fn hex_parses_six_digits() {
    assert_eq!(parse_hex("#ff0000"), Some((255, 0, 0)));
    assert_eq!(parse_hex("#1A365D"), Some((0x1a, 0x36, 0x5d)));
}

#[test]
fn hex_found_inside_longer_string() {
    assert_eq!(parse_hex("color: #00ff00;"), Some((0, 255, 0)));
}

#[test]
fn hex_rejects_short_or_invalid() {
    assert_eq!(parse_hex("#fff"), None);
    assert_eq!(parse_hex("#gg0000"), None);
    assert_eq!(parse_hex("red"), None);
}

// =============================================================
// parse_rgb_function
// =============================================================

#[test]
fn rgba_parses_alpha() {
    assert_eq!(parse_rgb_function("rgba(10,20,30,0.5)"), Some((10, 20, 30, Some(0.5))));
}

#[test]
fn rgb_has_no_alpha() {
    assert_eq!(parse_rgb_function("rgb(1, 2, 3)"), Some((1, 2, 3, None)));
}

#[test]
fn rgb_rejects_out_of_range_and_garbage() {
    assert_eq!(parse_rgb_function("rgb(300, 0, 0)"), None);
    assert_eq!(parse_rgb_function("rgb(1, 2)"), None);
    assert_eq!(parse_rgb_function("rgba(1, 2, 3, x)"), None);
    assert_eq!(parse_rgb_function("hsl(1, 2, 3)"), None);
}

// =============================================================
// overlay_fill
// =============================================================

#[test]
fn overlay_rgba_multiplies_alpha_by_opacity() {
    let fill = overlay_fill("rgba(10,20,30,0.5)", 80);
    assert!(approx(fill.a, 0.4));
    assert!(approx(fill.r, 10.0 / 255.0));
    assert!(approx(fill.g, 20.0 / 255.0));
    assert!(approx(fill.b, 30.0 / 255.0));
}

#[test]
fn overlay_hex_uses_opacity_only() {
    let fill = overlay_fill("#000000", 35);
    assert!(approx(fill.a, 0.35));
    assert_eq!(fill.r, 0.0);
}

#[test]
fn overlay_rgb_without_alpha_uses_opacity() {
    let fill = overlay_fill("rgb(255, 255, 255)", 50);
    assert!(approx(fill.a, 0.5));
    assert_eq!(fill.r, 1.0);
}

#[test]
fn overlay_unrecognized_is_transparent_black() {
    let fill = overlay_fill("papayawhip", 90);
    assert_eq!(fill, Rgba::TRANSPARENT);
    assert!(fill.is_invisible());
}

#[test]
fn overlay_zero_opacity_is_invisible() {
    assert!(overlay_fill("#123456", 0).is_invisible());
}

// =============================================================
// text_fill
// =============================================================

#[test]
fn text_fill_hex_is_opaque() {
    let fill = text_fill("#ff0000");
    assert_eq!((fill.r, fill.g, fill.b, fill.a), (1.0, 0.0, 0.0, 1.0));
}

#[test]
fn text_fill_unrecognized_is_black() {
    assert_eq!(text_fill("not a color"), Rgba::BLACK);
}
