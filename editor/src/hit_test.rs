#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::align::HeuristicMeasure;
use crate::doc::{FontWeight, ImageElement, Size, TextAlign, TextElement};

fn image_at(x: f64, y: f64, w: f64, h: f64) -> Element {
    Element::Image(ImageElement {
        id: Uuid::new_v4(),
        position: Point::new(x, y),
        src: "/diu_logo.png".into(),
        size: Size::new(w, h),
    })
}

fn text_at(x: f64, y: f64, content: &str) -> Element {
    Element::Text(TextElement {
        id: Uuid::new_v4(),
        position: Point::new(x, y),
        content: content.into(),
        font_size: 20,
        font_weight: FontWeight::Normal,
        color: "#000000".into(),
        opacity: 100,
        align: TextAlign::Center,
    })
}

fn scene_with(elements: Vec<Element>) -> Scene {
    let mut scene = Scene::default();
    scene.load_elements(elements);
    scene
}

fn selected(id: ElementId) -> UiState {
    UiState { selected_id: Some(id), ..UiState::default() }
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_contains_edges_inclusive() {
    let r = Rect { x: 10.0, y: 10.0, width: 20.0, height: 20.0 };
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(r.contains(Point::new(30.0, 30.0)));
    assert!(!r.contains(Point::new(30.1, 20.0)));
}

#[test]
fn rect_inflate_grows_every_side() {
    let r = Rect { x: 10.0, y: 10.0, width: 20.0, height: 20.0 }.inflate(2.0);
    assert_eq!(r, Rect { x: 8.0, y: 8.0, width: 24.0, height: 24.0 });
}

#[test]
fn element_bounds_text_uses_minimum_extent() {
    let el = text_at(0.0, 0.0, "a");
    let b = element_bounds(&el, &HeuristicMeasure);
    assert_eq!(b.width, 50.0);
    assert_eq!(b.height, 24.0);
}

// =============================================================
// hit_test: bodies
// =============================================================

#[test]
fn miss_on_empty_page() {
    let scene = Scene::default();
    assert!(hit_test(Point::new(10.0, 10.0), &scene, &UiState::default(), &HeuristicMeasure).is_none());
}

#[test]
fn inside_unselected_element_is_drag_handle() {
    let img = image_at(100.0, 100.0, 200.0, 100.0);
    let id = img.id();
    let scene = scene_with(vec![img]);
    let hit = hit_test(Point::new(150.0, 150.0), &scene, &UiState::default(), &HeuristicMeasure);
    assert_eq!(hit, Some(Hit { element_id: id, part: HitPart::DragHandle }));
}

#[test]
fn selection_ring_is_body() {
    let img = image_at(100.0, 100.0, 200.0, 100.0);
    let id = img.id();
    let scene = scene_with(vec![img]);
    let hit = hit_test(Point::new(99.0, 150.0), &scene, &UiState::default(), &HeuristicMeasure);
    assert_eq!(hit, Some(Hit { element_id: id, part: HitPart::Body }));
}

#[test]
fn outside_ring_misses() {
    let scene = scene_with(vec![image_at(100.0, 100.0, 200.0, 100.0)]);
    assert!(hit_test(Point::new(97.0, 150.0), &scene, &UiState::default(), &HeuristicMeasure).is_none());
}

#[test]
fn topmost_element_wins() {
    let bottom = image_at(100.0, 100.0, 200.0, 100.0);
    let top = image_at(150.0, 120.0, 100.0, 100.0);
    let top_id = top.id();
    let scene = scene_with(vec![bottom, top]);
    let hit = hit_test(Point::new(160.0, 150.0), &scene, &UiState::default(), &HeuristicMeasure);
    assert_eq!(hit.map(|h| h.element_id), Some(top_id));
}

#[test]
fn selected_element_is_tested_first() {
    let bottom = image_at(100.0, 100.0, 200.0, 100.0);
    let bottom_id = bottom.id();
    let top = image_at(150.0, 120.0, 100.0, 100.0);
    let scene = scene_with(vec![bottom, top]);
    let hit = hit_test(Point::new(160.0, 150.0), &scene, &selected(bottom_id), &HeuristicMeasure);
    assert_eq!(hit.map(|h| h.element_id), Some(bottom_id));
}

// =============================================================
// hit_test: controls
// =============================================================

#[test]
fn controls_hidden_when_not_hovered_or_selected() {
    let img = image_at(100.0, 100.0, 200.0, 100.0);
    let scene = scene_with(vec![img]);
    let hit = hit_test(Point::new(290.0, 110.0), &scene, &UiState::default(), &HeuristicMeasure);
    assert_eq!(hit.map(|h| h.part), Some(HitPart::DragHandle));
}

#[test]
fn delete_button_on_selected_image() {
    let img = image_at(100.0, 100.0, 200.0, 100.0);
    let id = img.id();
    let scene = scene_with(vec![img]);
    let hit = hit_test(Point::new(290.0, 110.0), &scene, &selected(id), &HeuristicMeasure);
    assert_eq!(hit.map(|h| h.part), Some(HitPart::DeleteButton));
}

#[test]
fn replace_button_on_hovered_image() {
    let img = image_at(100.0, 100.0, 200.0, 100.0);
    let id = img.id();
    let scene = scene_with(vec![img]);
    let ui = UiState { hovered_id: Some(id), ..UiState::default() };
    let hit = hit_test(Point::new(265.0, 110.0), &scene, &ui, &HeuristicMeasure);
    assert_eq!(hit.map(|h| h.part), Some(HitPart::ReplaceButton));
}

#[test]
fn edit_button_on_selected_text() {
    let txt = text_at(100.0, 100.0, "A fairly long heading line");
    let id = txt.id();
    let scene = scene_with(vec![txt.clone()]);
    let b = element_bounds(&txt, &HeuristicMeasure);
    let pt = Point::new(b.x + b.width - CONTROL_BUTTON_PX - 5.0, b.y + 5.0);
    let hit = hit_test(pt, &scene, &selected(id), &HeuristicMeasure);
    assert_eq!(hit.map(|h| h.part), Some(HitPart::EditButton));
}

#[test]
fn resize_handle_only_on_images() {
    let img = image_at(100.0, 100.0, 200.0, 100.0);
    let img_id = img.id();
    let scene = scene_with(vec![img]);
    let hit = hit_test(Point::new(295.0, 195.0), &scene, &selected(img_id), &HeuristicMeasure);
    assert_eq!(hit.map(|h| h.part), Some(HitPart::ResizeHandle));

    let txt = text_at(100.0, 100.0, "Line one\nLine two\nLine three");
    let txt_id = txt.id();
    let b = element_bounds(&txt, &HeuristicMeasure);
    let scene = scene_with(vec![txt]);
    let corner = Point::new(b.x + b.width - 2.0, b.y + b.height - 2.0);
    let hit = hit_test(corner, &scene, &selected(txt_id), &HeuristicMeasure);
    assert_eq!(hit.map(|h| h.part), Some(HitPart::DragHandle));
}
