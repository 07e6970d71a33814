//! Document model: page elements, their styles, and the ordered scene.
//!
//! This module defines what is on the page (`Element` with its `Text` and
//! `Image` variants), a sparse-update type for incremental edits
//! (`ElementPatch`), and the runtime container that owns the elements plus
//! the background (`Scene`).
//!
//! Data flows into this layer from persisted JSON blobs and from the input
//! engine. The PDF projector and any host renderer read `Scene::elements` in
//! order; list order is paint order.
//!
//! The serialized field names match the persisted browser blob
//! (`{elements, backgroundImage, backgroundOverlay, backgroundOverlayOpacity}`).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{MAX_FONT_SIZE, MIN_FONT_SIZE, MIN_IMAGE_SIZE};

/// Unique identifier for a page element.
pub type ElementId = Uuid;

/// Default overlay color when none has been chosen.
pub const DEFAULT_OVERLAY_COLOR: &str = "#000000";

/// Default text color for new and seeded text.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Text weight. Unknown persisted values read back as `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Semibold,
    Bold,
    Extrabold,
}

impl FontWeight {
    /// Map a CSS-style weight keyword; anything unrecognized is `Normal`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "semibold" => Self::Semibold,
            "bold" => Self::Bold,
            "extrabold" => Self::Extrabold,
            _ => Self::Normal,
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Map an alignment keyword; anything unrecognized is `Center`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Center,
        }
    }
}

impl<'de> Deserialize<'de> for TextAlign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Width and height in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp both sides to the minimum image size.
    #[must_use]
    pub fn clamped_to_min(self) -> Self {
        Self { width: self.width.max(MIN_IMAGE_SIZE), height: self.height.max(MIN_IMAGE_SIZE) }
    }
}

fn full_opacity() -> u8 {
    100
}

/// A block of (possibly multi-line) text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Top-left corner in page coordinates.
    pub position: Point,
    /// Text content; may contain newlines.
    #[serde(rename = "text")]
    pub content: String,
    /// Font size in page pixels, within [8, 72].
    pub font_size: u32,
    /// Font weight.
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Text color as `#rrggbb`.
    pub color: String,
    /// Opacity percent in [0, 100].
    #[serde(default = "full_opacity")]
    pub opacity: u8,
    /// Horizontal alignment within the text box.
    #[serde(default)]
    pub align: TextAlign,
}

/// A bitmap placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Top-left corner in page coordinates.
    pub position: Point,
    /// Image source: a site-relative path or a `data:` URI.
    pub src: String,
    /// Rendered size in page pixels.
    pub size: Size,
}

/// A positionable object on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
}

impl Element {
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Text(t) => t.id,
            Self::Image(i) => i.id,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Text(t) => t.position,
            Self::Image(i) => i.position,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Self::Text(t) => t.position = position,
            Self::Image(i) => i.position = position,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Self::Text(t) => Some(t),
            Self::Image(_) => None,
        }
    }

    #[must_use]
    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Self::Image(i) => Some(i),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

/// Sparse update for an element. Only present fields are applied; fields that
/// do not exist on the target variant are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// New top-left position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// New text content (text only).
    #[serde(rename = "text", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New font size (text only). Clamped to [8, 72].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// New font weight (text only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    /// New color (text only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// New opacity percent (text only). Clamped to [0, 100].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u8>,
    /// New alignment (text only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    /// New size (image only). Clamped to the minimum image size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// New image source (image only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl ElementPatch {
    /// A patch carrying only a position.
    #[must_use]
    pub fn position(position: Point) -> Self {
        Self { position: Some(position), ..Default::default() }
    }

    /// A patch carrying only a size.
    #[must_use]
    pub fn size(size: Size) -> Self {
        Self { size: Some(size), ..Default::default() }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the patch that restores every style field of `text`.
    #[must_use]
    pub fn restore_text(text: &TextElement) -> Self {
        Self {
            content: Some(text.content.clone()),
            font_size: Some(text.font_size),
            font_weight: Some(text.font_weight),
            color: Some(text.color.clone()),
            opacity: Some(text.opacity),
            align: Some(text.align),
            ..Default::default()
        }
    }
}

/// The editable page: ordered elements plus background and overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Elements in paint order (first = bottom).
    pub elements: Vec<Element>,
    /// Background image path or data URI, stretched to the full page.
    #[serde(default)]
    pub background_image: String,
    /// Overlay color as `#rrggbb` or `rgb(a)(...)`.
    #[serde(default = "default_overlay_color")]
    pub background_overlay: String,
    /// Overlay opacity percent in [0, 100]; 0 disables the overlay.
    #[serde(default)]
    pub background_overlay_opacity: u8,
}

fn default_overlay_color() -> String {
    DEFAULT_OVERLAY_COLOR.to_string()
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Scene {
    /// Create an empty scene with the given background and no overlay.
    #[must_use]
    pub fn new(background_image: String) -> Self {
        Self {
            elements: Vec::new(),
            background_image,
            background_overlay: default_overlay_color(),
            background_overlay_opacity: 0,
        }
    }

    /// Append an element on top of the paint order. If an element with the
    /// same id already exists it is replaced in place.
    pub fn insert(&mut self, element: Element) {
        match self.index_of(&element.id()) {
            Some(idx) => self.elements[idx] = element,
            None => self.elements.push(element),
        }
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let idx = self.index_of(id)?;
        Some(self.elements.remove(idx))
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == *id)
    }

    /// Position of an element in paint order.
    #[must_use]
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == *id)
    }

    /// Merge a partial update into an existing element. Returns false if the
    /// element doesn't exist.
    ///
    /// Style constraints are clamped here: font size to [8, 72], opacity to
    /// at most 100, image size to the 50×50 minimum. Position is applied as
    /// given; bounds and snapping belong to the engine.
    pub fn apply_patch(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id() == *id) else {
            return false;
        };
        if let Some(position) = patch.position {
            element.set_position(position);
        }
        match element {
            Element::Text(text) => {
                if let Some(ref content) = patch.content {
                    text.content.clone_from(content);
                }
                if let Some(size) = patch.font_size {
                    text.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                }
                if let Some(weight) = patch.font_weight {
                    text.font_weight = weight;
                }
                if let Some(ref color) = patch.color {
                    text.color.clone_from(color);
                }
                if let Some(opacity) = patch.opacity {
                    text.opacity = opacity.min(100);
                }
                if let Some(align) = patch.align {
                    text.align = align;
                }
            }
            Element::Image(image) => {
                if let Some(size) = patch.size {
                    image.size = size.clamped_to_min();
                }
                if let Some(ref src) = patch.src {
                    image.src.clone_from(src);
                }
            }
        }
        true
    }

    /// Replace all elements with a new list, dropping later duplicates of an id.
    pub fn load_elements(&mut self, elements: Vec<Element>) {
        self.elements.clear();
        for element in elements {
            if self.get(&element.id()).is_none() {
                self.elements.push(element);
            }
        }
    }

    /// Remove every element; background and overlay are kept.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements currently on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the page has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
