//! Screen ⇄ page coordinate conversion.
//!
//! The page is laid out on screen at some offset and zoom factor, but every
//! position, size, and snap computation in the editor happens in fixed page
//! pixels. Input handlers convert incoming pointer positions through the
//! [`Viewport`] before touching the scene.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the page sits on screen.
///
/// `offset_x` / `offset_y` locate the page's top-left corner in CSS pixels.
/// `scale` is the on-screen zoom (1.0 = one page pixel per CSS pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: 1.0 }
    }
}

impl Viewport {
    /// Build a viewport, ignoring non-positive or non-finite scales.
    #[must_use]
    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        Self { offset_x, offset_y, scale }
    }

    /// Convert a screen-space point (CSS pixels) to page coordinates.
    #[must_use]
    pub fn screen_to_page(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a page-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn page_to_screen(&self, page: Point) -> Point {
        Point {
            x: page.x * self.scale + self.offset_x,
            y: page.y * self.scale + self.offset_y,
        }
    }

    /// Convert a screen-space distance (pixels) to a page-space distance.
    #[must_use]
    pub fn screen_dist_to_page(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
