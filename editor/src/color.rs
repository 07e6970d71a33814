//! CSS color parsing for text fills and the background overlay.
//!
//! Accepts `#rrggbb` (anywhere in the string) and `rgb(r, g, b)` /
//! `rgba(r, g, b, a)`. Channels come back normalized to `[0, 1]`.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// A normalized RGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Opaque black.
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    fn from_bytes(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r: f64::from(r) / 255.0, g: f64::from(g) / 255.0, b: f64::from(b) / 255.0, a }
    }

    /// Whether painting this color would have no visible effect.
    #[must_use]
    pub fn is_invisible(&self) -> bool {
        self.a <= 0.0
    }
}

/// Find the first `#rrggbb` run in `raw`.
#[must_use]
pub fn parse_hex(raw: &str) -> Option<(u8, u8, u8)> {
    let bytes = raw.as_bytes();
    for (i, &c) in bytes.iter().enumerate() {
        if c != b'#' {
            continue;
        }
        let Some(digits) = raw.get(i + 1..i + 7) else {
            return None;
        };
        if !digits.bytes().all(|d| d.is_ascii_hexdigit()) {
            continue;
        }
        let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16);
        if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
            return Some((r, g, b));
        }
    }
    None
}

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)`. Alpha is `None` for `rgb(...)`.
#[must_use]
pub fn parse_rgb_function(raw: &str) -> Option<(u8, u8, u8, Option<f64>)> {
    let lower = raw.trim().to_ascii_lowercase();
    let start = lower.find("rgb")?;
    let rest = &lower[start + 3..];
    let rest = rest.strip_prefix('a').unwrap_or(rest);
    let open = rest.strip_prefix('(')?;
    let close = open.find(')')?;
    let parts: Vec<&str> = open[..close].split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let (Ok(r), Ok(g), Ok(b)) = (parts[0].parse::<u8>(), parts[1].parse::<u8>(), parts[2].parse::<u8>()) else {
        return None;
    };
    let a = match parts.get(3) {
        Some(raw_alpha) => {
            let Ok(a) = raw_alpha.parse::<f64>() else {
                return None;
            };
            if !a.is_finite() {
                return None;
            }
            Some(a.clamp(0.0, 1.0))
        }
        None => None,
    };
    Some((r, g, b, a))
}

/// Resolve a text color. Unrecognized input is opaque black.
#[must_use]
pub fn text_fill(raw: &str) -> Rgba {
    if let Some((r, g, b, a)) = parse_rgb_function(raw) {
        return Rgba::from_bytes(r, g, b, a.unwrap_or(1.0));
    }
    match parse_hex(raw) {
        Some((r, g, b)) => Rgba::from_bytes(r, g, b, 1.0),
        None => Rgba::BLACK,
    }
}

/// Resolve the background overlay fill.
///
/// The effective alpha is `opacity_percent / 100`, multiplied by the color's
/// own alpha when it is given as `rgba(...)`. Unrecognized input is fully
/// transparent black.
#[must_use]
pub fn overlay_fill(raw: &str, opacity_percent: u8) -> Rgba {
    let opacity = f64::from(opacity_percent.min(100)) / 100.0;
    if let Some((r, g, b, a)) = parse_rgb_function(raw) {
        return Rgba::from_bytes(r, g, b, a.map_or(opacity, |a| a * opacity));
    }
    match parse_hex(raw) {
        Some((r, g, b)) => Rgba::from_bytes(r, g, b, opacity),
        None => Rgba::TRANSPARENT,
    }
}
