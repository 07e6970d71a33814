//! Theme catalog: named presets of background image and accent colors.
//!
//! Consumed by the default-seed logic (background image) and by hosts that
//! render the fixed-template pages. Unknown identifiers resolve to
//! [`Theme::Classic`].

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Deserializer, Serialize};

/// One of the five built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Modern,
    Elegant,
    Professional,
    Formal,
}

/// Color palette for a theme. All values are `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub title: &'static str,
    pub section_title: &'static str,
    pub border: &'static str,
}

impl Theme {
    /// Every theme, in display order.
    pub const ALL: [Theme; 5] = [Self::Classic, Self::Modern, Self::Elegant, Self::Professional, Self::Formal];

    /// Resolve a theme identifier; unknown ids fall back to `Classic`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "modern" => Self::Modern,
            "elegant" => Self::Elegant,
            "professional" => Self::Professional,
            "formal" => Self::Formal,
            _ => Self::Classic,
        }
    }

    /// Stable identifier used in storage.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Elegant => "elegant",
            Self::Professional => "professional",
            Self::Formal => "formal",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Modern => "Modern",
            Self::Elegant => "Elegant",
            Self::Professional => "Professional",
            Self::Formal => "Formal",
        }
    }

    /// Site-relative path of the theme's default background image.
    #[must_use]
    pub fn background_image(self) -> &'static str {
        match self {
            Self::Classic => "/background1.jpg",
            Self::Modern => "/background2.jpg",
            Self::Elegant => "/background3.jpg",
            Self::Professional => "/background4.jpg",
            Self::Formal => "/background5.jpg",
        }
    }

    #[must_use]
    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Classic => ThemePalette {
                background: "#ffffff",
                primary: "#000000",
                secondary: "#333333",
                accent: "#1a365d",
                title: "#2c5282",
                section_title: "#2a4365",
                border: "#000000",
            },
            Self::Modern => ThemePalette {
                background: "#f0f7ff",
                primary: "#000000",
                secondary: "#333333",
                accent: "#1a56db",
                title: "#1e40af",
                section_title: "#3b82f6",
                border: "#3b82f6",
            },
            Self::Elegant => ThemePalette {
                background: "#f8f9fa",
                primary: "#000000",
                secondary: "#333333",
                accent: "#4b5563",
                title: "#374151",
                section_title: "#4b5563",
                border: "#9ca3af",
            },
            Self::Professional => ThemePalette {
                background: "#eef2ff",
                primary: "#000000",
                secondary: "#333333",
                accent: "#4f46e5",
                title: "#4338ca",
                section_title: "#4f46e5",
                border: "#818cf8",
            },
            Self::Formal => ThemePalette {
                background: "#fffbeb",
                primary: "#000000",
                secondary: "#333333",
                accent: "#92400e",
                title: "#78350f",
                section_title: "#92400e",
                border: "#d97706",
            },
        }
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
