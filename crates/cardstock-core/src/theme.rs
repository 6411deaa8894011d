//! Color palette configuration.
//!
//! The palette is read-only for the lifetime of a render; it is passed into
//! the renderer explicitly (no process-wide globals) so tests can substitute
//! fixtures.

use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Color-name lookup table with a required `"default"` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: FxHashMap<String, Rgba>,
}

impl Palette {
    /// The color set the original card decks were authored against, plus the
    /// standard body-text default.
    pub fn builtin() -> Self {
        let mut colors = FxHashMap::default();
        colors.insert("red".to_string(), Rgba::new(150, 30, 30, 255));
        colors.insert("blue".to_string(), Rgba::new(40, 60, 160, 255));
        colors.insert("green".to_string(), Rgba::new(40, 120, 60, 255));
        colors.insert("gold".to_string(), Rgba::new(160, 120, 40, 255));
        colors.insert("default".to_string(), Rgba::new(40, 30, 20, 255));
        Self { colors }
    }

    /// Loads a palette from JSON of the shape `{"red": [150, 30, 30, 255]}`.
    ///
    /// A `"default"` entry is required; this is the one load-time validation
    /// the render pipeline relies on (unknown names at draw time fall back to
    /// it silently).
    pub fn from_json(json: &str) -> Result<Self> {
        let palette: Self = serde_json::from_str(json)?;
        if !palette.colors.contains_key("default") {
            return Err(Error::MissingDefaultColor);
        }
        Ok(palette)
    }

    pub fn get(&self, name: &str) -> Option<Rgba> {
        self.colors.get(name).copied()
    }

    pub fn default_color(&self) -> Rgba {
        // `builtin()` and `from_json()` both guarantee the entry exists.
        self.get("default").unwrap_or(Rgba::BLACK)
    }

    /// Resolves an optional color name, falling back to `fallback` for
    /// unknown or absent names.
    pub fn resolve(&self, name: Option<&str>, fallback: Rgba) -> Rgba {
        name.and_then(|n| self.get(n)).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_original_colors_and_default() {
        let palette = Palette::builtin();
        assert_eq!(palette.get("red"), Some(Rgba::new(150, 30, 30, 255)));
        assert_eq!(palette.get("blue"), Some(Rgba::new(40, 60, 160, 255)));
        assert_eq!(palette.get("green"), Some(Rgba::new(40, 120, 60, 255)));
        assert_eq!(palette.get("gold"), Some(Rgba::new(160, 120, 40, 255)));
        assert_eq!(palette.default_color(), Rgba::new(40, 30, 20, 255));
    }

    #[test]
    fn unknown_name_resolves_to_fallback() {
        let palette = Palette::builtin();
        let fallback = Rgba::new(1, 2, 3, 255);
        assert_eq!(palette.resolve(Some("chartreuse"), fallback), fallback);
        assert_eq!(palette.resolve(None, fallback), fallback);
        assert_eq!(
            palette.resolve(Some("red"), fallback),
            Rgba::new(150, 30, 30, 255)
        );
    }

    #[test]
    fn json_palette_requires_default() {
        let err = Palette::from_json(r#"{"red": [150, 30, 30, 255]}"#).unwrap_err();
        assert!(matches!(err, Error::MissingDefaultColor));

        let palette =
            Palette::from_json(r#"{"default": [0, 0, 0, 255], "mint": [120, 200, 160, 255]}"#)
                .unwrap();
        assert_eq!(palette.get("mint"), Some(Rgba::new(120, 200, 160, 255)));
    }
}
