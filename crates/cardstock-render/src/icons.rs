//! Icon lookup table (name -> image resource).
//!
//! Icons load at real-draw time; a missing name or unreadable file skips the
//! glyph but never fails the render (the cursor still advances by the icon's
//! reserved width, so measure and draw stay in lockstep).

use std::path::PathBuf;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use rustc_hash::FxHashMap;
use tracing::warn;

#[derive(Debug, Clone)]
enum IconSource {
    Path(PathBuf),
    Image(RgbaImage),
}

/// Read-only table of named icons.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    icons: FxHashMap<String, IconSource>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an icon loaded lazily from disk on each real draw.
    pub fn insert_path(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.icons.insert(name.into(), IconSource::Path(path.into()));
    }

    /// Registers a preloaded icon (tests, embedded assets).
    pub fn insert_image(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.icons.insert(name.into(), IconSource::Image(image));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    /// Resolves an icon as a `size`x`size` square image, or `None` if the
    /// name is unknown or the backing file cannot be decoded.
    pub fn load(&self, name: &str, size: u32) -> Option<RgbaImage> {
        let source = match self.icons.get(name) {
            Some(source) => source,
            None => {
                warn!(icon = name, "unknown icon name, skipping glyph");
                return None;
            }
        };
        let image = match source {
            IconSource::Image(image) => image.clone(),
            IconSource::Path(path) => match image::open(path) {
                Ok(image) => image.to_rgba8(),
                Err(error) => {
                    warn!(icon = name, path = %path.display(), %error, "failed to load icon");
                    return None;
                }
            },
        };
        if size == 0 {
            return None;
        }
        if image.width() == size && image.height() == size {
            return Some(image);
        }
        Some(imageops::resize(&image, size, size, FilterType::Triangle))
    }
}
