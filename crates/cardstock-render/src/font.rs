//! Font handles: style-resolved measurement and glyph drawing.
//!
//! The renderer only ever talks to the [`FontSet`] trait, so layout tests run
//! against the deterministic [`FixedAdvanceFontSet`] without any font files
//! on disk. [`TtfFontSet`] is the real backend (ab_glyph outlines blended
//! onto the surface).

use ab_glyph::{Font as _, FontArc, PxScale, ScaleFont, point};
use cardstock_core::{Rgba, StyleState};

use crate::surface::Surface;
use crate::{Error, Result};

/// A sized set of font variants (normal/bold/italic, optional bold-italic).
///
/// `with_size` must be pure: the autoscale search rebuilds the set once per
/// trial size and relies on measurement at size `s` matching a later draw at
/// size `s` exactly.
pub trait FontSet {
    /// Pixel size of the normal variant (one text line advances by
    /// `size() + line_spacing`).
    fn size(&self) -> f32;

    /// Advance width of `content` in the variant selected by `style`.
    fn text_width(&self, content: &str, style: &StyleState) -> f32;

    /// Draws `content` top-anchored at `(x, y)` in the variant selected by
    /// `style`, optionally with an outline stroked behind the fill.
    fn draw_text(
        &self,
        surface: &mut Surface,
        x: f32,
        y: f32,
        content: &str,
        style: &StyleState,
        fill: Rgba,
        outline: Option<(Rgba, f32)>,
    );

    /// The same variants rebuilt at another size.
    fn with_size(&self, size: f32) -> Self
    where
        Self: Sized;
}

/// TrueType/OpenType-backed font set.
#[derive(Clone)]
pub struct TtfFontSet {
    normal: FontArc,
    bold: FontArc,
    italic: FontArc,
    bold_italic: Option<FontArc>,
    size: f32,
}

impl TtfFontSet {
    pub fn new(
        normal: FontArc,
        bold: FontArc,
        italic: FontArc,
        bold_italic: Option<FontArc>,
        size: f32,
    ) -> Self {
        Self {
            normal,
            bold,
            italic,
            bold_italic,
            size,
        }
    }

    /// All variants backed by one face. Styling still selects this face, so
    /// layout stays consistent when a deck ships a single font.
    pub fn single(font: FontArc, size: f32) -> Self {
        Self::new(font.clone(), font.clone(), font, None, size)
    }

    pub fn from_bytes(
        normal: &[u8],
        bold: &[u8],
        italic: &[u8],
        bold_italic: Option<&[u8]>,
        size: f32,
    ) -> Result<Self> {
        let load =
            |data: &[u8]| FontArc::try_from_vec(data.to_vec()).map_err(|_| Error::FontParse);
        Ok(Self::new(
            load(normal)?,
            load(bold)?,
            load(italic)?,
            match bold_italic {
                Some(data) => Some(load(data)?),
                None => None,
            },
            size,
        ))
    }

    fn variant(&self, style: &StyleState) -> &FontArc {
        match (style.bold, style.italic) {
            (true, true) => self.bold_italic.as_ref().unwrap_or(&self.bold),
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (false, false) => &self.normal,
        }
    }

    fn draw_run(&self, surface: &mut Surface, x: f32, y: f32, content: &str, font: &FontArc, color: Rgba) {
        let scaled = font.as_scaled(PxScale::from(self.size));
        let baseline = y + scaled.ascent();
        let mut cursor_x = x;
        let mut previous = None;
        for ch in content.chars() {
            if ch.is_control() {
                continue;
            }
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                cursor_x += scaled.kern(prev, id);
            }
            let advance = scaled.h_advance(id);
            let mut glyph = scaled.scaled_glyph(ch);
            glyph.position = point(cursor_x, baseline);
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    surface.blend_pixel(
                        (bounds.min.x + gx as f32) as i32,
                        (bounds.min.y + gy as f32) as i32,
                        color,
                        coverage,
                    );
                });
            }
            cursor_x += advance;
            previous = Some(id);
        }
    }
}

impl FontSet for TtfFontSet {
    fn size(&self) -> f32 {
        self.size
    }

    fn text_width(&self, content: &str, style: &StyleState) -> f32 {
        let scaled = self.variant(style).as_scaled(PxScale::from(self.size));
        let mut width = 0.0f32;
        let mut previous = None;
        for ch in content.chars() {
            if ch.is_control() {
                continue;
            }
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width.max(0.0)
    }

    fn draw_text(
        &self,
        surface: &mut Surface,
        x: f32,
        y: f32,
        content: &str,
        style: &StyleState,
        fill: Rgba,
        outline: Option<(Rgba, f32)>,
    ) {
        let font = self.variant(style).clone();
        if let Some((color, width)) = outline {
            // Stroke pass: the run repeated over the offset square, fill on top.
            let w = width.round().max(1.0) as i32;
            for dy in -w..=w {
                for dx in -w..=w {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    self.draw_run(surface, x + dx as f32, y + dy as f32, content, &font, color);
                }
            }
        }
        self.draw_run(surface, x, y, content, &font, fill);
    }

    fn with_size(&self, size: f32) -> Self {
        Self { size, ..self.clone() }
    }
}

/// Deterministic font double for layout tests.
///
/// Every character advances `size * char_width_em` pixels regardless of
/// variant; drawing inks an opaque `width x size` cell per non-whitespace
/// run. No font files involved.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceFontSet {
    pub size: f32,
    pub char_width_em: f32,
}

impl FixedAdvanceFontSet {
    pub fn new(size: f32, char_width_em: f32) -> Self {
        Self {
            size,
            char_width_em,
        }
    }
}

impl Default for FixedAdvanceFontSet {
    fn default() -> Self {
        Self::new(16.0, 0.6)
    }
}

impl FontSet for FixedAdvanceFontSet {
    fn size(&self) -> f32 {
        self.size
    }

    fn text_width(&self, content: &str, _style: &StyleState) -> f32 {
        content.chars().count() as f32 * self.size * self.char_width_em
    }

    fn draw_text(
        &self,
        surface: &mut Surface,
        x: f32,
        y: f32,
        content: &str,
        style: &StyleState,
        fill: Rgba,
        _outline: Option<(Rgba, f32)>,
    ) {
        // Whitespace has advance but no ink, like a real face.
        if content.chars().all(char::is_whitespace) {
            return;
        }
        let width = self.text_width(content, style);
        for py in y as i32..(y + self.size) as i32 {
            for px in x as i32..(x + width) as i32 {
                surface.blend_pixel(px, py, fill, 1.0);
            }
        }
    }

    fn with_size(&self, size: f32) -> Self {
        Self { size, ..*self }
    }
}
