//! Raster drawing surface over a tiny-skia pixmap.
//!
//! The pixmap stores premultiplied RGBA8. All text/icon compositing goes
//! through [`Surface::blend_pixel`], so measurement code paths that never
//! call it provably leave the surface untouched.

use cardstock_core::Rgba;
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::{Error, Result};

pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// A fully transparent surface. Zero-area dimensions are the caller's
    /// geometry bug and surface as [`Error::PixmapAlloc`].
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(Error::PixmapAlloc { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fills the whole surface with a flat color (card background).
    pub fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    /// Source-over blend of one pixel at `coverage` (0..=1) opacity.
    /// Out-of-bounds coordinates are clipped.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.pixmap.width() as i32 || y >= self.pixmap.height() as i32 {
            return;
        }
        let alpha = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let idx = (y as usize * self.pixmap.width() as usize + x as usize) * 4;
        let data = self.pixmap.data_mut();
        let inv = 1.0 - alpha;
        // Premultiplied source-over.
        let src = [
            color.r as f32 / 255.0 * alpha,
            color.g as f32 / 255.0 * alpha,
            color.b as f32 / 255.0 * alpha,
            alpha,
        ];
        for (offset, s) in src.into_iter().enumerate() {
            let d = data[idx + offset] as f32 / 255.0;
            data[idx + offset] = ((s + d * inv) * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Alpha-composites a straight-alpha RGBA image with its top-left corner
    /// at `(x, y)`.
    pub fn draw_image(&mut self, x: i32, y: i32, image: &RgbaImage) {
        for (px, py, pixel) in image.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                continue;
            }
            self.blend_pixel(x + px as i32, y + py as i32, Rgba::new(r, g, b, 255), a as f32 / 255.0);
        }
    }

    /// Tight bounding box `(x, y, width, height)` of pixels with nonzero
    /// alpha, or `None` if nothing has been drawn.
    pub fn content_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let data = self.pixmap.data();
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut any = false;
        for y in 0..height {
            for x in 0..width {
                let alpha = data[((y * width + x) * 4 + 3) as usize];
                if alpha == 0 {
                    continue;
                }
                any = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        any.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(|_| Error::PngEncode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_area_surface_is_an_allocation_error() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(Error::PixmapAlloc { width: 0, height: 10 })
        ));
    }

    #[test]
    fn fresh_surface_has_no_content() {
        let surface = Surface::new(8, 8).unwrap();
        assert_eq!(surface.content_bounds(), None);
    }

    #[test]
    fn blend_clips_out_of_bounds() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.blend_pixel(-1, 0, Rgba::BLACK, 1.0);
        surface.blend_pixel(0, 7, Rgba::BLACK, 1.0);
        assert_eq!(surface.content_bounds(), None);
    }

    #[test]
    fn content_bounds_is_tight() {
        let mut surface = Surface::new(16, 16).unwrap();
        surface.blend_pixel(3, 4, Rgba::BLACK, 1.0);
        surface.blend_pixel(10, 8, Rgba::BLACK, 0.5);
        assert_eq!(surface.content_bounds(), Some((3, 4, 8, 5)));
    }

    #[test]
    fn opaque_blend_overwrites() {
        let mut surface = Surface::new(2, 2).unwrap();
        surface.blend_pixel(0, 0, Rgba::new(10, 20, 30, 255), 1.0);
        let px = surface.pixmap().pixel(0, 0).unwrap();
        assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (10, 20, 30, 255));
    }

    #[test]
    fn draw_image_composites_at_offset() {
        let mut surface = Surface::new(10, 10).unwrap();
        let icon = RgbaImage::from_pixel(3, 3, image::Rgba([255, 0, 0, 255]));
        surface.draw_image(5, 6, &icon);
        assert_eq!(surface.content_bounds(), Some((5, 6, 3, 3)));
    }

    #[test]
    fn encode_png_produces_data() {
        let surface = Surface::new(4, 4).unwrap();
        let png = surface.encode_png().unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
