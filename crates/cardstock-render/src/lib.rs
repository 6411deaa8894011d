#![forbid(unsafe_code)]

//! Styled-markup text layout + raster renderer.
//!
//! The pipeline is `parse -> explode -> wrap -> render`, with two
//! orchestration wrappers on top: an autoscale search (shrink the font until
//! the block fits a height budget) and a centered-box renderer (center the
//! drawn pixel extents inside a rectangle). Measurement passes never touch a
//! caller-visible surface.

pub mod block;
pub mod font;
pub mod icons;
pub mod surface;
pub mod wrap;

pub use block::{
    Align, BlockOptions, LayoutBox, render_autoscaled, render_block, render_centered,
};
pub use font::{FixedAdvanceFontSet, FontSet, TtfFontSet};
pub use icons::IconSet;
pub use surface::Surface;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to parse font data")]
    FontParse,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, Error>;
