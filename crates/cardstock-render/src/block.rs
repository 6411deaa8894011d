//! Block-level rendering: physical lines -> wrapped lines -> cursor walk.
//!
//! `render_block` is the single code path for both measuring and drawing; a
//! measurement pass is simply a call without a surface. The autoscale search
//! and the centered-box renderer are orchestration wrappers that vary the
//! font size or the origin, never the walk itself.

use cardstock_core::{Palette, Rgba, StyleState, Token, explode, parse};
use tracing::debug;

use crate::Result;
use crate::font::FontSet;
use crate::icons::IconSet;
use crate::surface::Surface;
use crate::wrap::wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Target rectangle for [`render_centered`], in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct BlockOptions {
    /// Pixel width budget for wrapping.
    pub max_width: f32,
    /// Extra vertical gap between wrapped lines.
    pub line_spacing: f32,
    /// Side length of the square icons are resized to.
    pub icon_size: f32,
    /// Trailing gap after an icon; an icon advances the cursor by
    /// `icon_size + icon_gap`. Title and body text use different icon sizes,
    /// so both stay configurable.
    pub icon_gap: f32,
    pub align: Align,
    /// Left indent reserved on bulleted lines for the bullet glyph.
    pub bullet_indent: f32,
    /// Floor for the autoscale search; it never reports failure, it degrades
    /// to this size and accepts overflow.
    pub min_font_size: f32,
    /// Fill for unstyled text, bullet glyphs, and unknown color names.
    pub default_color: Rgba,
}

impl BlockOptions {
    pub fn new(max_width: f32) -> Self {
        Self {
            max_width,
            line_spacing: 6.0,
            icon_size: 20.0,
            icon_gap: 4.0,
            align: Align::Left,
            bullet_indent: 22.0,
            min_font_size: 12.0,
            default_color: Rgba::new(40, 30, 20, 255),
        }
    }
}

impl Default for BlockOptions {
    fn default() -> Self {
        // Card body column: 750 px card, 50 px margins.
        Self::new(650.0)
    }
}

/// Lays out `text` and either measures it (no surface) or draws it.
///
/// Paragraphs split on blank lines, physical lines on single newlines; each
/// physical line is parsed, exploded, and wrapped independently, so an
/// explicit newline always starts a new line. A leading `"- "` marks a
/// bulleted line: the marker is consumed before parsing, a bullet glyph is
/// drawn at the unindented origin, and the body shifts by `bullet_indent`.
///
/// Returns the final cursor y, the layout's bottom edge. The return value is
/// identical with and without a surface; measurement passes advance the
/// cursor by exactly the widths a draw pass would.
pub fn render_block<F: FontSet>(
    text: &str,
    mut surface: Option<&mut Surface>,
    x: f32,
    y: f32,
    fonts: &F,
    palette: &Palette,
    icons: &IconSet,
    opts: &BlockOptions,
) -> f32 {
    let icon_advance = opts.icon_size + opts.icon_gap;
    let measure = |content: &str, style: &StyleState| fonts.text_width(content, style);
    let mut cursor_y = y;

    for paragraph in text.split("\n\n") {
        for physical in paragraph.split('\n') {
            let (is_bullet, body) = match physical.strip_prefix("- ") {
                Some(rest) => (true, rest),
                None => (false, physical),
            };
            let tokens = explode(&parse(body));
            for line in wrap(&tokens, opts.max_width, icon_advance, measure) {
                let mut cursor_x = x + match opts.align {
                    Align::Center => (opts.max_width - line.width) / 2.0,
                    Align::Left if is_bullet => opts.bullet_indent,
                    Align::Left => 0.0,
                };

                if is_bullet && opts.align == Align::Left {
                    if let Some(s) = surface.as_deref_mut() {
                        fonts.draw_text(
                            s,
                            x,
                            cursor_y,
                            "\u{2022}",
                            &StyleState::plain(),
                            opts.default_color,
                            None,
                        );
                    }
                }

                for token in &line.tokens {
                    match token {
                        Token::Icon { name } => {
                            if let Some(s) = surface.as_deref_mut() {
                                if let Some(image) = icons.load(name, opts.icon_size.round() as u32)
                                {
                                    s.draw_image(
                                        cursor_x.round() as i32,
                                        cursor_y.round() as i32,
                                        &image,
                                    );
                                }
                            }
                            // Missing icons still advance the cursor so the
                            // measured and drawn layouts agree.
                            cursor_x += icon_advance;
                        }
                        Token::Text { content, style } => {
                            let width = fonts.text_width(content, style);
                            if let Some(s) = surface.as_deref_mut() {
                                let (fill, outline) = match style.color.as_deref() {
                                    Some(name) => (
                                        palette.resolve(Some(name), opts.default_color),
                                        Some((
                                            Rgba::BLACK,
                                            (fonts.size() / 18.0).floor().max(1.0),
                                        )),
                                    ),
                                    None => (opts.default_color, None),
                                };
                                fonts.draw_text(s, cursor_x, cursor_y, content, style, fill, outline);
                            }
                            cursor_x += width;
                        }
                    }
                }
                cursor_y += fonts.size() + opts.line_spacing;
            }
        }
        cursor_y += fonts.size();
    }
    cursor_y
}

/// Shrinks the font until the block fits `max_height`, then draws once.
///
/// A linear top-down search rather than a binary one: wrapping reflow means
/// height is not strictly monotonic in font size, and linear scan guarantees
/// the first accepted size is used without skipping a valid fit. The search
/// stops unconditionally at `opts.min_font_size`, accepting overflow. All
/// trial passes are measure-only; exactly one real draw happens.
///
/// Returns the final cursor y of the real pass.
pub fn render_autoscaled<F: FontSet>(
    text: &str,
    surface: &mut Surface,
    x: f32,
    y: f32,
    fonts: &F,
    palette: &Palette,
    icons: &IconSet,
    max_height: f32,
    opts: &BlockOptions,
) -> f32 {
    let mut size = fonts.size();
    loop {
        let trial = fonts.with_size(size);
        let end = render_block(text, None, x, y, &trial, palette, icons, opts);
        let fits = end - y <= max_height;
        if fits {
            debug!(size, height = end - y, "autoscale accepted size");
        } else if size - 1.0 < opts.min_font_size {
            debug!(size, "autoscale reached the minimum size, accepting overflow");
        } else {
            size -= 1.0;
            continue;
        }
        return render_block(text, Some(surface), x, y, &trial, palette, icons, opts);
    }
}

/// Renders `text` centered inside `layout_box` on `surface`.
///
/// Centering needs the actual drawn pixel extents (glyph ink, not cursor
/// geometry), so this draws once into a transparent scratch surface sized to
/// the box, takes the tight alpha bounding box, and draws again at the
/// centered origin. Empty content is a no-op.
pub fn render_centered<F: FontSet>(
    text: &str,
    surface: &mut Surface,
    layout_box: &LayoutBox,
    fonts: &F,
    palette: &Palette,
    icons: &IconSet,
    opts: &BlockOptions,
) -> Result<()> {
    let mut scratch = Surface::new(
        layout_box.width.round() as u32,
        layout_box.height.round() as u32,
    )?;
    render_block(text, Some(&mut scratch), 0.0, 0.0, fonts, palette, icons, opts);

    let Some((_, _, content_w, content_h)) = scratch.content_bounds() else {
        return Ok(());
    };

    let start_x = layout_box.x + ((layout_box.width - content_w as f32) / 2.0).floor();
    let start_y = layout_box.y + ((layout_box.height - content_h as f32) / 2.0).floor();
    render_block(text, Some(surface), start_x, start_y, fonts, palette, icons, opts);
    Ok(())
}
