//! Outline font text rendering backed by `ab_glyph` and `imageproc`.

use std::path::Path;

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

use crate::domain::errors::{EditResult, ImageEditError};
use crate::domain::ports::{TextExtent, TextRenderer};

/// Reference size captions are laid out at before scaling.
pub const DEFAULT_FONT_SIZE: f32 = 109.0;

/// Outline thickness around each glyph.
pub const DEFAULT_STROKE_WIDTH: u32 = 5;

const FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Extent of a line relative to the point `draw_text_mut` is given.
///
/// `left`/`top` are zero or negative when glyphs reach before the pen origin
/// or above the ascender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineBounds {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

/// White text with a black outline.
pub struct GlyphTextRenderer {
    font: FontVec,
    scale: PxScale,
    stroke_width: u32,
}

impl std::fmt::Debug for GlyphTextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphTextRenderer")
            .field("scale", &self.scale)
            .field("stroke_width", &self.stroke_width)
            .finish_non_exhaustive()
    }
}

impl GlyphTextRenderer {
    /// Parses a TrueType/OpenType font.
    ///
    /// # Errors
    /// Returns `Render` if the bytes are not a usable font.
    pub fn from_bytes(data: Vec<u8>, font_size: f32, stroke_width: u32) -> EditResult<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|e| ImageEditError::render(format!("invalid font: {e}")))?;

        Ok(Self {
            font,
            scale: PxScale::from(font_size),
            stroke_width,
        })
    }

    /// Reads and parses a font file.
    ///
    /// # Errors
    /// Returns `Render` if the file cannot be read or parsed.
    pub async fn from_file(path: &Path, font_size: f32, stroke_width: u32) -> EditResult<Self> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            ImageEditError::render(format!("failed to read font {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), size = data.len(), "Loaded font");

        Self::from_bytes(data, font_size, stroke_width)
    }

    /// Offsets of the outline stamp, a filled disc of `stroke_width` radius.
    fn stroke_offsets(&self) -> impl Iterator<Item = (i32, i32)> {
        let r = self.stroke_radius();
        (-r..=r)
            .flat_map(move |dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(move |(dx, dy)| dx * dx + dy * dy <= r * r)
    }

    fn stroke_radius(&self) -> i32 {
        i32::try_from(self.stroke_width).unwrap_or(i32::MAX / 4)
    }

    /// Union of the line box (pen advance by ascent minus descent) and the
    /// ink of every glyph, laid out the way `draw_text_mut` places them.
    #[allow(clippy::cast_possible_truncation)]
    fn line_bounds(&self, text: &str) -> LineBounds {
        let font = self.font.as_scaled(self.scale);
        let mut bounds = LineBounds {
            left: 0,
            top: 0,
            right: 0,
            bottom: (font.ascent() - font.descent()).ceil() as i32,
        };

        let mut pen = 0f32;
        let mut last: Option<GlyphId> = None;
        for c in text.chars() {
            let id = font.glyph_id(c);
            let glyph = id.with_scale_and_position(self.scale, point(pen, font.ascent()));
            pen += font.h_advance(id);
            if let Some(outlined) = font.outline_glyph(glyph) {
                if let Some(last) = last {
                    pen += font.kern(id, last);
                }
                last = Some(id);
                let bb = outlined.px_bounds();
                bounds.left = bounds.left.min(bb.min.x.round() as i32);
                bounds.top = bounds.top.min(bb.min.y.round() as i32);
                bounds.right = bounds.right.max(bb.max.x.round() as i32);
                bounds.bottom = bounds.bottom.max(bb.max.y.round() as i32);
            }
        }
        bounds.right = bounds.right.max(pen.ceil() as i32);

        bounds
    }
}

impl TextRenderer for GlyphTextRenderer {
    fn measure(&self, text: &str) -> TextExtent {
        let bounds = self.line_bounds(text);
        let pad = 2 * self.stroke_radius();
        TextExtent {
            width: u32::try_from(bounds.right - bounds.left + pad).unwrap_or(0),
            height: u32::try_from(bounds.bottom - bounds.top + pad).unwrap_or(0),
        }
    }

    fn draw(&self, layer: &mut RgbaImage, x: i32, y: i32, text: &str) {
        if text.is_empty() {
            return;
        }
        let bounds = self.line_bounds(text);
        let r = self.stroke_radius();
        let (x, y) = (x + r - bounds.left, y + r - bounds.top);

        if r > 0 {
            for (dx, dy) in self.stroke_offsets() {
                draw_text_mut(layer, OUTLINE, x + dx, y + dy, self.scale, &self.font, text);
            }
        }
        draw_text_mut(layer, FILL, x, y, self.scale, &self.font, text);
    }
}
