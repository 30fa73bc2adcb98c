//! Caption band layout and compositing.

use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use tracing::trace;

use crate::domain::entities::CaptionPlacement;
use crate::domain::ports::TextRenderer;

/// Horizontal room given to the widest line, as a multiple of its width.
pub const DEFAULT_WIDTH_FACTOR: f32 = 1.2;

/// Layout parameters independent of the font backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionStyle {
    /// Layer width relative to the widest line.
    pub width_factor: f32,
    /// Empty rows added above and below the text block.
    pub vertical_margin: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            width_factor: DEFAULT_WIDTH_FACTOR,
            vertical_margin: 0,
        }
    }
}

/// Renders captions into bands and attaches them to images.
#[derive(Clone)]
pub struct CaptionCompositor {
    renderer: Arc<dyn TextRenderer>,
    style: CaptionStyle,
}

impl std::fmt::Debug for CaptionCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionCompositor")
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl CaptionCompositor {
    /// Creates a compositor drawing with `renderer`.
    #[must_use]
    pub fn new(renderer: Arc<dyn TextRenderer>, style: CaptionStyle) -> Self {
        Self { renderer, style }
    }

    /// Splits a caption into trimmed lines.
    #[must_use]
    pub fn caption_lines(caption: &str) -> Vec<&str> {
        caption.split('\n').map(str::trim).collect()
    }

    /// Lays the caption out on a transparent layer at the reference size.
    ///
    /// Returns `None` when there is nothing visible to draw.
    #[must_use]
    pub fn render_layer(&self, caption: &str) -> Option<RgbaImage> {
        if caption.trim().is_empty() {
            return None;
        }

        let lines = Self::caption_lines(caption);
        let extents: Vec<_> = lines
            .iter()
            .map(|line| self.renderer.measure(line))
            .collect();

        let widest = extents.iter().map(|e| e.width).max().unwrap_or(0);
        let text_height: u32 = extents.iter().map(|e| e.height).sum();

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let layer_width = (self.style.width_factor * widest as f32) as u32;
        let layer_height = text_height + 2 * self.style.vertical_margin;

        if layer_width == 0 || layer_height == 0 {
            return None;
        }

        let mut layer = RgbaImage::new(layer_width, layer_height);
        let mut y = i64::from(self.style.vertical_margin);
        for (line, extent) in lines.iter().zip(&extents) {
            let x = (i64::from(layer_width) - i64::from(extent.width)) / 2;
            #[allow(clippy::cast_possible_truncation)]
            let (x, top) = (x as i32, y as i32);
            self.renderer.draw(&mut layer, x, top, line);
            y += i64::from(extent.height);
        }

        trace!(
            lines = lines.len(),
            width = layer_width,
            height = layer_height,
            "Rendered caption layer"
        );

        Some(layer)
    }

    /// Height of the band once a `layer` is scaled to `image_width`.
    #[must_use]
    pub fn band_height(layer_width: u32, layer_height: u32, image_width: u32) -> u32 {
        let scaled = f64::from(layer_height) / f64::from(layer_width) * f64::from(image_width);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = scaled.round() as u32;
        rounded.max(1)
    }

    /// Returns a new image with the caption band above or below `image`.
    ///
    /// Blank captions return the source unchanged.
    #[must_use]
    pub fn compose(
        &self,
        image: &DynamicImage,
        caption: &str,
        placement: CaptionPlacement,
    ) -> DynamicImage {
        let Some(layer) = self.render_layer(caption) else {
            return image.clone();
        };

        let (image_width, image_height) = (image.width(), image.height());
        if image_width == 0 {
            return image.clone();
        }

        let band_height = Self::band_height(layer.width(), layer.height(), image_width);
        let band = imageops::resize(&layer, image_width, band_height, FilterType::CatmullRom);

        let mut canvas = RgbaImage::new(image_width, image_height + band_height);
        let source = image.to_rgba8();
        match placement {
            CaptionPlacement::Top => {
                imageops::overlay(&mut canvas, &band, 0, 0);
                imageops::replace(&mut canvas, &source, 0, i64::from(band_height));
            }
            CaptionPlacement::Bottom => {
                imageops::replace(&mut canvas, &source, 0, 0);
                imageops::overlay(&mut canvas, &band, 0, i64::from(image_height));
            }
        }

        trace!(
            placement = %placement,
            band_height,
            width = image_width,
            height = canvas.height(),
            "Composited caption"
        );

        let composed = DynamicImage::ImageRgba8(canvas);
        if image.color().has_alpha() {
            composed
        } else {
            DynamicImage::ImageRgb8(composed.to_rgb8())
        }
    }
}
