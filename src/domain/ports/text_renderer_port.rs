//! Port definition for text layout and rasterization.

use image::RgbaImage;

/// Pixel size of a laid out line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    /// Advance width in pixels.
    pub width: u32,
    /// Line height in pixels.
    pub height: u32,
}

/// Text layout capability used by the caption compositor.
pub trait TextRenderer: Send + Sync {
    /// Measures a single line at the renderer's reference size.
    fn measure(&self, text: &str) -> TextExtent;

    /// Draws a single line with its top-left corner at `(x, y)`.
    fn draw(&self, layer: &mut RgbaImage, x: i32, y: i32, text: &str);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use image::Rgba;

    /// Renderer that draws every character as a solid white cell.
    pub struct BlockTextRenderer {
        cell_width: u32,
        cell_height: u32,
    }

    impl BlockTextRenderer {
        /// Creates a renderer with the given cell size.
        pub fn new(cell_width: u32, cell_height: u32) -> Self {
            Self {
                cell_width,
                cell_height,
            }
        }
    }

    impl TextRenderer for BlockTextRenderer {
        fn measure(&self, text: &str) -> TextExtent {
            let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
            TextExtent {
                width: chars * self.cell_width,
                height: self.cell_height,
            }
        }

        fn draw(&self, layer: &mut RgbaImage, x: i32, y: i32, text: &str) {
            let extent = self.measure(text);
            for dy in 0..extent.height {
                for dx in 0..extent.width {
                    let px = x + dx as i32;
                    let py = y + dy as i32;
                    if px >= 0
                        && py >= 0
                        && (px as u32) < layer.width()
                        && (py as u32) < layer.height()
                    {
                        layer.put_pixel(px as u32, py as u32, Rgba([255, 255, 255, 255]));
                    }
                }
            }
        }
    }
}
