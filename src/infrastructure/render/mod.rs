//! Text rendering backends.

pub mod glyph_renderer;

pub use glyph_renderer::GlyphTextRenderer;
