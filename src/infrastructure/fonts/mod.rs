//! Font assets for caption rendering.

pub mod font_store;

pub use font_store::{FontAsset, FontStore};
