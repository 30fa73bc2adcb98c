pub mod caption;
pub mod image_transform;
pub mod url_extractor;

pub use caption::{CaptionCompositor, CaptionStyle};
pub use url_extractor::{ImageReferenceExtractor, UrlExtractor};
