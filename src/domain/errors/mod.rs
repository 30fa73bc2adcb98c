//! Domain error types.

mod image_edit_error;

pub use image_edit_error::ImageEditError;

/// Result alias for image editing operations.
pub type EditResult<T> = std::result::Result<T, ImageEditError>;
