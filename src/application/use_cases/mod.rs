//! Use case implementations.

mod edit_image_use_case;

pub use edit_image_use_case::{EditImageUseCase, EditOptions, NO_IMAGES_REPLY};
