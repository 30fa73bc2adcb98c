//! Domain entity definitions.

mod image;
mod message;

pub use image::{
    CaptionPlacement, EncodedImage, FlipDirection, ImageId, OutputFile, OutputFormat,
};
pub use message::{Attachment, ChatMessage};
