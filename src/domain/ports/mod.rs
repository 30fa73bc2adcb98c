mod image_source_port;
mod reply_port;
mod text_renderer_port;

pub use image_source_port::ImageSourcePort;
pub use reply_port::ReplyPort;
pub use text_renderer_port::{TextExtent, TextRenderer};

#[cfg(test)]
pub mod mocks {
    pub use super::image_source_port::MockImageSourcePort;
    pub use super::reply_port::mock::RecordingReply;
    pub use super::text_renderer_port::mock::BlockTextRenderer;
}
