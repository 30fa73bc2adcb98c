//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CaptionPlacement, ChatMessage, FlipDirection, OutputFile};
pub use errors::{EditResult, ImageEditError};
pub use ports::{ImageSourcePort, ReplyPort, TextRenderer};
