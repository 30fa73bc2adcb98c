//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Font downloads and caching.
pub mod fonts;
/// Remote image access.
pub mod http;
/// Local reply delivery.
pub mod outbox;
/// Text rendering.
pub mod render;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use fonts::{FontAsset, FontStore};
pub use http::HttpImageSource;
pub use outbox::DirectoryReply;
pub use render::GlyphTextRenderer;
