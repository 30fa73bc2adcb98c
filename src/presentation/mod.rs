//! Presentation layer: the command surface exposed to a chat host.

/// Verb registry.
pub mod commands;
/// Plugin entry point.
pub mod plugin;

pub use commands::CommandRegistry;
pub use plugin::ImageEditPlugin;
