//! Port definition for replying in the chat the command came from.

use async_trait::async_trait;

use crate::domain::entities::OutputFile;
use crate::domain::errors::EditResult;

/// Port implemented by the host framework to deliver command output.
#[async_trait]
pub trait ReplyPort: Send + Sync {
    /// Sends a plain text message.
    async fn send_text(&self, text: &str) -> EditResult<()>;

    /// Sends a message with one file attached.
    async fn send_file(&self, file: OutputFile) -> EditResult<()>;

    /// Shows a "working" indicator. Advisory only.
    async fn trigger_typing(&self) -> EditResult<()> {
        Ok(())
    }
}
