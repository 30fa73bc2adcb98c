use serde::{Deserialize, Serialize};

/// File attached to a chat message.
///
/// Platform metadata (id, filename, advertised content type) is ignored on
/// deserialization: extraction only ever probes the URL itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    url: String,
}

impl Attachment {
    /// Creates an attachment pointing at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Returns the download URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The message that triggered a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    content: String,
    #[serde(default)]
    attachments: Vec<Attachment>,
}

impl ChatMessage {
    /// Creates a message with text content and no attachments.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attachments: Vec::new(),
        }
    }

    /// Adds an attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Returns the raw text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the attachments in upload order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns attachment URLs in upload order.
    #[must_use]
    pub fn attachment_urls(&self) -> Vec<&str> {
        self.attachments.iter().map(Attachment::url).collect()
    }
}
