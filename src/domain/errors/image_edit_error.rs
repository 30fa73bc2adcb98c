//! Image editing error types.

use thiserror::Error;

/// Image editing error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ImageEditError {
    #[error("remote refused metadata probe for {url}")]
    ProbeRefused { url: String },

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("failed to decode image: {message}")]
    Decode { message: String },

    #[error("failed to encode image: {message}")]
    Encode { message: String },

    #[error("failed to render caption: {message}")]
    Render { message: String },

    #[error("image task failed: {message}")]
    Task { message: String },

    #[error("http client error: {message}")]
    HttpClient { message: String },

    #[error("unknown command: {verb}")]
    UnknownCommand { verb: String },

    #[error("failed to deliver reply: {message}")]
    Delivery { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImageEditError {
    /// Creates probe refused error.
    #[must_use]
    pub fn probe_refused(url: impl Into<String>) -> Self {
        Self::ProbeRefused { url: url.into() }
    }

    /// Creates fetch error.
    #[must_use]
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates encode error.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Creates render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Creates delivery error.
    #[must_use]
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    /// Creates image task error.
    #[must_use]
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }

    /// Returns whether the error is a defined exclusion rather than a failure.
    #[must_use]
    pub const fn is_exclusion(&self) -> bool {
        matches!(self, Self::ProbeRefused { .. })
    }
}
