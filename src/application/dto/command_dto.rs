//! Command and reply data transfer objects.

use crate::domain::entities::{CaptionPlacement, FlipDirection, OutputFile};
use crate::domain::errors::ImageEditError;

/// A resolved image command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCommand {
    /// List detected image URLs.
    Echo,
    /// Mirror every detected image.
    Flip(FlipDirection),
    /// Lossy re-encode every detected image.
    DeepFry,
    /// Attach a caption band to every detected image.
    Caption {
        /// Caption text, possibly multi-line.
        text: String,
        /// Band position.
        placement: CaptionPlacement,
    },
}

impl ImageCommand {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Echo => "echo",
            Self::Flip(FlipDirection::Vertical) => "vflip",
            Self::Flip(FlipDirection::Horizontal) => "hflip",
            Self::Flip(FlipDirection::Both) => "rotate",
            Self::DeepFry => "deepfry",
            Self::Caption {
                placement: CaptionPlacement::Top,
                ..
            } => "caption-top",
            Self::Caption {
                placement: CaptionPlacement::Bottom,
                ..
            } => "caption-bottom",
        }
    }
}

/// A URL that could not be processed.
#[derive(Debug)]
pub struct UrlFailure {
    /// The image URL.
    pub url: String,
    /// Why it failed.
    pub error: ImageEditError,
}

/// Result of running a command against one message.
#[derive(Debug)]
pub enum CommandOutcome {
    /// A text-only reply.
    Text(String),
    /// One file per processed image plus per-URL failures.
    Images {
        /// Successfully processed images, in URL order.
        files: Vec<OutputFile>,
        /// URLs that failed, in URL order.
        failures: Vec<UrlFailure>,
    },
}

impl CommandOutcome {
    /// Formats the failure notification, if any URL failed.
    #[must_use]
    pub fn failure_report(&self) -> Option<String> {
        let Self::Images { failures, .. } = self else {
            return None;
        };
        if failures.is_empty() {
            return None;
        }

        let lines: Vec<String> = failures
            .iter()
            .map(|f| format!("{}: {}", f.url, f.error))
            .collect();
        Some(format!(
            "Failed to process {} image(s):\n{}",
            failures.len(),
            lines.join("\n")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_report_lists_each_url() {
        let outcome = CommandOutcome::Images {
            files: Vec::new(),
            failures: vec![
                UrlFailure {
                    url: "https://a.io/1.png".to_string(),
                    error: ImageEditError::fetch("https://a.io/1.png", "HTTP 404"),
                },
                UrlFailure {
                    url: "https://a.io/2.png".to_string(),
                    error: ImageEditError::decode("unsupported format"),
                },
            ],
        };

        let report = outcome.failure_report().unwrap();
        assert!(report.starts_with("Failed to process 2 image(s):"));
        assert!(report.contains("https://a.io/1.png: failed to fetch"));
        assert!(report.contains("https://a.io/2.png: failed to decode image"));
    }

    #[test]
    fn test_no_report_without_failures() {
        assert!(CommandOutcome::Text("hi".into()).failure_report().is_none());
        let outcome = CommandOutcome::Images {
            files: Vec::new(),
            failures: Vec::new(),
        };
        assert!(outcome.failure_report().is_none());
    }

    #[test]
    fn test_names() {
        assert_eq!(ImageCommand::Flip(FlipDirection::Both).name(), "rotate");
        let caption = ImageCommand::Caption {
            text: "x".into(),
            placement: CaptionPlacement::Bottom,
        };
        assert_eq!(caption.name(), "caption-bottom");
    }
}
