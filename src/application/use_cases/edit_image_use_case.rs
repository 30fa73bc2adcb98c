//! Image command use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{CommandOutcome, ImageCommand, UrlFailure};
use crate::application::services::image_transform::{
    self, DEFAULT_DEEP_FRY_QUALITY, DEFAULT_JPEG_QUALITY,
};
use crate::application::services::{CaptionCompositor, ImageReferenceExtractor};
use crate::domain::entities::{
    CaptionPlacement, ChatMessage, EncodedImage, FlipDirection, OutputFile,
};
use crate::domain::errors::{EditResult, ImageEditError};
use crate::domain::ports::ImageSourcePort;

/// Reply sent when an image command finds nothing to work on.
pub const NO_IMAGES_REPLY: &str = "No images found in your message.";

/// Encoder settings for edited images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOptions {
    /// Quality of delivered JPEGs.
    pub jpeg_quality: u8,
    /// Quality of the deep fry pass.
    pub deep_fry_quality: u8,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            deep_fry_quality: DEFAULT_DEEP_FRY_QUALITY,
        }
    }
}

/// The pixel work behind an image command.
#[derive(Debug, Clone)]
enum Edit {
    Flip(FlipDirection),
    DeepFry,
    Caption {
        text: String,
        placement: CaptionPlacement,
    },
}

/// Runs image commands against a message.
#[derive(Clone)]
pub struct EditImageUseCase {
    extractor: ImageReferenceExtractor,
    source: Arc<dyn ImageSourcePort>,
    compositor: CaptionCompositor,
    options: EditOptions,
}

impl EditImageUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        source: Arc<dyn ImageSourcePort>,
        compositor: CaptionCompositor,
        options: EditOptions,
    ) -> Self {
        Self {
            extractor: ImageReferenceExtractor::new(source.clone()),
            source,
            compositor,
            options,
        }
    }

    /// Formats the echo reply.
    #[must_use]
    pub fn format_echo(urls: &[String]) -> String {
        format!(
            "Found {} images associated with your message:\n{}",
            urls.len(),
            urls.join("\n")
        )
    }

    /// Executes a command. Per-URL failures are collected, never propagated.
    pub async fn execute(&self, command: &ImageCommand, message: &ChatMessage) -> CommandOutcome {
        let urls = self.extractor.extract(message).await;

        let edit = match command {
            ImageCommand::Echo => return CommandOutcome::Text(Self::format_echo(&urls)),
            ImageCommand::Flip(direction) => Edit::Flip(*direction),
            ImageCommand::DeepFry => Edit::DeepFry,
            ImageCommand::Caption { text, placement } => Edit::Caption {
                text: text.clone(),
                placement: *placement,
            },
        };

        if urls.is_empty() {
            debug!(command = command.name(), "No images to process");
            return CommandOutcome::Text(NO_IMAGES_REPLY.to_string());
        }

        let mut files = Vec::with_capacity(urls.len());
        let mut failures = Vec::new();

        for (position, url) in urls.into_iter().enumerate() {
            match self.process(&edit, &url).await {
                Ok(image) => {
                    debug!(url = %url, format = image.format.extension(), "Image processed");
                    files.push(OutputFile::from_source(position, url, image));
                }
                Err(error) => {
                    warn!(url = %url, command = command.name(), error = %error, "Failed to process image");
                    failures.push(UrlFailure { url, error });
                }
            }
        }

        info!(
            command = command.name(),
            processed = files.len(),
            failed = failures.len(),
            "Command finished"
        );

        CommandOutcome::Images { files, failures }
    }

    async fn process(&self, edit: &Edit, url: &str) -> EditResult<EncodedImage> {
        let bytes = self.source.fetch(url).await?;

        let edit = edit.clone();
        let compositor = self.compositor.clone();
        let options = self.options;

        tokio::task::spawn_blocking(move || {
            let image = image_transform::decode(&bytes)?;
            let edited = match edit {
                Edit::Flip(direction) => image_transform::flip(&image, direction),
                Edit::DeepFry => image_transform::deep_fry(&image, options.deep_fry_quality)?,
                Edit::Caption { text, placement } => compositor.compose(&image, &text, placement),
            };
            image_transform::encode_for_delivery(&edited, options.jpeg_quality)
        })
        .await
        .map_err(|e| ImageEditError::task(e.to_string()))?
    }
}
