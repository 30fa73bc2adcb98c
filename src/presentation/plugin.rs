//! Chat-facing entry point for the image commands.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{CommandOutcome, UrlFailure};
use crate::application::services::{CaptionCompositor, CaptionStyle};
use crate::application::use_cases::{EditImageUseCase, EditOptions};
use crate::domain::entities::ChatMessage;
use crate::domain::errors::{EditResult, ImageEditError};
use crate::domain::ports::{ImageSourcePort, ReplyPort, TextRenderer};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::fonts::font_store::{EMOJI_FONT_FILE, MAIN_FONT_FILE};
use crate::infrastructure::fonts::{FontAsset, FontStore};
use crate::infrastructure::http::HttpImageSource;
use crate::infrastructure::render::GlyphTextRenderer;

use super::commands::CommandRegistry;

/// Image editing commands bound to a shared HTTP client and caption font.
pub struct ImageEditPlugin {
    registry: CommandRegistry,
    use_case: EditImageUseCase,
}

impl ImageEditPlugin {
    /// Acquires the HTTP client and fonts.
    ///
    /// # Errors
    /// Returns `Render` if the caption font cannot be fetched or parsed, and
    /// `HttpClient` if the client cannot be built.
    pub async fn load(config: &AppConfig) -> EditResult<Self> {
        let source: Arc<dyn ImageSourcePort> = Arc::new(HttpImageSource::new(
            config.http.timeout_secs,
            &config.http.user_agent,
        )?);

        let font_dir = config
            .effective_font_dir()
            .ok_or_else(|| ImageEditError::render("cannot determine font directory"))?;
        let fonts = FontStore::new(font_dir, source.clone()).await?;

        let main_font = fonts
            .ensure(&FontAsset::new(MAIN_FONT_FILE, &config.fonts.main_font_url))
            .await?;

        if config.fonts.fetch_emoji {
            let emoji = FontAsset::new(EMOJI_FONT_FILE, &config.fonts.emoji_font_url);
            if let Err(e) = fonts.ensure(&emoji).await {
                warn!(error = %e, "Emoji font unavailable");
            }
        }

        let renderer = GlyphTextRenderer::from_file(
            &main_font,
            config.caption.font_size,
            config.caption.stroke_width,
        )
        .await?;

        info!(font_dir = %fonts.font_dir().display(), "Image edit plugin loaded");

        Ok(Self::with_ports(
            source,
            Arc::new(renderer),
            config.caption.style(),
            config.output.edit_options(),
        ))
    }

    /// Builds the plugin from already constructed ports.
    #[must_use]
    pub fn with_ports(
        source: Arc<dyn ImageSourcePort>,
        renderer: Arc<dyn TextRenderer>,
        style: CaptionStyle,
        options: EditOptions,
    ) -> Self {
        Self {
            registry: CommandRegistry::new(),
            use_case: EditImageUseCase::new(
                source,
                CaptionCompositor::new(renderer, style),
                options,
            ),
        }
    }

    /// Verbs this plugin answers to.
    #[must_use]
    pub fn verbs(&self) -> &[&'static str] {
        self.registry.primary_verbs()
    }

    /// Runs one command invocation and delivers its replies.
    ///
    /// # Errors
    /// Returns `UnknownCommand` for unregistered verbs and `Delivery` if a
    /// text reply cannot be sent.
    pub async fn handle(
        &self,
        verb: &str,
        arguments: &str,
        message: &ChatMessage,
        reply: &dyn ReplyPort,
    ) -> EditResult<()> {
        let Some(command) = self.registry.resolve(verb, arguments) else {
            return Err(ImageEditError::UnknownCommand {
                verb: verb.to_string(),
            });
        };

        if let Err(e) = reply.trigger_typing().await {
            debug!(error = %e, "Typing indicator failed");
        }

        match self.use_case.execute(&command, message).await {
            CommandOutcome::Text(text) => reply.send_text(&text).await,
            CommandOutcome::Images {
                files,
                mut failures,
            } => {
                for file in files {
                    let url = file.source_url.clone();
                    if let Err(error) = reply.send_file(file).await {
                        warn!(url = %url, error = %error, "Failed to deliver image");
                        failures.push(UrlFailure { url, error });
                    }
                }

                let report = CommandOutcome::Images {
                    files: Vec::new(),
                    failures,
                }
                .failure_report();

                match report {
                    Some(text) => reply.send_text(&text).await,
                    None => Ok(()),
                }
            }
        }
    }

    /// Releases the HTTP client.
    pub fn unload(self) {
        drop(self.use_case);
        info!("Image edit plugin unloaded");
    }
}
