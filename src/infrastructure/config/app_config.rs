//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::services::CaptionStyle;
use crate::application::services::caption::DEFAULT_WIDTH_FACTOR;
use crate::application::services::image_transform::{
    DEFAULT_DEEP_FRY_QUALITY, DEFAULT_JPEG_QUALITY,
};
use crate::application::use_cases::EditOptions;
use crate::infrastructure::fonts::font_store::{EMOJI_FONT_URL, MAIN_FONT_URL};
use crate::infrastructure::http::client::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::infrastructure::render::glyph_renderer::{DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};

pub(crate) const APP_NAME: &str = "imagedit";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "imagedit";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Outbound HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Caption layout settings.
    #[serde(default)]
    pub caption: CaptionConfig,

    /// Font asset settings.
    #[serde(default)]
    pub fonts: FontsConfig,

    /// Encoder settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Outbound HTTP configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Caption configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionConfig {
    /// Reference font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Outline thickness in pixels at the reference size.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,

    /// Layer width relative to the widest line.
    #[serde(default = "default_width_factor")]
    pub width_factor: f32,

    /// Empty rows above and below the text block.
    #[serde(default)]
    pub vertical_margin: u32,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            stroke_width: default_stroke_width(),
            width_factor: default_width_factor(),
            vertical_margin: 0,
        }
    }
}

impl CaptionConfig {
    /// Layout parameters for the compositor.
    #[must_use]
    pub const fn style(&self) -> CaptionStyle {
        CaptionStyle {
            width_factor: self.width_factor,
            vertical_margin: self.vertical_margin,
        }
    }
}

/// Font asset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontsConfig {
    /// Font directory. Defaults to the data directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Where to download the caption face from.
    #[serde(default = "default_main_font_url")]
    pub main_font_url: String,

    /// Where to download the emoji face from.
    #[serde(default = "default_emoji_font_url")]
    pub emoji_font_url: String,

    /// Download the emoji face at startup.
    #[serde(default = "default_true")]
    pub fetch_emoji: bool,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            main_font_url: default_main_font_url(),
            emoji_font_url: default_emoji_font_url(),
            fetch_emoji: true,
        }
    }
}

/// Encoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Quality of delivered JPEGs (1-100).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Quality of the deep fry pass (1-100).
    #[serde(default = "default_deep_fry_quality")]
    pub deep_fry_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            deep_fry_quality: default_deep_fry_quality(),
        }
    }
}

impl OutputConfig {
    /// Encoder settings for the use case.
    #[must_use]
    pub const fn edit_options(&self) -> EditOptions {
        EditOptions {
            jpeg_quality: self.jpeg_quality,
            deep_fry_quality: self.deep_fry_quality,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_stroke_width() -> u32 {
    DEFAULT_STROKE_WIDTH
}

fn default_width_factor() -> f32 {
    DEFAULT_WIDTH_FACTOR
}

fn default_main_font_url() -> String {
    MAIN_FONT_URL.to_string()
}

fn default_emoji_font_url() -> String {
    EMOJI_FONT_URL.to_string()
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_deep_fry_quality() -> u8 {
    DEFAULT_DEEP_FRY_QUALITY
}

fn default_true() -> bool {
    true
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
        if let Some(font_dir) = &args.font_dir {
            self.fonts.dir = Some(font_dir.clone());
        }
        if let Some(font_size) = args.font_size {
            self.caption.font_size = font_size;
        }
        if let Some(jpeg_quality) = args.jpeg_quality {
            self.output.jpeg_quality = jpeg_quality;
        }
        if let Some(deep_fry_quality) = args.deep_fry_quality {
            self.output.deep_fry_quality = deep_fry_quality;
        }
    }

    /// Returns default font directory.
    #[must_use]
    pub fn default_font_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("fonts"))
    }

    /// Returns effective font directory.
    #[must_use]
    pub fn effective_font_dir(&self) -> Option<PathBuf> {
        self.fonts.dir.clone().or_else(Self::default_font_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            http: HttpConfig::default(),
            caption: CaptionConfig::default(),
            fonts: FontsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
