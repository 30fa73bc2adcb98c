use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "imagedit",
    version,
    about = "Flip, deep fry and caption the images referenced by a chat message",
    long_about = None
)]
pub struct CliArgs {
    /// Command verb (echo, vflip, hflip, rotate, deepfry, caption-top, caption-bottom).
    #[arg(value_name = "COMMAND")]
    pub verb: String,

    /// Command arguments, e.g. the caption text.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,

    /// Message text to scan for image URLs.
    #[arg(short, long, default_value = "")]
    pub text: String,

    /// Attachment URL (repeatable).
    #[arg(short, long = "attachment", value_name = "URL")]
    pub attachments: Vec<String>,

    /// Read the message from a JSON file instead of --text/--attachment.
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["text", "attachments"])]
    pub message: Option<PathBuf>,

    /// Directory replies are written to.
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub out_dir: PathBuf,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// HTTP request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Font directory.
    #[arg(long, value_name = "PATH", env = "IMAGEDIT_FONT_DIR")]
    pub font_dir: Option<PathBuf>,

    /// Caption reference font size.
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Quality of delivered JPEGs (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: Option<u8>,

    /// Quality of the deep fry pass (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub deep_fry_quality: Option<u8>,
}

impl CliArgs {
    /// Everything after the verb, joined back into one string.
    #[must_use]
    pub fn arguments(&self) -> String {
        self.args.join(" ")
    }
}
