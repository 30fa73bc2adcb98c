use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use imagedit::domain::entities::{Attachment, ChatMessage};
use imagedit::infrastructure::{AppConfig, CliArgs, DirectoryReply, StorageManager};
use imagedit::presentation::ImageEditPlugin;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn read_message(args: &CliArgs) -> Result<ChatMessage> {
    if let Some(path) = &args.message {
        return message_from_file(path);
    }

    let message = args
        .attachments
        .iter()
        .fold(ChatMessage::new(args.text.clone()), |message, url| {
            message.with_attachment(Attachment::new(url.clone()))
        });

    Ok(message)
}

fn message_from_file(path: &Path) -> Result<ChatMessage> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read message file {}", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("invalid message file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = imagedit::VERSION, verb = %args.verb, "Starting {}", imagedit::NAME);

    let message = read_message(&args)?;
    let reply = DirectoryReply::new(args.out_dir.clone()).await?;

    let plugin = ImageEditPlugin::load(&config).await?;
    let result = plugin
        .handle(&args.verb, &args.arguments(), &message, &reply)
        .await;
    plugin.unload();

    result?;
    Ok(())
}
