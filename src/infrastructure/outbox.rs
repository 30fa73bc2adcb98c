//! Reply port that delivers into a local directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::domain::entities::OutputFile;
use crate::domain::errors::{EditResult, ImageEditError};
use crate::domain::ports::ReplyPort;

/// File text replies are appended to.
pub const TEXT_LOG_FILE: &str = "replies.txt";

/// Writes image replies as files and text replies to stdout and a log file.
#[derive(Debug, Clone)]
pub struct DirectoryReply {
    out_dir: PathBuf,
    echo_stdout: bool,
}

impl DirectoryReply {
    /// Creates the output directory if needed.
    ///
    /// # Errors
    /// Returns `Delivery` if the directory cannot be created.
    pub async fn new(out_dir: PathBuf) -> EditResult<Self> {
        fs::create_dir_all(&out_dir).await.map_err(|e| {
            ImageEditError::delivery(format!("cannot create {}: {e}", out_dir.display()))
        })?;
        Ok(Self {
            out_dir,
            echo_stdout: true,
        })
    }

    /// Disables printing text replies to stdout.
    #[must_use]
    pub const fn quiet(mut self) -> Self {
        self.echo_stdout = false;
        self
    }

    /// Returns the output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[async_trait]
impl ReplyPort for DirectoryReply {
    async fn send_text(&self, text: &str) -> EditResult<()> {
        if self.echo_stdout {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(format!("{text}\n").as_bytes())
                .await
                .map_err(|e| ImageEditError::delivery(e.to_string()))?;
            stdout
                .flush()
                .await
                .map_err(|e| ImageEditError::delivery(e.to_string()))?;
        }

        let path = self.out_dir.join(TEXT_LOG_FILE);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| ImageEditError::delivery(format!("{}: {e}", path.display())))?;
        file.write_all(format!("{text}\n").as_bytes())
            .await
            .map_err(|e| ImageEditError::delivery(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), len = text.len(), "Text reply written");
        Ok(())
    }

    async fn send_file(&self, file: OutputFile) -> EditResult<()> {
        let path = self.out_dir.join(&file.filename);
        fs::write(&path, &file.image.bytes)
            .await
            .map_err(|e| ImageEditError::delivery(format!("{}: {e}", path.display())))?;

        info!(
            path = %path.display(),
            source = %file.source_url,
            size = file.image.bytes.len(),
            "Image reply written"
        );
        Ok(())
    }

    async fn trigger_typing(&self) -> EditResult<()> {
        debug!("Working");
        Ok(())
    }
}
