//! Local font cache, filled from fixed remote locations on first use.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info};

use crate::domain::errors::{EditResult, ImageEditError};
use crate::domain::ports::ImageSourcePort;

/// Caption face.
pub const MAIN_FONT_FILE: &str = "NotoSans-Regular.ttf";
/// Default download location of the caption face.
pub const MAIN_FONT_URL: &str =
    "https://github.com/notofonts/notofonts.github.io/raw/main/fonts/NotoSans/hinted/ttf/NotoSans-Regular.ttf";

/// Color emoji face.
pub const EMOJI_FONT_FILE: &str = "NotoColorEmoji.ttf";
/// Default download location of the emoji face.
pub const EMOJI_FONT_URL: &str =
    "https://github.com/googlefonts/noto-emoji/raw/main/fonts/NotoColorEmoji.ttf";

/// A font file and where to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAsset {
    /// File name inside the font directory.
    pub file_name: String,
    /// Remote location used when the file is missing.
    pub url: String,
}

impl FontAsset {
    /// Creates an asset description.
    #[must_use]
    pub fn new(file_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            url: url.into(),
        }
    }
}

/// Directory of font files.
pub struct FontStore {
    font_dir: PathBuf,
    source: Arc<dyn ImageSourcePort>,
}

impl std::fmt::Debug for FontStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontStore")
            .field("font_dir", &self.font_dir)
            .finish_non_exhaustive()
    }
}

impl FontStore {
    /// Creates a store in the given directory.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn new(font_dir: PathBuf, source: Arc<dyn ImageSourcePort>) -> EditResult<Self> {
        fs::create_dir_all(&font_dir).await?;
        Ok(Self { font_dir, source })
    }

    /// Returns the font directory.
    #[must_use]
    pub fn font_dir(&self) -> &Path {
        &self.font_dir
    }

    /// Returns where an asset lives locally.
    #[must_use]
    pub fn path_for(&self, asset: &FontAsset) -> PathBuf {
        self.font_dir.join(&asset.file_name)
    }

    /// Returns the local path of `asset`, downloading it first if missing.
    ///
    /// # Errors
    /// Returns `Render` if the download fails and `Io` if the file cannot be written.
    pub async fn ensure(&self, asset: &FontAsset) -> EditResult<PathBuf> {
        let path = self.path_for(asset);
        if fs::try_exists(&path).await.unwrap_or(false) {
            debug!(path = %path.display(), "Font present");
            return Ok(path);
        }

        info!(url = %asset.url, path = %path.display(), "Downloading font");

        let bytes = self.source.fetch(&asset.url).await.map_err(|e| {
            ImageEditError::render(format!("font {} unavailable: {e}", asset.file_name))
        })?;

        let dir = self.font_dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut temp_file = tempfile::NamedTempFile::new_in(&dir)?;
            temp_file.write_all(&bytes)?;
            temp_file.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| std::io::Error::other(format!("font write task panicked: {e}")))??;

        info!(path = %path.display(), "Font cached");

        Ok(path)
    }
}
