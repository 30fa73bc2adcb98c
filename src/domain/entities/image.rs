//! Domain types for image editing.

use bytes::Bytes;
use sha2::{Digest, Sha256};

/// Stable identifier for an image source, derived from a SHA-256 of its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(String);

impl ImageId {
    /// Hashes `url`, keeping the first 16 bytes as hex.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let digest = Sha256::digest(url.as_bytes());
        Self(hex::encode(&digest[..16]))
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mirror axis for the flip transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipDirection {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
    /// Both axes, equivalent to a 180 degree rotation.
    Both,
}

impl std::fmt::Display for FlipDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Where the caption band goes relative to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptionPlacement {
    /// Band above the image.
    #[default]
    Top,
    /// Band below the image.
    Bottom,
}

impl std::fmt::Display for CaptionPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

/// Container format of a delivered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Lossless, keeps alpha.
    Png,
    /// Lossy, opaque only.
    Jpeg,
}

impl OutputFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Serialized image ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded bytes.
    pub bytes: Bytes,
    /// Format of `bytes`.
    pub format: OutputFormat,
}

/// A file to attach to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// File name including extension.
    pub filename: String,
    /// Source URL the file was produced from.
    pub source_url: String,
    /// File content.
    pub image: EncodedImage,
}

impl OutputFile {
    /// Names the file `{position}-{id}.{ext}`, where `position` is the
    /// source's index among the message's image references. Repeated URLs
    /// therefore get distinct names.
    #[must_use]
    pub fn from_source(position: usize, source_url: impl Into<String>, image: EncodedImage) -> Self {
        let source_url = source_url.into();
        let filename = format!(
            "{position}-{}.{}",
            ImageId::from_url(&source_url),
            image.format.extension()
        );
        Self {
            filename,
            source_url,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(format: OutputFormat) -> EncodedImage {
        EncodedImage {
            bytes: Bytes::from_static(b"x"),
            format,
        }
    }

    #[test]
    fn test_image_id_is_stable() {
        let a = ImageId::from_url("https://example.com/cat.png");
        let b = ImageId::from_url("https://example.com/cat.png");
        let c = ImageId::from_url("https://example.com/dog.png");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string().len(), 32);
    }

    #[test]
    fn test_output_file_extension_follows_format() {
        let png = OutputFile::from_source(0, "https://example.com/a.webp", encoded(OutputFormat::Png));
        let jpg =
            OutputFile::from_source(0, "https://example.com/a.webp", encoded(OutputFormat::Jpeg));

        assert!(png.filename.ends_with(".png"));
        assert!(jpg.filename.ends_with(".jpg"));
        assert_eq!(
            png.filename.trim_end_matches(".png"),
            jpg.filename.trim_end_matches(".jpg")
        );
    }

    #[test]
    fn test_repeated_source_gets_distinct_names() {
        let url = "https://example.com/a.png";
        let first = OutputFile::from_source(0, url, encoded(OutputFormat::Png));
        let second = OutputFile::from_source(1, url, encoded(OutputFormat::Png));

        assert_ne!(first.filename, second.filename);
        assert_eq!(
            first.filename,
            format!("0-{}.png", ImageId::from_url(url))
        );
        assert!(second.filename.starts_with("1-"));
    }
}
