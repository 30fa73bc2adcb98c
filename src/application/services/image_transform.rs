//! Stateless raster transforms and codec helpers.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgba, RgbImage, RgbaImage};

use crate::domain::entities::{EncodedImage, FlipDirection, OutputFormat};
use crate::domain::errors::{EditResult, ImageEditError};

/// JPEG quality used for the deep fry pass.
pub const DEFAULT_DEEP_FRY_QUALITY: u8 = 5;

/// JPEG quality used when delivering opaque images.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Decodes raw bytes, guessing the format from the content.
///
/// # Errors
/// Returns `Decode` if the bytes are not a supported image.
pub fn decode(bytes: &[u8]) -> EditResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| ImageEditError::decode(e.to_string()))
}

/// Mirrors the image. Dimensions are unchanged.
#[must_use]
pub fn flip(image: &DynamicImage, direction: FlipDirection) -> DynamicImage {
    match direction {
        FlipDirection::Vertical => image.flipv(),
        FlipDirection::Horizontal => image.fliph(),
        FlipDirection::Both => image.rotate180(),
    }
}

/// Runs the color channels through a low quality JPEG pass.
///
/// Alpha, when present, is carried across the pass untouched.
///
/// # Errors
/// Returns `Encode` or `Decode` if the JPEG round trip fails.
pub fn deep_fry(image: &DynamicImage, quality: u8) -> EditResult<DynamicImage> {
    if !image.color().has_alpha() {
        return jpeg_round_trip(&image.to_rgb8(), quality);
    }

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let alpha: Vec<u8> = rgba.pixels().map(|p| p[3]).collect();
    let color = DynamicImage::ImageRgba8(rgba).to_rgb8();

    let fried = jpeg_round_trip(&color, quality)?.to_rgb8();

    let mut out = RgbaImage::new(width, height);
    for ((dst, src), a) in out.pixels_mut().zip(fried.pixels()).zip(alpha) {
        *dst = Rgba([src[0], src[1], src[2], a]);
    }
    Ok(DynamicImage::ImageRgba8(out))
}

/// Serializes an image for delivery: PNG with alpha, JPEG without.
///
/// # Errors
/// Returns `Encode` if the encoder rejects the image.
pub fn encode_for_delivery(image: &DynamicImage, jpeg_quality: u8) -> EditResult<EncodedImage> {
    if image.color().has_alpha() {
        let mut buf = Vec::new();
        image
            .to_rgba8()
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| ImageEditError::encode(format!("png: {e}")))?;
        return Ok(EncodedImage {
            bytes: Bytes::from(buf),
            format: OutputFormat::Png,
        });
    }

    Ok(EncodedImage {
        bytes: Bytes::from(encode_jpeg(&image.to_rgb8(), jpeg_quality)?),
        format: OutputFormat::Jpeg,
    })
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> EditResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    image
        .write_with_encoder(encoder)
        .map_err(|e| ImageEditError::encode(format!("jpeg: {e}")))?;
    Ok(buf)
}

fn jpeg_round_trip(image: &RgbImage, quality: u8) -> EditResult<DynamicImage> {
    let encoded = encode_jpeg(image, quality)?;
    image::load_from_memory_with_format(&encoded, ImageFormat::Jpeg)
        .map_err(|e| ImageEditError::decode(format!("jpeg round trip: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb};
    use test_case::test_case;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 7 + y * 3) % 256) as u8,
                ((x * x + y) % 256) as u8,
                ((y * 11) % 256) as u8,
            ])
        })
    }

    fn translucent(width: u32, height: u32) -> RgbaImage {
        let colors = gradient(width, height);
        RgbaImage::from_fn(width, height, |x, y| {
            let base = colors.get_pixel(x, y).0;
            Rgba([base[0], base[1], base[2], ((x * 13 + y * 5) % 256) as u8])
        })
    }

    #[test_case(FlipDirection::Vertical ; "vertical")]
    #[test_case(FlipDirection::Horizontal ; "horizontal")]
    #[test_case(FlipDirection::Both ; "both")]
    fn test_flip_is_involutive(direction: FlipDirection) {
        let image = DynamicImage::ImageRgba8(translucent(17, 9));
        let twice = flip(&flip(&image, direction), direction);
        assert_eq!(twice, image);
    }

    #[test]
    fn test_flip_keeps_dimensions_and_moves_pixels() {
        let image = DynamicImage::ImageRgb8(gradient(5, 3));

        let v = flip(&image, FlipDirection::Vertical);
        let h = flip(&image, FlipDirection::Horizontal);
        let both = flip(&image, FlipDirection::Both);

        assert_eq!(v.dimensions(), (5, 3));
        assert_eq!(v.get_pixel(1, 0), image.get_pixel(1, 2));
        assert_eq!(h.get_pixel(0, 1), image.get_pixel(4, 1));
        assert_eq!(both.get_pixel(0, 0), image.get_pixel(4, 2));
    }

    #[test]
    fn test_deep_fry_opaque_changes_color_data() {
        let image = DynamicImage::ImageRgb8(gradient(64, 48));
        let fried = deep_fry(&image, DEFAULT_DEEP_FRY_QUALITY).unwrap();

        assert_eq!(fried.dimensions(), (64, 48));
        assert!(!fried.color().has_alpha());
        assert_ne!(fried.to_rgb8(), image.to_rgb8());
    }

    #[test]
    fn test_deep_fry_preserves_alpha_exactly() {
        let source = translucent(40, 30);
        let image = DynamicImage::ImageRgba8(source.clone());
        let fried = deep_fry(&image, DEFAULT_DEEP_FRY_QUALITY).unwrap();

        assert_eq!(fried.dimensions(), (40, 30));
        let fried = fried.as_rgba8().unwrap();
        for (a, b) in fried.pixels().zip(source.pixels()) {
            assert_eq!(a[3], b[3]);
        }
        let colors_changed = fried
            .pixels()
            .zip(source.pixels())
            .any(|(a, b)| a[0] != b[0] || a[1] != b[1] || a[2] != b[2]);
        assert!(colors_changed);
    }

    #[test]
    fn test_deep_fry_luma_alpha_keeps_alpha() {
        let image = DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_fn(8, 8, |x, y| {
            image::LumaA([(x * 30) as u8, (y * 30) as u8])
        }));
        let fried = deep_fry(&image, 10).unwrap();
        let fried = fried.to_rgba8();
        for (x, y, p) in fried.enumerate_pixels() {
            assert_eq!(p[3], (y * 30) as u8, "alpha changed at {x},{y}");
        }
    }

    #[test]
    fn test_encode_picks_png_for_alpha() {
        let image = DynamicImage::ImageRgba8(translucent(4, 4));
        let encoded = encode_for_delivery(&image, DEFAULT_JPEG_QUALITY).unwrap();

        assert_eq!(encoded.format, OutputFormat::Png);
        assert!(encoded.bytes.starts_with(b"\x89PNG"));
        assert_eq!(decode(&encoded.bytes).unwrap().to_rgba8(), translucent(4, 4));
    }

    #[test]
    fn test_encode_picks_jpeg_for_opaque() {
        let image = DynamicImage::ImageRgb8(gradient(4, 4));
        let encoded = encode_for_delivery(&image, DEFAULT_JPEG_QUALITY).unwrap();

        assert_eq!(encoded.format, OutputFormat::Jpeg);
        assert!(encoded.bytes.starts_with(&[0xFF, 0xD8]));
        assert_eq!(decode(&encoded.bytes).unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode(b"definitely not an image");
        assert!(matches!(result, Err(ImageEditError::Decode { .. })));
    }
}
