//! Bounding-box scaling: decode, compute one uniform scale factor, resize,
//! re-encode in the source's own format.

use std::io::Cursor;

use image::imageops::FilterType;

use crate::keys::OutputFormat;

/// Scales the image to fit inside `max_width` x `max_height` and returns
/// the re-encoded bytes. An image already inside the box is re-encoded at
/// its original dimensions.
pub fn scale_to_fit(
    bytes: &[u8],
    format: OutputFormat,
    max_width: u32,
    max_height: u32,
) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = bounded_dimensions(img.width(), img.height(), max_width, max_height);

    let resized = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    let mut buffer = Vec::new();
    resized.write_to(&mut Cursor::new(&mut buffer), format.image_format())?;
    Ok(buffer)
}

/// Target dimensions for a `width` x `height` image inside the box. One
/// scale factor is applied to both axes, so the aspect ratio survives.
/// The factor is clamped at 1.0: small images are never upscaled.
pub fn bounded_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    )
    .min(1.0);

    // Extreme aspect ratios can round the short axis down to zero; one
    // pixel is the floor.
    let scaled_width = ((scale * f64::from(width)).round() as u32).max(1);
    let scaled_height = ((scale * f64::from(height)).round() as u32).max(1);
    (scaled_width, scaled_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    fn encoded_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 251) as u8, (y % 241) as u8, ((x + y) % 239) as u8])
        });
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), format)
            .unwrap();
        buffer
    }

    #[test]
    fn landscape_image_is_bounded_by_width() {
        assert_eq!(bounded_dimensions(800, 400, 200, 200), (200, 100));
    }

    #[test]
    fn portrait_image_is_bounded_by_height() {
        assert_eq!(bounded_dimensions(400, 800, 200, 200), (100, 200));
    }

    #[test]
    fn small_image_is_not_upscaled() {
        assert_eq!(bounded_dimensions(100, 50, 200, 200), (100, 50));
    }

    #[test]
    fn oversized_images_always_fit_the_box() {
        for &(w, h) in &[(201u32, 200u32), (1024, 768), (300, 301), (5000, 17)] {
            let (sw, sh) = bounded_dimensions(w, h, 200, 200);
            assert!(sw <= 200 && sh <= 200, "{w}x{h} scaled to {sw}x{sh}");
        }
    }

    #[test]
    fn aspect_ratio_survives_within_rounding() {
        let (sw, sh) = bounded_dimensions(1024, 768, 200, 200);
        let original = 1024.0 / 768.0;
        let scaled = f64::from(sw) / f64::from(sh);
        assert!((original - scaled).abs() < 0.02, "{original} vs {scaled}");
    }

    #[test]
    fn degenerate_aspect_ratio_keeps_one_pixel() {
        assert_eq!(bounded_dimensions(10_000, 1, 200, 200), (200, 1));
    }

    #[test]
    fn scales_png_to_fit() {
        let bytes = encoded_test_image(800, 400, ImageFormat::Png);
        let thumbnail = scale_to_fit(&bytes, OutputFormat::Png, 200, 200).unwrap();

        assert_eq!(image::guess_format(&thumbnail).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&thumbnail).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 100));
    }

    #[test]
    fn scales_jpeg_to_fit() {
        let bytes = encoded_test_image(400, 800, ImageFormat::Jpeg);
        let thumbnail = scale_to_fit(&bytes, OutputFormat::Jpeg, 200, 200).unwrap();

        assert_eq!(image::guess_format(&thumbnail).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&thumbnail).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 200));
    }

    #[test]
    fn small_image_keeps_its_dimensions() {
        let bytes = encoded_test_image(120, 80, ImageFormat::Png);
        let thumbnail = scale_to_fit(&bytes, OutputFormat::Png, 200, 200).unwrap();

        let decoded = image::load_from_memory(&thumbnail).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 80));
    }

    #[test]
    fn scaling_is_deterministic() {
        let bytes = encoded_test_image(800, 400, ImageFormat::Png);
        let first = scale_to_fit(&bytes, OutputFormat::Png, 200, 200).unwrap();
        let second = scale_to_fit(&bytes, OutputFormat::Png, 200, 200).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn corrupt_bytes_fail_to_decode() {
        assert!(scale_to_fit(b"not an image", OutputFormat::Png, 200, 200).is_err());
    }
}
