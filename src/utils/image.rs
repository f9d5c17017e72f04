//! Image loading and preprocessing utilities.
//!
//! Mobile captures are large; recognizers and upload paths want something
//! smaller. These helpers load a file into the engine's working format,
//! downscale it to a bounding box while preserving aspect ratio, and
//! re-encode it as JPEG at a storage-friendly quality.

use crate::core::errors::{VisionError, VisionResult};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, RgbImage, imageops};
use std::path::Path;
use tracing::debug;

/// Default bounding box for [`downscale_to_fit`], in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 800;

/// Default quality for [`encode_jpeg`], on the encoder's 1-100 scale.
pub const DEFAULT_JPEG_QUALITY: u8 = 60;

/// Loads an image from disk into the engine's working format.
///
/// Any container format the `image` crate recognizes is accepted; pixels
/// are converted to RGB8.
///
/// # Arguments
///
/// * `path` - Path to the image file
///
/// # Errors
///
/// Returns [`VisionError::ImageLoad`] if the file cannot be opened or
/// decoded.
pub fn load_image(path: impl AsRef<Path>) -> VisionResult<RgbImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(VisionError::ImageLoad)?.to_rgb8();
    debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Downscales an image so its longest side fits `max_dimension`, preserving
/// aspect ratio.
///
/// Images already inside the bounding box are returned unchanged; this
/// never upscales. Resampling uses the Lanczos3 filter.
pub fn downscale_to_fit(image: &RgbImage, max_dimension: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let longest = width.max(height);
    if longest <= max_dimension || max_dimension == 0 {
        return image.clone();
    }

    let scale = max_dimension as f64 / longest as f64;
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    debug!(
        "downscaling {}x{} to {}x{}",
        width, height, new_width, new_height
    );
    imageops::resize(image, new_width, new_height, FilterType::Lanczos3)
}

/// Encodes an image as JPEG at the given quality.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `quality` - JPEG quality on the encoder's 1-100 scale
///
/// # Errors
///
/// Returns [`VisionError::ImageEncode`] if encoding fails.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> VisionResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(VisionError::ImageEncode)?;
    Ok(buffer)
}
