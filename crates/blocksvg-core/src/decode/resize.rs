//! Output scaling applied before block sampling.
//!
//! The encoder works on the resampled image, so the SVG coordinate space is
//! the scaled pixel grid rather than the source one.

use image::imageops::FilterType;

use super::{DecodeError, DecodedImage};

/// Largest pixel count an upscale may produce (8192 x 8192).
///
/// Bounds the RGB buffer allocated by resampling to 192 MiB.
pub const MAX_SCALED_PIXELS: u64 = 8192 * 8192;

/// Compute the target dimensions for a scale factor.
///
/// Dimensions are truncated toward zero, so very small scales can yield a
/// zero-sized result. Callers must reject that before resampling.
pub fn scale_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let w = (width as f64 * scale).floor();
    let h = (height as f64 * scale).floor();
    (w.clamp(0.0, u32::MAX as f64) as u32, h.clamp(0.0, u32::MAX as f64) as u32)
}

/// Resample an image by `scale` using Lanczos3 interpolation.
///
/// A scale of exactly 1.0 returns a clone without resampling.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the scaled size has a zero side.
/// Returns `DecodeError::TooLarge` if an upscale exceeds [`MAX_SCALED_PIXELS`].
/// Returns `DecodeError::CorruptedFile` if the pixel buffer does not match
/// the image dimensions.
pub fn scale_image(image: &DecodedImage, scale: f64) -> Result<DecodedImage, DecodeError> {
    if scale == 1.0 {
        return Ok(image.clone());
    }

    let (width, height) = scale_dimensions(image.width, image.height, scale);
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }
    if exceeds_limit(width, height, scale) {
        return Err(DecodeError::TooLarge {
            width,
            height,
            max_pixels: MAX_SCALED_PIXELS,
        });
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, FilterType::Lanczos3);

    Ok(DecodedImage::from_rgb_image(resized))
}

/// True when upscaling to `width` x `height` would pass [`MAX_SCALED_PIXELS`].
///
/// Downscales are never rejected since they allocate less than the source.
pub(crate) fn exceeds_limit(width: u32, height: u32, scale: f64) -> bool {
    scale > 1.0 && (width as u64) * (height as u64) > MAX_SCALED_PIXELS
}
