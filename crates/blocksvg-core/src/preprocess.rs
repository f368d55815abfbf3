//! Per-pixel mode reduction applied before block averaging.
//!
//! - **Color**: pixels pass through unchanged.
//! - **Grayscale**: each pixel becomes its BT.601 luma, replicated to R=G=B.
//! - **BlackAndWhite**: luma is thresholded to 0 or 255, replicated to R=G=B.
//!
//! Black/white reduction happens per pixel, not per block. Averaging a block
//! that straddles black and white pixels therefore still yields intermediate
//! grays in the output; that is the expected behavior of this mode.

use crate::decode::DecodedImage;
use crate::luminance::{luma_u8, threshold};
use crate::ConversionMode;

/// Reduce the pixels of `image` according to `mode`.
///
/// Returns a new image with the same dimensions.
pub fn apply_mode(image: &DecodedImage, mode: ConversionMode) -> DecodedImage {
    match mode {
        ConversionMode::Color => image.clone(),
        ConversionMode::Grayscale => map_luma(image, |l| l),
        ConversionMode::BlackAndWhite => map_luma(image, threshold),
    }
}

fn map_luma(image: &DecodedImage, f: impl Fn(u8) -> u8) -> DecodedImage {
    let mut pixels = Vec::with_capacity(image.pixels.len());
    for chunk in image.pixels.chunks_exact(3) {
        let v = f(luma_u8(chunk[0], chunk[1], chunk[2]));
        pixels.extend_from_slice(&[v, v, v]);
    }
    DecodedImage::new(image.width, image.height, pixels)
}
