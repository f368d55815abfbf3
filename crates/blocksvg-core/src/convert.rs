//! The conversion entry points.
//!
//! `convert` is a pure function of its inputs: the same image and
//! parameters always yield byte-identical SVG text. It holds no state
//! between calls and may run concurrently on independent images.

use thiserror::Error;
use tracing::{debug, trace};

use crate::blocks::average_blocks;
use crate::decode::{
    exceeds_limit, scale_dimensions, scale_image, DecodeError, DecodedImage, MAX_SCALED_PIXELS,
};
use crate::encode::{SvgDocument, SvgOptions};
use crate::merge::{group_by_color, ColorGroup};
use crate::preprocess::apply_mode;
use crate::quantize::Quantizer;
use crate::{ConversionMode, ConversionParams};

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source image could not be decoded or resampled
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Width or height is zero, before or after scaling
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the image dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A conversion parameter is outside its declared bounds
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The background worker panicked before producing a result
    #[error("Conversion worker panicked")]
    WorkerPanicked,
}

/// Convert an image to SVG text.
///
/// # Arguments
///
/// * `image` - Decoded RGB source image
/// * `mode` - Pixel reduction mode
/// * `num_colors` - Target palette size (2 to 64)
/// * `detail_level` - Detail level (1 to 10); block size is `11 - detail_level`
/// * `output_scale` - Resample factor applied before sampling
///
/// # Errors
///
/// Returns `ConvertError::InvalidParameter` for out-of-range parameters or
/// an upscale past [`MAX_SCALED_PIXELS`], and
/// `ConvertError::InvalidDimensions` for an empty image or a scale that
/// shrinks it to nothing.
pub fn convert(
    image: &DecodedImage,
    mode: ConversionMode,
    num_colors: u32,
    detail_level: u32,
    output_scale: f64,
) -> Result<String, ConvertError> {
    let params = ConversionParams {
        mode,
        num_colors,
        detail_level,
        output_scale,
    };
    convert_with_params(image, &params)
}

/// Convert an image to SVG text using a parameter struct.
pub fn convert_with_params(
    image: &DecodedImage,
    params: &ConversionParams,
) -> Result<String, ConvertError> {
    convert_with_options(image, params, &SvgOptions::default())
}

/// Convert an image to SVG text with custom output options.
pub fn convert_with_options(
    image: &DecodedImage,
    params: &ConversionParams,
    options: &SvgOptions,
) -> Result<String, ConvertError> {
    let document = build_document(image, params)?;
    Ok(document.render(options))
}

/// Run the full pipeline and return the merged groups without rendering.
pub fn build_document(
    image: &DecodedImage,
    params: &ConversionParams,
) -> Result<SvgDocument, ConvertError> {
    params.validate()?;
    validate_image(image)?;

    let (scaled_w, scaled_h) = if params.output_scale == 1.0 {
        (image.width, image.height)
    } else {
        scale_dimensions(image.width, image.height, params.output_scale)
    };
    if scaled_w == 0 || scaled_h == 0 {
        return Err(ConvertError::InvalidDimensions {
            width: scaled_w,
            height: scaled_h,
        });
    }
    if exceeds_limit(scaled_w, scaled_h, params.output_scale) {
        return Err(ConvertError::InvalidParameter(format!(
            "output_scale {} gives a {}x{} image, above the {} pixel limit",
            params.output_scale, scaled_w, scaled_h, MAX_SCALED_PIXELS
        )));
    }

    let scaled = scale_image(image, params.output_scale)?;
    let reduced = apply_mode(&scaled, params.mode);
    trace!(width = reduced.width, height = reduced.height, mode = %params.mode, "preprocessed");

    let block_size = params.block_size();
    let blocks = average_blocks(&reduced, block_size);

    let quantizer = params.mode.quantizes().then(|| Quantizer::new(params.num_colors));
    let groups = group_by_color(blocks.iter().map(|block| {
        let color = match &quantizer {
            Some(q) => q.quantize(block.color),
            None => block.color,
        };
        (color, block.rect)
    }));

    let groups: Vec<ColorGroup> = groups.into_iter().map(ColorGroup::merged).collect();

    let document = SvgDocument {
        width: reduced.width,
        height: reduced.height,
        groups,
    };

    debug!(
        width = document.width,
        height = document.height,
        block_size,
        blocks = blocks.len(),
        colors = document.color_count(),
        rects = document.rect_count(),
        "built svg document"
    );

    Ok(document)
}

fn validate_image(image: &DecodedImage) -> Result<(), ConvertError> {
    if image.width == 0 || image.height == 0 {
        return Err(ConvertError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.pixel_count() * 3;
    if image.pixels.len() != expected {
        return Err(ConvertError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}
