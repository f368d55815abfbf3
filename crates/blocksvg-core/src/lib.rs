//! blocksvg Core - Raster to SVG encoder
//!
//! This crate converts a decoded raster image into an SVG approximation made
//! of axis-aligned rectangles. The image is sampled in square blocks, each
//! block is reduced to its average color, colors are posterized to a small
//! number of levels, and horizontally adjacent blocks of the same color are
//! merged into wider rectangles.
//!
//! # Pipeline
//!
//! 1. [`decode`] - load PNG/JPEG/BMP/GIF bytes and resample by the output scale
//! 2. [`preprocess`] - black/white threshold or grayscale reduction
//! 3. [`blocks`] - block averaging
//! 4. [`quantize`] - per-channel posterization
//! 5. [`merge`] - color grouping and horizontal run merging
//! 6. [`encode`] - SVG text emission and file output

pub mod blocks;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod luminance;
pub mod merge;
pub mod preprocess;
pub mod quantize;
pub mod task;

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use blocks::{average_blocks, Block, Rect};
pub use convert::{
    build_document, convert, convert_with_options, convert_with_params, ConvertError,
};
pub use decode::{
    decode_image, image_info, load_image, DecodeError, DecodedImage, ImageInfo, MAX_SCALED_PIXELS,
};
pub use encode::{default_output_path, write_svg, SvgDocument, SvgOptions, WriteError};
pub use merge::{group_by_color, merge_runs, ColorGroup};
pub use quantize::{Quantizer, Rgb};
pub use task::ConversionTask;

/// Accepted range for the number of colors.
pub const NUM_COLORS_RANGE: RangeInclusive<u32> = 2..=64;

/// Accepted range for the detail level.
pub const DETAIL_LEVEL_RANGE: RangeInclusive<u32> = 1..=10;

/// How source pixels are reduced before block averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum ConversionMode {
    /// Full color, posterized per channel.
    #[default]
    #[serde(rename = "color")]
    Color,
    /// Luma thresholded to pure black or white, not posterized.
    #[serde(rename = "bw")]
    BlackAndWhite,
    /// Single-channel luma, posterized.
    #[serde(rename = "grayscale")]
    Grayscale,
}

impl ConversionMode {
    /// Short name used in configuration files and bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::Color => "color",
            ConversionMode::BlackAndWhite => "bw",
            ConversionMode::Grayscale => "grayscale",
        }
    }

    /// Whether block colors are posterized in this mode.
    pub fn quantizes(self) -> bool {
        self != ConversionMode::BlackAndWhite
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionMode {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "color" | "colour" => Ok(ConversionMode::Color),
            "bw" | "black-and-white" | "blackandwhite" | "mono" => {
                Ok(ConversionMode::BlackAndWhite)
            }
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(ConversionMode::Grayscale),
            other => Err(ConvertError::InvalidParameter(format!(
                "unknown mode '{}' (expected color, bw or grayscale)",
                other
            ))),
        }
    }
}

/// Validated conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionParams {
    /// Pixel reduction mode
    pub mode: ConversionMode,
    /// Target palette size (2 to 64), approximated by a cube root per channel
    #[serde(alias = "num_colors")]
    pub num_colors: u32,
    /// Detail level (1 to 10); higher means smaller blocks
    #[serde(alias = "detail_level")]
    pub detail_level: u32,
    /// Resample factor applied to the source before sampling (e.g. 0.5, 1.0, 2.0)
    #[serde(alias = "output_scale")]
    pub output_scale: f64,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            mode: ConversionMode::Color,
            num_colors: 16,
            detail_level: 5,
            output_scale: 1.0,
        }
    }
}

impl ConversionParams {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conversion mode
    pub fn with_mode(mut self, mode: ConversionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the number of colors
    pub fn with_num_colors(mut self, num_colors: u32) -> Self {
        self.num_colors = num_colors;
        self
    }

    /// Set the detail level
    pub fn with_detail_level(mut self, detail_level: u32) -> Self {
        self.detail_level = detail_level;
        self
    }

    /// Set the output scale
    pub fn with_output_scale(mut self, output_scale: f64) -> Self {
        self.output_scale = output_scale;
        self
    }

    /// Edge length of a sampling block in pixels: `max(1, 11 - detail_level)`.
    pub fn block_size(&self) -> u32 {
        11u32.saturating_sub(self.detail_level).max(1)
    }

    /// Check every field against its declared bounds.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !NUM_COLORS_RANGE.contains(&self.num_colors) {
            return Err(ConvertError::InvalidParameter(format!(
                "num_colors must be in {}..={}, got {}",
                NUM_COLORS_RANGE.start(),
                NUM_COLORS_RANGE.end(),
                self.num_colors
            )));
        }
        if !DETAIL_LEVEL_RANGE.contains(&self.detail_level) {
            return Err(ConvertError::InvalidParameter(format!(
                "detail_level must be in {}..={}, got {}",
                DETAIL_LEVEL_RANGE.start(),
                DETAIL_LEVEL_RANGE.end(),
                self.detail_level
            )));
        }
        if !self.output_scale.is_finite() || self.output_scale <= 0.0 {
            return Err(ConvertError::InvalidParameter(format!(
                "output_scale must be a positive number, got {}",
                self.output_scale
            )));
        }
        Ok(())
    }

    /// Return a copy with the integer fields clamped into range.
    ///
    /// The output scale is left untouched since there is no sensible
    /// clamp for a non-positive factor; `validate` still rejects it.
    pub fn clamped(&self) -> Self {
        Self {
            num_colors: self
                .num_colors
                .clamp(*NUM_COLORS_RANGE.start(), *NUM_COLORS_RANGE.end()),
            detail_level: self
                .detail_level
                .clamp(*DETAIL_LEVEL_RANGE.start(), *DETAIL_LEVEL_RANGE.end()),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default() {
        let params = ConversionParams::new();
        assert_eq!(params.mode, ConversionMode::Color);
        assert_eq!(params.num_colors, 16);
        assert_eq!(params.detail_level, 5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_block_size_from_detail() {
        let params = ConversionParams::new();
        assert_eq!(params.with_detail_level(1).block_size(), 10);
        assert_eq!(params.with_detail_level(5).block_size(), 6);
        assert_eq!(params.with_detail_level(10).block_size(), 1);
        // Out of range values still give a usable block size
        assert_eq!(params.with_detail_level(42).block_size(), 1);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let params = ConversionParams::new();
        assert!(params.with_num_colors(1).validate().is_err());
        assert!(params.with_num_colors(65).validate().is_err());
        assert!(params.with_detail_level(0).validate().is_err());
        assert!(params.with_detail_level(11).validate().is_err());
        assert!(params.with_output_scale(0.0).validate().is_err());
        assert!(params.with_output_scale(-1.0).validate().is_err());
        assert!(params.with_output_scale(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_clamped() {
        let params = ConversionParams::new()
            .with_num_colors(500)
            .with_detail_level(0)
            .clamped();
        assert_eq!(params.num_colors, 64);
        assert_eq!(params.detail_level, 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("color".parse::<ConversionMode>().unwrap(), ConversionMode::Color);
        assert_eq!("BW".parse::<ConversionMode>().unwrap(), ConversionMode::BlackAndWhite);
        assert_eq!("grey".parse::<ConversionMode>().unwrap(), ConversionMode::Grayscale);
        assert!("sepia".parse::<ConversionMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [
            ConversionMode::Color,
            ConversionMode::BlackAndWhite,
            ConversionMode::Grayscale,
        ] {
            assert_eq!(mode.to_string().parse::<ConversionMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_only_bw_skips_quantization() {
        assert!(ConversionMode::Color.quantizes());
        assert!(ConversionMode::Grayscale.quantizes());
        assert!(!ConversionMode::BlackAndWhite.quantizes());
    }
}
