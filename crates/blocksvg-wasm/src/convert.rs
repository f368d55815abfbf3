//! Conversion WASM bindings.
//!
//! Conversion is synchronous. Call it from a Web Worker so the page stays
//! responsive on large images.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, convert_to_svg, convert_with_params } from '@blocksvg/wasm';
//!
//! const image = decode_image(bytes);
//! const svg = convert_to_svg(image, 'color', 16, 5, 1.0);
//!
//! // or with a parameter object (missing fields take defaults)
//! const svg2 = convert_with_params(image, { mode: 'bw', detailLevel: 8 });
//! ```

use crate::types::{parse_mode, JsDecodedImage};
use blocksvg_core::ConversionParams;
use wasm_bindgen::prelude::*;

/// Convert an image to SVG text.
///
/// # Arguments
///
/// * `image` - Decoded source image
/// * `mode` - `"color"`, `"bw"` or `"grayscale"`
/// * `num_colors` - Target palette size (2-64)
/// * `detail_level` - Detail level (1-10), higher means smaller blocks
/// * `output_scale` - Resample factor applied before sampling
#[wasm_bindgen]
pub fn convert_to_svg(
    image: &JsDecodedImage,
    mode: &str,
    num_colors: u32,
    detail_level: u32,
    output_scale: f64,
) -> Result<String, JsValue> {
    let params = build_params(mode, num_colors, detail_level, output_scale)
        .map_err(|e| JsValue::from_str(&e))?;
    run(image, &params)
}

/// Convert an image using a parameter object.
///
/// The object uses camelCase keys: `mode`, `numColors`, `detailLevel`,
/// `outputScale`. Missing keys take their defaults.
#[wasm_bindgen]
pub fn convert_with_params(image: &JsDecodedImage, params: JsValue) -> Result<String, JsValue> {
    let params: ConversionParams = serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid conversion parameters: {}", e)))?;
    run(image, &params)
}

/// Default parameters as a plain object, for initializing UI controls.
#[wasm_bindgen]
pub fn default_params() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&ConversionParams::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn build_params(
    mode: &str,
    num_colors: u32,
    detail_level: u32,
    output_scale: f64,
) -> Result<ConversionParams, String> {
    Ok(ConversionParams::new()
        .with_mode(parse_mode(mode)?)
        .with_num_colors(num_colors)
        .with_detail_level(detail_level)
        .with_output_scale(output_scale))
}

fn run(image: &JsDecodedImage, params: &ConversionParams) -> Result<String, JsValue> {
    blocksvg_core::convert_with_params(&image.to_decoded(), params)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocksvg_core::ConversionMode;

    #[test]
    fn test_build_params() {
        let params = build_params("grayscale", 27, 3, 0.5).unwrap();
        assert_eq!(params.mode, ConversionMode::Grayscale);
        assert_eq!(params.num_colors, 27);
        assert_eq!(params.detail_level, 3);
        assert_eq!(params.output_scale, 0.5);
    }

    #[test]
    fn test_build_params_bad_mode() {
        assert!(build_params("neon", 16, 5, 1.0).is_err());
    }

    #[test]
    fn test_core_conversion_of_wrapped_image() {
        // JsValue results only work on wasm32, so exercise the core path directly
        let img = JsDecodedImage::new(4, 4, vec![200u8; 4 * 4 * 3]);
        let params = build_params("color", 64, 1, 1.0).unwrap();
        let svg = blocksvg_core::convert_with_params(&img.to_decoded(), &params).unwrap();
        assert!(svg.contains(r#"<rect x="0" y="0" width="4" height="4"/>"#));
    }
}
