//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG/JPEG/BMP/GIF bytes to RGB
//! - [`image_info`] - Read dimensions and size without decoding pixels
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, image_info } from '@blocksvg/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const info = image_info(bytes); // { width, height, byteSize, format }
//! const image = decode_image(bytes);
//! ```

use crate::types::JsDecodedImage;
use blocksvg_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from encoded bytes.
///
/// Pixels keep their stored order (EXIF orientation is ignored) and alpha is dropped.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported container or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read display information for an encoded image.
///
/// Returns an object `{ width, height, byteSize, format }`.
#[wasm_bindgen]
pub fn image_info(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info = decode::image_info(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0x00, 0x01, 0x02, 0x03]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        assert!(decode_image(&[]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_image_info_invalid() {
        assert!(image_info(&[0xFF]).is_err());
    }
}
