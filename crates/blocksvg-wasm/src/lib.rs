//! blocksvg WASM - WebAssembly bindings for blocksvg
//!
//! This crate exposes the blocksvg-core decoder and encoder to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (PNG, JPEG, BMP, GIF)
//! - `convert` - Raster to SVG conversion bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, convert_to_svg } from '@blocksvg/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const svg = convert_to_svg(image, 'color', 16, 5, 1.0);
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod decode;
mod types;

// Re-export public types
pub use convert::{convert_to_svg, convert_with_params, default_params};
pub use decode::{decode_image, image_info};
pub use types::JsDecodedImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
