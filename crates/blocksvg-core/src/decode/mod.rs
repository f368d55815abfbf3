//! Image loading for the encoder.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, BMP and GIF containers to RGB8
//! - Reading display information (dimensions, file size) without decoding
//! - Resampling an image by an output scale factor
//!
//! # Examples
//!
//! ```ignore
//! use blocksvg_core::decode::load_image;
//!
//! let image = load_image("photo.png").unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod container;
mod resize;
mod types;

pub use container::{decode_image, image_info, load_image};
pub(crate) use resize::exceeds_limit;
pub use resize::{scale_dimensions, scale_image, MAX_SCALED_PIXELS};
pub use types::{DecodeError, DecodedImage, ImageInfo};
