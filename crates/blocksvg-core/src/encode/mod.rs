//! SVG output for the encoder.
//!
//! This module provides functionality for:
//! - Rendering merged color groups as an SVG document
//! - Writing the document to a `.svg` file
//!
//! # Examples
//!
//! ```ignore
//! use blocksvg_core::encode::{write_svg, default_output_path};
//!
//! let svg = blocksvg_core::convert_with_params(&image, &params).unwrap();
//! write_svg(default_output_path("photo.png"), &svg).unwrap();
//! ```

mod file;
mod svg;

pub use file::{default_output_path, write_svg, WriteError, FALLBACK_FILE_NAME};
pub use svg::{SvgDocument, SvgOptions};
