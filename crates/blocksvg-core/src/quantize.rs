//! Per-channel color posterization.
//!
//! The requested palette size is split evenly across the three channels by
//! taking its cube root, so `levels` discrete values remain per channel:
//!
//! ```text
//! levels = max(2, round(num_colors^(1/3)))
//! step   = max(1, 256 / levels)
//! c'     = min(255, (c / step) * step)
//! ```
//!
//! This is an approximation. The number of distinct colors in an output can
//! be larger or smaller than `num_colors`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
///
/// `Display` renders the SVG paint form `rgb(R,G,B)`. Two colors compare
/// equal exactly when their rendered strings are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// True when all three channels are equal.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Posterizer built once per conversion from the requested palette size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    levels: u32,
    step: u32,
}

impl Quantizer {
    pub fn new(num_colors: u32) -> Self {
        let levels = ((num_colors as f64).cbrt().round() as u32).max(2);
        let step = (256 / levels).max(1);
        Self { levels, step }
    }

    /// Discrete values kept per channel.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Width of one channel bucket.
    pub fn step(&self) -> u32 {
        self.step
    }

    #[inline]
    pub fn quantize_channel(&self, c: u8) -> u8 {
        ((c as u32 / self.step) * self.step).min(255) as u8
    }

    pub fn quantize(&self, color: Rgb) -> Rgb {
        Rgb::new(
            self.quantize_channel(color.r),
            self.quantize_channel(color.g),
            self.quantize_channel(color.b),
        )
    }
}
