//! Block averaging.
//!
//! The image is tiled by square blocks of `block_size` pixels, starting at
//! the origin. Blocks on the right and bottom edges are clipped to the image
//! bounds, so the tiles cover `[0, W) x [0, H)` exactly once.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::quantize::Rgb;

/// An axis-aligned rectangle in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// One sampled tile and its average color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub rect: Rect,
    pub color: Rgb,
}

/// Average every block of the image, in row-major order.
///
/// Each channel mean uses floor division (`sum / count`). An empty image
/// or a zero block size yields no blocks.
pub fn average_blocks(image: &DecodedImage, block_size: u32) -> Vec<Block> {
    if image.is_empty() || block_size == 0 {
        return Vec::new();
    }

    let cols = image.width.div_ceil(block_size);
    let rows = image.height.div_ceil(block_size);
    let mut blocks = Vec::with_capacity((cols as usize) * (rows as usize));

    for y in (0..image.height).step_by(block_size as usize) {
        let h = block_size.min(image.height - y);
        for x in (0..image.width).step_by(block_size as usize) {
            let w = block_size.min(image.width - x);
            let rect = Rect::new(x, y, w, h);
            blocks.push(Block {
                rect,
                color: block_mean(image, &rect),
            });
        }
    }

    blocks
}

fn block_mean(image: &DecodedImage, rect: &Rect) -> Rgb {
    let stride = image.width as usize * 3;
    let mut sums = [0u64; 3];

    for row in rect.y..rect.bottom() {
        let start = row as usize * stride + rect.x as usize * 3;
        let end = start + rect.width as usize * 3;
        for px in image.pixels[start..end].chunks_exact(3) {
            sums[0] += px[0] as u64;
            sums[1] += px[1] as u64;
            sums[2] += px[2] as u64;
        }
    }

    let count = rect.area();
    Rgb::new(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: blocks tile the image exactly, with no gap or overlap.
        #[test]
        fn prop_blocks_tile_image(
            width in 1u32..=40,
            height in 1u32..=40,
            block_size in 1u32..=10,
        ) {
            let img = DecodedImage::filled(width, height, [1, 2, 3]);
            let blocks = average_blocks(&img, block_size);

            let mut coverage = vec![0u8; (width * height) as usize];
            for block in &blocks {
                let r = block.rect;
                prop_assert!(r.width >= 1 && r.height >= 1);
                prop_assert!(r.right() <= width && r.bottom() <= height);
                for y in r.y..r.bottom() {
                    for x in r.x..r.right() {
                        coverage[(y * width + x) as usize] += 1;
                    }
                }
            }
            prop_assert!(coverage.iter().all(|&c| c == 1));

            let expected = width.div_ceil(block_size) * height.div_ceil(block_size);
            prop_assert_eq!(blocks.len() as u32, expected);
        }
    }
}
