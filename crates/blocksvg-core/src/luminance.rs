//! Luma calculation using ITU-R BT.601 weights.
//!
//! The grayscale and black/white modes reduce every pixel to a single luma
//! value before block averaging. The integer form matches the `L` conversion
//! of common imaging libraries, so outputs stay comparable across tools.

/// BT.601 red weight scaled by 2^16.
pub const LUMA_R: u32 = 19595;

/// BT.601 green weight scaled by 2^16.
pub const LUMA_G: u32 = 38470;

/// BT.601 blue weight scaled by 2^16.
pub const LUMA_B: u32 = 7471;

/// Threshold above which a luma value becomes white in black/white mode.
pub const BW_THRESHOLD: u8 = 128;

/// Calculate BT.601 luma from u8 RGB values.
///
/// `L = (19595 R + 38470 G + 7471 B + 32768) >> 16`
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + (1 << 15);
    (sum >> 16) as u8
}

/// Map a luma value to pure black or white.
///
/// Values strictly above [`BW_THRESHOLD`] become 255, everything else 0.
#[inline]
pub fn threshold(luma: u8) -> u8 {
    if luma > BW_THRESHOLD {
        255
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_unity() {
        assert_eq!(LUMA_R + LUMA_G + LUMA_B, 1 << 16);
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma_u8(255, 255, 255), 255);
        assert_eq!(luma_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luma_gray_preserves_value() {
        for v in 0..=255u8 {
            assert_eq!(luma_u8(v, v, v), v, "gray {} should map to itself", v);
        }
    }

    #[test]
    fn test_luma_primaries() {
        // 0.299 * 255 ≈ 76.2, 0.587 * 255 ≈ 149.7, 0.114 * 255 ≈ 29.1
        assert_eq!(luma_u8(255, 0, 0), 76);
        assert_eq!(luma_u8(0, 255, 0), 150);
        assert_eq!(luma_u8(0, 0, 255), 29);
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(threshold(0), 0);
        assert_eq!(threshold(128), 0);
        assert_eq!(threshold(129), 255);
        assert_eq!(threshold(255), 255);
    }
}
