//! Container decoding (PNG, JPEG, BMP, GIF).
//!
//! Pixels are taken in stored order. EXIF orientation tags are ignored, so
//! the SVG canvas always has the stored width and height.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};
use tracing::debug;

use super::{DecodeError, DecodedImage, ImageInfo};

/// Decode an image from encoded bytes.
///
/// The container format is guessed from the leading bytes. Alpha is dropped
/// and the result is always RGB8. For animated GIFs only the first frame is
/// decoded.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known container.
/// Returns `DecodeError::CorruptedFile` if the container is corrupted or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = guessed_reader(bytes)?;
    let format = reader.format();

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = img.into_rgb8();
    debug!(
        format = ?format,
        width = rgb_img.width(),
        height = rgb_img.height(),
        "decoded image"
    );
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Read and decode an image file from disk.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DecodeError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    decode_image(&bytes)
}

/// Read the display information of an encoded image without decoding pixels.
pub fn image_info(bytes: &[u8]) -> Result<ImageInfo, DecodeError> {
    let reader = guessed_reader(bytes)?;
    let format = reader
        .format()
        .map(format_name)
        .unwrap_or("unknown")
        .to_string();

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(ImageInfo {
        width,
        height,
        byte_size: bytes.len(),
        format,
    })
}

fn guessed_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Gif => "gif",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    fn two_pixel_rgb() -> DynamicImage {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        DynamicImage::ImageRgb8(rgb)
    }

    #[test]
    fn test_decode_png() {
        let bytes = encode(two_pixel_rgb(), ImageFormat::Png);
        let img = decode_image(&bytes).unwrap();

        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixel(0, 0), [255, 0, 0]);
        assert_eq!(img.pixel(1, 0), [0, 255, 0]);
    }

    #[test]
    fn test_decode_bmp() {
        let bytes = encode(two_pixel_rgb(), ImageFormat::Bmp);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.pixels, vec![255, 0, 0, 0, 255, 0]);
    }

    #[test]
    fn test_decode_drops_alpha() {
        let rgba = image::RgbaImage::from_raw(1, 1, vec![10, 20, 30, 0]).unwrap();
        let bytes = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.pixels, vec![10, 20, 30]);
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode(two_pixel_rgb(), ImageFormat::Png);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_load_image_missing_file() {
        let result = load_image("/nonexistent/dir/picture.png");
        match result {
            Err(DecodeError::Io { path, .. }) => assert!(path.ends_with("picture.png")),
            other => panic!("Expected Io error, got: {:?}", other),
        }
    }

    #[test]
    fn test_image_info() {
        let bytes = encode(two_pixel_rgb(), ImageFormat::Png);
        let info = image_info(&bytes).unwrap();

        assert_eq!(info.width, 2);
        assert_eq!(info.height, 1);
        assert_eq!(info.byte_size, bytes.len());
        assert_eq!(info.format, "png");
    }

    /// Splice an EXIF APP1 segment with the given orientation tag right
    /// after the JPEG SOI marker.
    fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"MM\x00\x2a\x00\x00\x00\x08");
        tiff.extend_from_slice(&1u16.to_be_bytes()); // one IFD entry
        tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes()); // no next IFD

        let mut payload = b"Exif\x00\x00".to_vec();
        payload.extend_from_slice(&tiff);

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        out.extend_from_slice(&payload);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_exif_orientation_is_ignored() {
        let wide = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            40,
            20,
            image::Rgb([120, 60, 30]),
        ));
        let bytes = with_exif_orientation(&encode(wide, ImageFormat::Jpeg), 6);

        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (40, 20));

        let info = image_info(&bytes).unwrap();
        assert_eq!((info.width, info.height), (40, 20));
        assert_eq!(info.format, "jpeg");
    }
}
