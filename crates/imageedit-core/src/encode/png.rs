//! PNG encoding for export.
//!
//! Every export destination writes lossless PNG at the best compression
//! level. There is no format negotiation.

use std::io::{Cursor, Write};

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::{DecodedImage, CHANNELS};

/// MIME type of every exported file.
pub const PNG_MIME: &str = "image/png";

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed, including failures of the underlying writer
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image to PNG bytes.
pub fn encode_png(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());
    write_png(image, &mut buffer)?;
    Ok(buffer.into_inner())
}

/// Stream-encode an image as PNG into `writer`.
///
/// The writer is flushed on success. On failure the writer may hold a
/// partial file; callers that must not leave partial output behind clean up
/// themselves.
pub fn write_png<W: Write>(image: &DecodedImage, mut writer: W) -> Result<(), EncodeError> {
    validate(image)?;

    let encoder = PngEncoder::new_with_quality(
        &mut writer,
        CompressionType::Best,
        PngFilter::Adaptive,
    );
    encoder
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    writer
        .flush()
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
}

fn validate(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.width as usize * image.height as usize * CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encode_png_basic() {
        let img = DecodedImage::filled(100, 100, [128, 128, 128, 255]);
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let mut pixels = Vec::new();
        for i in 0..(13 * 7) {
            pixels.extend_from_slice(&[(i * 3) as u8, (i * 5) as u8, (i * 7) as u8, (i * 11) as u8]);
        }
        let img = DecodedImage::new(13, 7, pixels);

        let bytes = encode_png(&img).unwrap();
        let decoded = crate::decode::decode_image(&bytes).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_encode_png_invalid_pixel_data() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0; 10 * 9 * CHANNELS],
        };
        assert!(matches!(
            encode_png(&img),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_png_zero_dimensions() {
        let img = DecodedImage {
            width: 0,
            height: 10,
            pixels: vec![],
        };
        assert!(matches!(
            encode_png(&img),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_write_png_propagates_writer_failure() {
        let img = DecodedImage::filled(4, 4, [1, 2, 3, 4]);
        let result = write_png(&img, FailingWriter);
        assert!(matches!(result, Err(EncodeError::EncodingFailed(_))));
    }

    #[test]
    fn test_encode_png_single_pixel() {
        let img = DecodedImage::filled(1, 1, [255, 0, 0, 255]);
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[0..8], &PNG_SIGNATURE);
    }
}
