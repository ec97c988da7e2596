//! Lossless quarter-turn rotation and mirroring.

use crate::decode::DecodedImage;
use image::{imageops, ImageBuffer, Rgba};

/// Borrowed RGBA view of a working image, `None` if the buffer is short.
fn view(image: &DecodedImage) -> Option<ImageBuffer<Rgba<u8>, &[u8]>> {
    ImageBuffer::from_raw(image.width, image.height, image.pixels.as_slice())
}

/// Rotate 90 degrees clockwise. Width and height swap.
///
/// A malformed buffer is returned as is.
pub fn rotate90(image: &DecodedImage) -> DecodedImage {
    match view(image) {
        Some(src) => DecodedImage::from_rgba_image(imageops::rotate90(&src)),
        None => image.clone(),
    }
}

/// Mirror left to right.
pub fn flip_horizontal(image: &DecodedImage) -> DecodedImage {
    match view(image) {
        Some(src) => DecodedImage::from_rgba_image(imageops::flip_horizontal(&src)),
        None => image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::CHANNELS;

    fn coords(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let rotated = rotate90(&coords(8, 6));
        assert_eq!((rotated.width, rotated.height), (6, 8));
        assert_eq!(rotated.pixels.len(), 6 * 8 * CHANNELS);
    }

    #[test]
    fn test_rotate_is_clockwise() {
        let src = coords(3, 2);
        let rotated = rotate90(&src);
        // Bottom-left goes to top-left, top-left goes to top-right.
        assert_eq!(rotated.pixel(0, 0), Some([0, 1, 7, 255]));
        assert_eq!(rotated.pixel(1, 0), Some([0, 0, 7, 255]));
        assert_eq!(rotated.pixel(1, 2), Some([2, 0, 7, 255]));
    }

    #[test]
    fn test_four_rotations_restore_image() {
        let src = coords(5, 3);
        let back = rotate90(&rotate90(&rotate90(&rotate90(&src))));
        assert_eq!(back, src);
    }

    #[test]
    fn test_flip_mirrors_rows() {
        let src = coords(4, 2);
        let flipped = flip_horizontal(&src);
        assert_eq!((flipped.width, flipped.height), (4, 2));
        assert_eq!(flipped.pixel(0, 0), Some([3, 0, 7, 255]));
        assert_eq!(flipped.pixel(3, 1), Some([0, 1, 7, 255]));
        assert_eq!(flip_horizontal(&flipped), src);
    }

    #[test]
    fn test_empty_image() {
        let empty = DecodedImage::new(0, 0, Vec::new());
        assert!(rotate90(&empty).is_empty());
        assert!(flip_horizontal(&empty).is_empty());
    }

    #[test]
    fn test_short_buffer_is_left_alone() {
        let short = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![1; 10],
        };
        assert_eq!(rotate90(&short), short);
        assert_eq!(flip_horizontal(&short), short);
    }
}
