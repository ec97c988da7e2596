//! Cropping a bitmap to a floating-point selection.
//!
//! Selections live in continuous bitmap space; the pixels live on an integer
//! grid. Each edge is rounded to the nearest pixel boundary and then clamped
//! so that the output is never empty and never reaches outside the source.

use crate::decode::{DecodedImage, CHANNELS};
use crate::geometry::CropRect;

/// Integer pixel region `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Round `rect` onto the pixel grid of a `width x height` image.
///
/// `left` lands in `[0, width - 1]`, `top` in `[0, height - 1]`, `right` in
/// `[left + 1, width]` and `bottom` in `[top + 1, height]`. Returns `None`
/// for an empty image or a rectangle with a non-finite edge.
pub fn snap_to_pixels(rect: &CropRect, width: u32, height: u32) -> Option<PixelRect> {
    if width == 0 || height == 0 {
        return None;
    }
    let edges = [rect.left, rect.top, rect.right, rect.bottom];
    if edges.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let (w, h) = (f64::from(width), f64::from(height));
    let left = rect.left.round().clamp(0.0, w - 1.0) as u32;
    let top = rect.top.round().clamp(0.0, h - 1.0) as u32;
    let right = rect.right.round().clamp(f64::from(left + 1), w) as u32;
    let bottom = rect.bottom.round().clamp(f64::from(top + 1), h) as u32;

    Some(PixelRect {
        left,
        top,
        right,
        bottom,
    })
}

/// Copy the pixels of `region` out of `image`.
///
/// `region` must come from [`snap_to_pixels`] for the same image size.
/// Returns `None` if the pixel buffer is shorter than the image claims.
pub(crate) fn extract(image: &DecodedImage, region: PixelRect) -> Option<DecodedImage> {
    if region.left == 0
        && region.top == 0
        && region.right == image.width
        && region.bottom == image.height
    {
        return Some(image.clone());
    }

    let out_width = region.width();
    let out_height = region.height();
    let src_stride = image.width as usize * CHANNELS;
    let row_bytes = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy row by row
    for y in region.top..region.bottom {
        let start = y as usize * src_stride + region.left as usize * CHANNELS;
        output.extend_from_slice(image.pixels.get(start..start + row_bytes)?);
    }

    Some(DecodedImage::new(out_width, out_height, output))
}

/// Crop `image` to `rect` (bitmap pixels).
///
/// Returns `None` when the image is empty or the rectangle is not finite.
/// Out-of-range edges are clamped rather than rejected, so any finite
/// rectangle yields at least a 1x1 result, even one lying wholly outside
/// the image.
pub fn crop_to_rect(image: &DecodedImage, rect: &CropRect) -> Option<DecodedImage> {
    if image.is_empty() {
        return None;
    }
    let region = snap_to_pixels(rect, image.width, image.height)?;
    extract(image, region)
}
