//! WASM-compatible wrapper types for image data.

use imageedit_core::decode::{DecodedImage, FilterType, CHANNELS};
use imageedit_core::transform::{HorizontalAlignment, VerticalAlignment};
use wasm_bindgen::prelude::*;

/// An RGBA image that can be passed between JavaScript and Rust.
///
/// Pixels are stored row-major, four bytes per pixel, which is the layout
/// of `ImageData.data` so a canvas can take them without conversion.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a new JsImage from dimensions and RGBA pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the buffer length matches `width * height * 4`.
    pub fn is_well_formed(&self) -> bool {
        self.pixels.len() == self.width as usize * self.height as usize * CHANNELS
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Copy of the pixel data, suitable for `new ImageData(...)`.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly release memory.
    pub fn free(self) {
        drop(self);
    }
}

impl JsImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Copy into a core image, `None` if the buffer does not match the size.
    pub(crate) fn to_decoded(&self) -> Option<DecodedImage> {
        self.is_well_formed()
            .then(|| DecodedImage::new(self.width, self.height, self.pixels.clone()))
    }
}

/// Map a filter index from JavaScript: 0 = Nearest, 2 = Lanczos3,
/// anything else Bilinear.
pub(crate) fn filter_from_u8(filter: u8) -> FilterType {
    match filter {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// 0 = Start, 2 = End, anything else Center.
pub(crate) fn horizontal_from_u8(value: u8) -> HorizontalAlignment {
    match value {
        0 => HorizontalAlignment::Start,
        2 => HorizontalAlignment::End,
        _ => HorizontalAlignment::Center,
    }
}

/// 0 = Top, 2 = Bottom, anything else Center.
pub(crate) fn vertical_from_u8(value: u8) -> VerticalAlignment {
    match value {
        0 => VerticalAlignment::Top,
        2 => VerticalAlignment::Bottom,
        _ => VerticalAlignment::Center,
    }
}
