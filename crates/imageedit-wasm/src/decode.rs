//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG or PNG bytes, honouring EXIF orientation
//! - [`decode_image_raw`] - Decode without applying orientation
//! - [`image_orientation`] - Read the EXIF orientation tag
//! - [`resize`] - Resize an image to exact dimensions
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@imageedit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::{filter_from_u8, JsImage};
use imageedit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes and rotate it upright.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported or intact image.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an image from bytes, leaving pixels as stored.
#[wasm_bindgen]
pub fn decode_image_raw(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_image_no_orientation(bytes)
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation tag value (1-8); 1 when absent or unreadable.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn resize(image: &JsImage, width: u32, height: u32, filter: u8) -> Result<JsImage, JsValue> {
    let src = image
        .to_decoded()
        .ok_or_else(|| JsValue::from_str("Pixel buffer does not match image size"))?;
    decode::resize(&src, width, height, filter_from_u8(filter))
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use imageedit_core::decode::DecodedImage;
    use imageedit_core::encode::encode_png;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_png() {
        let png = encode_png(&DecodedImage::filled(12, 8, [10, 20, 30, 255])).unwrap();
        let image = decode_image(&png).unwrap();
        assert_eq!(image.width(), 12);
        assert_eq!(image.height(), 8);
        assert_eq!(image.byte_length(), 12 * 8 * 4);
    }

    #[wasm_bindgen_test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(&[1, 2, 3, 4]).is_err());
        assert!(decode_image_raw(&[]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize() {
        let image = JsImage::new(10, 10, vec![200u8; 400]);
        let resized = resize(&image, 4, 6, 1).unwrap();
        assert_eq!((resized.width(), resized.height()), (4, 6));
        assert!(resize(&image, 0, 6, 1).is_err());
    }
}
