//! Image encoding WASM bindings.
//!
//! Exports are always lossless PNG, so this is the only encoder exposed.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png_from_image } from '@imageedit/wasm';
//!
//! const png = encode_png_from_image(rendered);
//! const writable = await fileHandle.createWritable();
//! await writable.write(new Blob([png], { type: PNG_MIME }));
//! await writable.close();
//! ```

use crate::types::JsImage;
use imageedit_core::decode::DecodedImage;
use imageedit_core::encode;
use wasm_bindgen::prelude::*;

/// MIME type of the bytes produced by this module.
#[wasm_bindgen]
pub fn png_mime() -> String {
    encode::PNG_MIME.to_string()
}

/// Encode RGBA pixel data to PNG bytes.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    let image = DecodedImage {
        width,
        height,
        pixels: pixels.to_vec(),
    };
    encode::encode_png(&image).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsImage to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    encode_png(&image.pixels(), image.width(), image.height())
}


/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 20 * 20 * 4];
        let png = encode_png(&pixels, 20, 20).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_dimensions() {
        assert!(encode_png(&[0u8; 16], 0, 4).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_wrong_buffer_length() {
        // RGB-sized buffer for an RGBA image.
        let pixels = vec![128u8; 20 * 20 * 3];
        assert!(encode_png(&pixels, 20, 20).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_from_image() {
        let img = JsImage::new(8, 4, vec![255u8; 8 * 4 * 4]);
        let png = encode_png_from_image(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
