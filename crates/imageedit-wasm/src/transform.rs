//! WASM bindings for the bitmap transforms used by preview and export.
//!
//! Crop rectangles are given in bitmap pixels as four edges, the same space
//! the crop overlay works in.

use crate::types::{filter_from_u8, horizontal_from_u8, vertical_from_u8, JsImage};
use imageedit_core::decode::DecodedImage;
use imageedit_core::geometry::CropRect;
use imageedit_core::transform::{
    apply_export_settings as core_fit, crop_to_rect as core_crop,
    flip_horizontal as core_flip, render_edited_image as core_render, rotate90 as core_rotate,
    ExportSettings,
};
use wasm_bindgen::prelude::*;

fn decoded(image: &JsImage) -> Result<DecodedImage, JsValue> {
    image
        .to_decoded()
        .ok_or_else(|| JsValue::from_str("Pixel buffer does not match image size"))
}

/// Build export settings from JavaScript arguments; `undefined` or zero
/// dimensions keep the crop size.
pub(crate) fn export_settings(
    width: Option<u32>,
    height: Option<u32>,
    horizontal: u8,
    vertical: u8,
) -> ExportSettings {
    ExportSettings {
        width_px: width.filter(|v| *v > 0),
        height_px: height.filter(|v| *v > 0),
        horizontal: horizontal_from_u8(horizontal),
        vertical: vertical_from_u8(vertical),
    }
}

/// Rotate a quarter turn clockwise.
#[wasm_bindgen]
pub fn rotate90(image: &JsImage) -> Result<JsImage, JsValue> {
    Ok(JsImage::from_decoded(core_rotate(&decoded(image)?)))
}

/// Mirror left to right.
#[wasm_bindgen]
pub fn flip_horizontal(image: &JsImage) -> Result<JsImage, JsValue> {
    Ok(JsImage::from_decoded(core_flip(&decoded(image)?)))
}

/// Cut a rectangle out of an image.
///
/// Edges are rounded to whole pixels and clamped to the image, so any
/// finite rectangle yields at least one pixel.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = crop_to_rect(source, 100, 50, 740, 410);
/// ```
#[wasm_bindgen]
pub fn crop_to_rect(
    image: &JsImage,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
) -> Result<JsImage, JsValue> {
    let rect = CropRect::new(left, top, right, bottom);
    core_crop(&decoded(image)?, &rect)
        .map(JsImage::from_decoded)
        .ok_or_else(|| JsValue::from_str("Crop rectangle is not finite"))
}

/// Fit an already cropped image to an export size.
///
/// The source is centre-cropped (or aligned per `horizontal` / `vertical`,
/// 0 = start, 1 = centre, 2 = end) to the target ratio and then scaled.
#[wasm_bindgen]
pub fn apply_export_settings(
    image: &JsImage,
    width: Option<u32>,
    height: Option<u32>,
    horizontal: u8,
    vertical: u8,
    filter: u8,
) -> Result<JsImage, JsValue> {
    let settings = export_settings(width, height, horizontal, vertical);
    core_fit(decoded(image)?, &settings, filter_from_u8(filter))
        .map(JsImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop and fit in one step, as the export pipeline does.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn render_edited_image(
    image: &JsImage,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    width: Option<u32>,
    height: Option<u32>,
    filter: u8,
) -> Result<JsImage, JsValue> {
    let rect = CropRect::new(left, top, right, bottom);
    let settings = export_settings(width, height, 1, 1);
    core_render(&decoded(image)?, &rect, &settings, filter_from_u8(filter))
        .map(JsImage::from_decoded)
        .ok_or_else(|| JsValue::from_str("Nothing to export"))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_malformed_image_is_rejected() {
        let img = JsImage::new(10, 10, vec![0u8; 10]);
        assert!(rotate90(&img).is_err());
        assert!(crop_to_rect(&img, 0.0, 0.0, 5.0, 5.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_non_finite_crop_is_rejected() {
        let img = JsImage::new(10, 10, vec![0u8; 400]);
        assert!(crop_to_rect(&img, f64::NAN, 0.0, 5.0, 5.0).is_err());
        let degenerate = crop_to_rect(&img, 5.0, 5.0, 5.0, 5.0).unwrap();
        assert_eq!((degenerate.width(), degenerate.height()), (1, 1));
    }
}
