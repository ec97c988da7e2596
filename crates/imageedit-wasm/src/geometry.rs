//! Crop geometry bindings.
//!
//! Rectangles, transforms and overlay layouts cross the boundary as plain
//! JavaScript objects via `serde_wasm_bindgen`:
//!
//! ```typescript
//! const transform = compute_render_transform(canvas.width, canvas.height, img.width, img.height);
//! const crop = default_crop_rect(img.width, img.height, aspect_ratio_value("16:9"));
//! // crop = { left, top, right, bottom } in bitmap pixels
//! ```
//!
//! Drag handles are strings: `"None"`, `"Move"`, `"Left"`, `"TopRight"`, ...

use imageedit_core::geometry::{
    self as core_geometry, AspectRatioOption, CropRect, DragHandle, OverlayLayout,
    RenderTransform,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn rect_from_js(value: JsValue) -> Result<CropRect, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop rectangle: {}", e)))
}

fn handle_from_js(value: JsValue) -> Result<DragHandle, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid drag handle: {}", e)))
}

/// Width-over-height of a preset label such as `"16:9"`.
///
/// `undefined` for the free preset `"a:b"` and for unknown labels.
#[wasm_bindgen]
pub fn aspect_ratio_value(label: &str) -> Option<f64> {
    AspectRatioOption::from_label(label).and_then(AspectRatioOption::ratio)
}

/// Labels of every preset in display order.
#[wasm_bindgen]
pub fn aspect_ratio_labels() -> Vec<String> {
    AspectRatioOption::ALL
        .iter()
        .map(|o| o.label().to_string())
        .collect()
}

/// Letterbox transform of an image in a workspace, `null` while either has
/// no area.
#[wasm_bindgen]
pub fn compute_render_transform(
    workspace_width: f64,
    workspace_height: f64,
    image_width: f64,
    image_height: f64,
) -> Result<JsValue, JsValue> {
    match core_geometry::compute_render_transform(
        workspace_width,
        workspace_height,
        image_width,
        image_height,
    ) {
        Some(transform) => to_js(&transform),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen]
pub fn default_crop_rect(
    image_width: f64,
    image_height: f64,
    ratio: Option<f64>,
) -> Result<JsValue, JsValue> {
    to_js(&core_geometry::default_crop_rect(image_width, image_height, ratio))
}

#[wasm_bindgen]
pub fn coerce_to_aspect_ratio(
    current: JsValue,
    ratio: f64,
    image_width: f64,
    image_height: f64,
    min_size: f64,
) -> Result<JsValue, JsValue> {
    let current = rect_from_js(current)?;
    to_js(&core_geometry::coerce_to_aspect_ratio(
        &current,
        ratio,
        image_width,
        image_height,
        min_size,
    ))
}

/// Which handle a pointer-down grabs. `crop_on_screen` is in screen pixels.
#[wasm_bindgen]
pub fn resolve_drag_handle(
    x: f64,
    y: f64,
    crop_on_screen: JsValue,
    touch_radius: f64,
) -> Result<JsValue, JsValue> {
    let crop = rect_from_js(crop_on_screen)?;
    to_js(&core_geometry::resolve_drag_handle(x, y, &crop, touch_radius))
}

/// Apply one drag step given in bitmap pixels.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn update_crop_rect_by_drag(
    current: JsValue,
    handle: JsValue,
    dx: f64,
    dy: f64,
    image_width: f64,
    image_height: f64,
    min_size: f64,
    ratio: Option<f64>,
) -> Result<JsValue, JsValue> {
    let current = rect_from_js(current)?;
    let handle = handle_from_js(handle)?;
    to_js(&core_geometry::update_crop_rect_by_drag(
        &current,
        handle,
        dx,
        dy,
        image_width,
        image_height,
        min_size,
        ratio,
    ))
}

/// Everything the overlay draws: mask bands, grid lines and handle dots.
#[wasm_bindgen]
pub fn overlay_layout(transform: JsValue, crop: JsValue) -> Result<JsValue, JsValue> {
    let transform: RenderTransform = serde_wasm_bindgen::from_value(transform)
        .map_err(|e| JsValue::from_str(&format!("Invalid render transform: {}", e)))?;
    let crop = rect_from_js(crop)?;
    to_js(&OverlayLayout::compute(&transform, &crop))
}
