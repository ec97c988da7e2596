//! ImageEdit WASM - WebAssembly bindings for the image edit kit
//!
//! This crate exposes the imageedit-core crop and export engine to
//! JavaScript/TypeScript pages.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (JPEG/PNG, EXIF orientation, resize)
//! - `encode` - PNG encoding for export
//! - `geometry` - Crop rectangle math, drag handles and overlay layout
//! - `transform` - Rotate, flip, crop and export fitting
//! - `session` - Stateful editor session driving a whole edit
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession } from '@imageedit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditorSession();
//! session.set_workspace_size(canvas.width, canvas.height);
//! session.load_bytes(file.name, new Uint8Array(await file.arrayBuffer()));
//! session.select_aspect_ratio('16:9');
//! const png = session.begin_confirm().render_png();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod geometry;
mod session;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, decode_image_raw, image_orientation, resize};
pub use encode::{encode_png, encode_png_from_image, png_mime};
pub use geometry::{
    aspect_ratio_labels, aspect_ratio_value, coerce_to_aspect_ratio, compute_render_transform,
    default_crop_rect, overlay_layout, resolve_drag_handle, update_crop_rect_by_drag,
};
pub use session::{export_png, JsEditorSession, JsExportJob};
pub use transform::{
    apply_export_settings, crop_to_rect, flip_horizontal, render_edited_image, rotate90,
};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "imageedit-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default editor configuration as JSON, a starting point for
/// [`JsEditorSession::with_config`].
#[wasm_bindgen]
pub fn default_config_json() -> Result<String, JsValue> {
    imageedit_core::EditorConfig::default()
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
