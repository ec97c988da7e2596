//! Editor session bindings.
//!
//! [`JsEditorSession`] owns the working image, the crop selection and the
//! export bookkeeping. The page forwards pointer events and button presses
//! and draws from [`JsEditorSession::overlay`]. Exports are split in two:
//! `begin_*` snapshots a [`JsExportJob`] that renders PNG bytes, the page
//! stores those wherever it likes, then reports back through one of the
//! `finish_export_*` methods to get the message to show.
//!
//! ```typescript
//! const session = new JsEditorSession();
//! session.set_workspace_size(canvas.width, canvas.height);
//! session.load_bytes(file.name, new Uint8Array(await file.arrayBuffer()));
//!
//! const job = session.begin_save_to_gallery();
//! try {
//!   await saveBlob(new Blob([job.render_png()], { type: 'image/png' }));
//!   toast(session.finish_export_ok(job));
//! } catch (e) {
//!   toast(session.finish_export_failed(job, String(e)));
//! }
//! ```

use crate::types::{horizontal_from_u8, vertical_from_u8, JsImage};
use imageedit_core::decode::decode_image;
use imageedit_core::encode::encode_png;
use imageedit_core::export::{ExportError, Locator};
use imageedit_core::geometry::AspectRatioOption;
use imageedit_core::session::{ExportDestination, ExportJob, ExportKind};
use imageedit_core::{EditorConfig, EditorSession, SessionError};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn session_error(e: SessionError) -> JsValue {
    JsValue::from_str(e.notice().message())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Initial text of the custom export dialog fields.
#[derive(Debug, Serialize)]
struct DialogFields {
    width: String,
    height: String,
}

#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditorSession {
        JsEditorSession {
            inner: EditorSession::new(EditorConfig::default()),
        }
    }

    /// Session configured from a JSON document; missing keys keep their
    /// defaults.
    pub fn with_config(json: &str) -> Result<JsEditorSession, JsValue> {
        let config =
            EditorConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsEditorSession {
            inner: EditorSession::new(config),
        })
    }

    pub fn set_workspace_size(&mut self, width: f64, height: f64) {
        self.inner.set_workspace_size(width, height);
    }

    /// Decode `bytes` and make them the working image.
    ///
    /// `name` identifies the source and is only used for logging. On
    /// failure the previous image and selection stay in place and the error
    /// carries the message to show.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.load(name, bytes).map_err(session_error)
    }

    pub fn clear_image(&mut self) {
        self.inner.clear_image();
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.image().is_some()
    }

    /// Copy of the working image for drawing, `undefined` when empty.
    pub fn image(&self) -> Option<JsImage> {
        self.inner.image().cloned().map(JsImage::from_decoded)
    }

    /// Whether a progress indicator should be shown.
    #[wasm_bindgen(getter)]
    pub fn shows_progress(&self) -> bool {
        self.inner.shows_progress()
    }

    /// Selection in bitmap pixels, `null` when there is no image.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        match self.inner.crop_rect() {
            Some(rect) => to_js(&rect),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn render_transform(&self) -> Result<JsValue, JsValue> {
        match self.inner.render_transform() {
            Some(transform) => to_js(&transform),
            None => Ok(JsValue::NULL),
        }
    }

    /// Overlay layout for the current frame, `null` until both an image
    /// and a workspace size are known.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        match self.inner.overlay() {
            Some(layout) => to_js(&layout),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn rotate(&mut self) -> Result<(), JsValue> {
        self.inner.rotate().map_err(session_error)
    }

    pub fn flip_horizontal(&mut self) -> Result<(), JsValue> {
        self.inner.flip_horizontal().map_err(session_error)
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> String {
        self.inner.aspect_ratio().label().to_string()
    }

    /// Select a preset by label. Returns false for an unknown label.
    pub fn select_aspect_ratio(&mut self, label: &str) -> bool {
        match AspectRatioOption::from_label(label) {
            Some(option) => {
                self.inner.select_aspect_ratio(option);
                true
            }
            None => false,
        }
    }

    /// Pointer down in workspace pixels. Returns the grabbed handle name.
    pub fn drag_start(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        to_js(&self.inner.drag_start(x, y))
    }

    /// Pointer move by a screen-pixel delta. Returns the new selection or
    /// `null` when no drag is active.
    pub fn drag_move(&mut self, dx: f64, dy: f64) -> Result<JsValue, JsValue> {
        match self.inner.drag_move(dx, dy) {
            Some(rect) => to_js(&rect),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn drag_end(&mut self) {
        self.inner.drag_end();
    }

    pub fn drag_cancel(&mut self) {
        self.inner.drag_cancel();
    }

    pub fn begin_confirm(&mut self) -> Result<JsExportJob, JsValue> {
        self.inner
            .begin_confirm()
            .map(JsExportJob::from)
            .map_err(session_error)
    }

    pub fn begin_save_to_gallery(&mut self) -> Result<JsExportJob, JsValue> {
        self.inner
            .begin_save_to_gallery()
            .map(JsExportJob::from)
            .map_err(session_error)
    }

    /// Start a custom-size export from the dialog's text fields.
    ///
    /// Non-digits are ignored; an empty or zero field keeps the crop size.
    /// Alignments are 0 = start, 1 = centre, 2 = end.
    pub fn begin_custom_export(
        &mut self,
        width_text: &str,
        height_text: &str,
        horizontal: u8,
        vertical: u8,
        to_file: bool,
    ) -> Result<JsExportJob, JsValue> {
        self.custom_export(width_text, height_text, horizontal, vertical, to_file)
            .map(JsExportJob::from)
            .map_err(session_error)
    }

    /// Initial `{ width, height }` text of the custom export dialog.
    pub fn custom_export_fields(&self) -> Result<JsValue, JsValue> {
        let defaults = self.inner.custom_export_defaults().map_err(session_error)?;
        to_js(&DialogFields {
            width: defaults.width_text(),
            height: defaults.height_text(),
        })
    }

    /// Report that the page stored the job's output. Returns the message to
    /// show, `undefined` for a confirmed edit.
    pub fn finish_export_ok(&mut self, job: &JsExportJob) -> Option<String> {
        self.finish(job, Ok(()))
    }

    /// Report that the user dismissed the destination chooser.
    pub fn finish_export_cancelled(&mut self, job: &JsExportJob) -> Option<String> {
        self.finish(job, Err(SessionError::Cancelled))
    }

    /// Report that storing the output failed.
    pub fn finish_export_failed(&mut self, job: &JsExportJob, reason: &str) -> Option<String> {
        let error = ExportError::Io(std::io::Error::other(reason.to_string()));
        self.finish(job, Err(SessionError::Export(error)))
    }
}

impl Default for JsEditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl JsEditorSession {
    fn load(&mut self, name: &str, bytes: &[u8]) -> Result<(), SessionError> {
        let locator = Locator::from(name);
        self.inner.begin_load(&locator);
        self.inner.finish_load(locator, decode_image(bytes))
    }

    fn custom_export(
        &mut self,
        width_text: &str,
        height_text: &str,
        horizontal: u8,
        vertical: u8,
        to_file: bool,
    ) -> Result<ExportJob, SessionError> {
        let defaults = self.inner.custom_export_defaults()?;
        let settings = defaults.submit(
            width_text,
            height_text,
            horizontal_from_u8(horizontal),
            vertical_from_u8(vertical),
        );
        let destination = if to_file {
            ExportDestination::File
        } else {
            ExportDestination::Gallery
        };
        self.inner.begin_custom_export(settings, destination)
    }

    fn finish(&mut self, job: &JsExportJob, outcome: Result<(), SessionError>) -> Option<String> {
        let kind = job.inner.kind();
        let notice = match self.inner.finish_export(outcome) {
            Ok(()) => kind.success_notice(),
            Err(e) => Some(kind.failure_notice(&e)),
        };
        notice.map(|n| n.message().to_string())
    }
}

/// A snapshot of one export, detached from the session.
#[wasm_bindgen]
pub struct JsExportJob {
    inner: ExportJob,
}

impl From<ExportJob> for JsExportJob {
    fn from(inner: ExportJob) -> Self {
        Self { inner }
    }
}

#[wasm_bindgen]
impl JsExportJob {
    /// `"confirm"`, `"gallery"`, `"custom-gallery"` or `"custom-file"`.
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        let name = match self.inner.kind() {
            ExportKind::Confirm => "confirm",
            ExportKind::SaveToGallery => "gallery",
            ExportKind::CustomGallery => "custom-gallery",
            ExportKind::CustomFile => "custom-file",
        };
        name.to_string()
    }

    /// Cropped and fitted pixels.
    pub fn render(&self) -> Result<JsImage, JsValue> {
        self.inner
            .render()
            .map(JsImage::from_decoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Cropped, fitted and PNG-encoded output.
    pub fn render_png(&self) -> Result<Vec<u8>, JsValue> {
        self.png().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsExportJob {
    fn png(&self) -> Result<Vec<u8>, ExportError> {
        let output = self.inner.render()?;
        Ok(encode_png(&output)?)
    }
}

/// Crop, fit and encode in one call, for pages that keep their own editor
/// state and only need the export pipeline.
#[wasm_bindgen]
pub fn export_png(
    image: &JsImage,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<Vec<u8>, JsValue> {
    let rendered = crate::transform::render_edited_image(
        image, left, top, right, bottom, width, height, 1,
    )?;
    crate::encode::encode_png_from_image(&rendered)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use imageedit_core::decode::DecodedImage;
    use imageedit_core::geometry::CropRect;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_errors_carry_user_messages() {
        let mut session = JsEditorSession::new();
        let err = session.rotate().unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("Add an image first"));

        let err = session.load_bytes("x", &[0, 1, 2]).unwrap_err();
        assert_eq!(
            err.as_string().as_deref(),
            Some("Couldn't load the image, please choose another")
        );
    }

    #[wasm_bindgen_test]
    fn test_drag_through_bindings() {
        let png = encode_png(&DecodedImage::filled(1000, 1000, [0, 0, 0, 255])).unwrap();
        let mut session = JsEditorSession::new();
        session.set_workspace_size(1000.0, 1000.0);
        session.load_bytes("square.png", &png).unwrap();

        let handle = session.drag_start(500.0, 500.0).unwrap();
        assert_eq!(handle.as_string().as_deref(), Some("Move"));
        // Full-frame selection cannot move.
        let moved = session.drag_move(10.0, 0.0).unwrap();
        let rect: CropRect = serde_wasm_bindgen::from_value(moved).unwrap();
        assert_eq!(rect, CropRect::new(0.0, 0.0, 1000.0, 1000.0));
        session.drag_end();
        assert!(session.drag_move(10.0, 0.0).unwrap().is_null());
    }

    #[wasm_bindgen_test]
    fn test_custom_export_fields() {
        let png = encode_png(&DecodedImage::filled(320, 240, [0, 0, 0, 255])).unwrap();
        let mut session = JsEditorSession::new();
        session.load_bytes("a.png", &png).unwrap();
        let fields = session.custom_export_fields().unwrap();
        let width = js_sys::Reflect::get(&fields, &JsValue::from_str("width")).unwrap();
        assert_eq!(width.as_string().as_deref(), Some("320"));
    }
}
