//! The editor session: one screen's worth of state.
//!
//! [`EditorSession`] holds the working image, the crop controller, the
//! workspace transform and the export bookkeeping. Hosts feed it UI events
//! and collaborator replies; it never blocks on I/O except in [`load`]
//! (which hosts call off the UI thread) and never runs an export itself.
//! Exports are snapshotted into owned [`ExportJob`]s that can move to a
//! worker, and their outcome comes back through
//! [`EditorSession::finish_export`].
//!
//! [`load`]: EditorSession::load

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::controller::CropController;
use crate::decode::{DecodeError, DecodedImage, FilterType};
use crate::encode::PNG_MIME;
use crate::export::{
    export_file_name, save_to_cache, save_to_gallery, write_document, ContentProvider,
    DocumentWriter, ExportError, FsContentProvider, GalleryStore, Locator,
};
use crate::geometry::{
    compute_render_transform, AspectRatioOption, CropRect, DragHandle, OverlayLayout,
    RenderTransform,
};
use crate::platform::{DocumentPicker, FileCreator, ImagePicker, ImageSource};
use crate::result::EditResult;
use crate::transform::{
    flip_horizontal, render_edited_image, rotate90, ExportSettings, HorizontalAlignment,
    VerticalAlignment,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No image loaded")]
    NoImage,

    #[error("An export is already running")]
    Busy,

    #[error("Failed to load image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// The user backed out of choosing a destination.
    #[error("Export cancelled")]
    Cancelled,

    /// A background task panicked or was aborted.
    #[error("Background task failed: {0}")]
    Worker(String),
}

impl SessionError {
    /// Generic user-facing message for this error.
    pub fn notice(&self) -> Notice {
        match self {
            SessionError::NoImage => Notice::NoImage,
            SessionError::Busy => Notice::Busy,
            SessionError::Decode(_) => Notice::ImageLoadFailed,
            SessionError::Export(_) => Notice::ExportFailed,
            SessionError::Cancelled => Notice::FileExportCancelled,
            SessionError::Worker(_) => Notice::ExportFailed,
        }
    }
}

/// Short, transient messages for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    ImageLoadFailed,
    NoImage,
    Busy,
    ExportFailed,
    GallerySaveFailed,
    SavedToGallery,
    GalleryExportFailed,
    ExportedToGallery,
    FileExportCancelled,
    FileExportFailed,
    ExportedToFile,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::ImageLoadFailed => "Couldn't load the image, please choose another",
            Notice::NoImage => "Add an image first",
            Notice::Busy => "An export is already in progress",
            Notice::ExportFailed => "Export failed",
            Notice::GallerySaveFailed => "Save failed, check gallery permission",
            Notice::SavedToGallery => "Saved to gallery",
            Notice::GalleryExportFailed => "Export to gallery failed",
            Notice::ExportedToGallery => "Exported to gallery",
            Notice::FileExportCancelled => "Export to file cancelled",
            Notice::FileExportFailed => "Export to file failed",
            Notice::ExportedToFile => "Exported to file",
        }
    }
}

/// Where a custom-size export goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportDestination {
    #[default]
    Gallery,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Cache export handed back to the caller as the edit result.
    Confirm,
    /// Quick save to the gallery with the last-used settings.
    SaveToGallery,
    /// Custom-size export to the gallery.
    CustomGallery,
    /// Custom-size export to a user-created document.
    CustomFile,
}

impl ExportKind {
    /// Message to show when the job succeeds. A confirmed edit closes the
    /// editor instead.
    pub fn success_notice(self) -> Option<Notice> {
        match self {
            ExportKind::Confirm => None,
            ExportKind::SaveToGallery => Some(Notice::SavedToGallery),
            ExportKind::CustomGallery => Some(Notice::ExportedToGallery),
            ExportKind::CustomFile => Some(Notice::ExportedToFile),
        }
    }

    pub fn failure_notice(self, error: &SessionError) -> Notice {
        match (self, error) {
            (_, SessionError::Cancelled) => Notice::FileExportCancelled,
            (_, SessionError::Export(ExportError::EmptyRender)) => Notice::ExportFailed,
            (ExportKind::SaveToGallery, _) => Notice::GallerySaveFailed,
            (ExportKind::CustomGallery, _) => Notice::GalleryExportFailed,
            (ExportKind::CustomFile, _) => Notice::FileExportFailed,
            (ExportKind::Confirm, e) => e.notice(),
        }
    }
}

/// Everything an export needs, detached from the session.
#[derive(Debug, Clone)]
pub struct ExportJob {
    kind: ExportKind,
    image: DecodedImage,
    crop: CropRect,
    settings: ExportSettings,
    filter: FilterType,
    cache_subdir: String,
}

impl ExportJob {
    pub fn kind(&self) -> ExportKind {
        self.kind
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn crop(&self) -> CropRect {
        self.crop
    }

    /// Crop and fit the snapshot.
    pub fn render(&self) -> Result<DecodedImage, ExportError> {
        render_edited_image(&self.image, &self.crop, &self.settings, self.filter)
            .ok_or(ExportError::EmptyRender)
    }

    /// Render into the cache and describe the result for the caller.
    pub fn confirm(
        &self,
        cache_root: &Path,
        provider: &dyn ContentProvider,
    ) -> Result<EditResult, ExportError> {
        let output = self.render()?;
        let locator = save_to_cache(
            &output,
            cache_root,
            &self.cache_subdir,
            provider,
            &export_file_name(),
        )?;
        info!(%locator, width = output.width, height = output.height, "Export confirmed");
        Ok(EditResult {
            locator,
            width: output.width,
            height: output.height,
        })
    }

    pub fn save_to_gallery<S: GalleryStore>(&self, store: &S) -> Result<Locator, ExportError> {
        let output = self.render()?;
        save_to_gallery(&output, store, &export_file_name())
    }

    /// Render, ask the user where to put the file, and write it.
    ///
    /// Rendering happens first so that a render failure is reported before
    /// the user is asked for a destination.
    pub fn save_to_file(
        &self,
        creator: &mut dyn FileCreator,
        writer: &dyn DocumentWriter,
    ) -> Result<Locator, SessionError> {
        let output = self.render()?;
        let locator = creator
            .create_document(&export_file_name(), PNG_MIME)
            .ok_or(SessionError::Cancelled)?;
        write_document(&output, writer, &locator)?;
        Ok(locator)
    }
}

/// Seed values for the custom export dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDialogDefaults {
    /// Fallback size: the current crop, rounded, at least 1x1.
    pub default_width: u32,
    pub default_height: u32,
    /// Settings used by the previous custom export.
    pub last: ExportSettings,
}

impl ExportDialogDefaults {
    /// Initial text of the width field.
    pub fn width_text(&self) -> String {
        self.last.width_px.unwrap_or(self.default_width).to_string()
    }

    pub fn height_text(&self) -> String {
        self.last.height_px.unwrap_or(self.default_height).to_string()
    }

    /// Settings for what the user typed.
    pub fn submit(
        &self,
        width_text: &str,
        height_text: &str,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> ExportSettings {
        ExportSettings::from_dialog_input(
            width_text,
            height_text,
            (self.default_width, self.default_height),
            horizontal,
            vertical,
        )
    }
}

pub struct EditorSession {
    config: EditorConfig,
    image: Option<DecodedImage>,
    source: Option<Locator>,
    controller: CropController,
    workspace: (f64, f64),
    transform: Option<RenderTransform>,
    last_settings: ExportSettings,
    busy: bool,
    loading: bool,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let controller = CropController::new(config.min_crop_size, config.touch_radius_px());
        Self {
            config,
            image: None,
            source: None,
            controller,
            workspace: (0.0, 0.0),
            transform: None,
            last_settings: ExportSettings::default(),
            busy: false,
            loading: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    /// Locator the working image was loaded from, if it came from one.
    pub fn source(&self) -> Option<&Locator> {
        self.source.as_ref()
    }

    pub fn crop_rect(&self) -> Option<CropRect> {
        self.controller.crop_rect()
    }

    pub fn aspect_ratio(&self) -> AspectRatioOption {
        self.controller.aspect_ratio()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a progress indicator should be shown.
    pub fn shows_progress(&self) -> bool {
        self.busy || self.loading
    }

    pub fn last_export_settings(&self) -> &ExportSettings {
        &self.last_settings
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    pub fn set_workspace_size(&mut self, width: f64, height: f64) {
        self.workspace = (width, height);
        self.refresh_transform();
    }

    /// `None` until both a workspace size and an image are known.
    pub fn render_transform(&self) -> Option<RenderTransform> {
        self.transform
    }

    pub fn overlay(&self) -> Option<OverlayLayout> {
        let transform = self.transform?;
        let crop = self.controller.crop_rect()?;
        Some(OverlayLayout::compute(&transform, &crop))
    }

    fn refresh_transform(&mut self) {
        self.transform = self.image.as_ref().and_then(|img| {
            compute_render_transform(
                self.workspace.0,
                self.workspace.1,
                f64::from(img.width),
                f64::from(img.height),
            )
        });
    }

    // ------------------------------------------------------------------
    // Image acquisition
    // ------------------------------------------------------------------

    /// Ask the media picker for an image. `None` means the user backed out;
    /// nothing changes in that case.
    pub fn pick_image(&mut self, picker: &mut dyn ImagePicker) -> Option<Locator> {
        let picked = picker.pick();
        if picked.is_none() {
            debug!("Image pick cancelled");
        }
        picked
    }

    /// Ask the document picker for an image file and try to keep access
    /// to it.
    pub fn pick_document(&mut self, picker: &mut dyn DocumentPicker) -> Option<Locator> {
        let locator = picker.pick_document(&["image/*"])?;
        if !picker.request_persistent_access(&locator) {
            debug!(%locator, "Persistent access not granted");
        }
        Some(locator)
    }

    /// Decode `locator` and make it the working image.
    ///
    /// On failure the previous image, its crop and its source stay as they
    /// were, so the user can simply pick again.
    pub fn load(&mut self, locator: Locator, source: &dyn ImageSource) -> Result<(), SessionError> {
        self.begin_load(&locator);
        let decoded = source.decode(&locator);
        self.finish_load(locator, decoded)
    }

    /// Mark a decode as running elsewhere (see [`crate::worker`]).
    pub fn begin_load(&mut self, locator: &Locator) {
        self.loading = true;
        debug!(%locator, "Loading image");
    }

    /// Apply the outcome of a decode started with [`begin_load`](Self::begin_load).
    pub fn finish_load<E>(
        &mut self,
        locator: Locator,
        decoded: Result<DecodedImage, E>,
    ) -> Result<(), SessionError>
    where
        E: Into<SessionError>,
    {
        self.loading = false;
        match decoded {
            Ok(image) => {
                self.load_image(image);
                self.source = Some(locator);
                Ok(())
            }
            Err(e) => {
                let e = e.into();
                warn!(%locator, error = %e, "Image load failed");
                Err(e)
            }
        }
    }

    /// Use an already decoded image as the working image.
    pub fn load_image(&mut self, image: DecodedImage) {
        info!(width = image.width, height = image.height, "Image loaded");
        self.source = None;
        self.replace_image(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.source = None;
        self.controller.clear();
        self.transform = None;
    }

    fn replace_image(&mut self, image: DecodedImage) {
        self.controller
            .reset(f64::from(image.width), f64::from(image.height));
        self.image = Some(image);
        self.refresh_transform();
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Quarter turn clockwise. The selection resets to the default.
    pub fn rotate(&mut self) -> Result<(), SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        let rotated = rotate90(image);
        debug!(width = rotated.width, height = rotated.height, "Rotated");
        self.replace_image(rotated);
        Ok(())
    }

    /// Mirror left to right. The selection resets to the default.
    pub fn flip_horizontal(&mut self) -> Result<(), SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        let flipped = flip_horizontal(image);
        debug!("Flipped horizontally");
        self.replace_image(flipped);
        Ok(())
    }

    pub fn select_aspect_ratio(&mut self, option: AspectRatioOption) {
        debug!(ratio = option.label(), "Aspect ratio selected");
        self.controller.set_aspect_ratio(option);
    }

    pub fn drag_start(&mut self, x: f64, y: f64) -> DragHandle {
        match self.transform {
            Some(transform) => self.controller.drag_start(x, y, &transform),
            None => DragHandle::None,
        }
    }

    pub fn drag_move(&mut self, dx: f64, dy: f64) -> Option<CropRect> {
        let transform = self.transform?;
        self.controller.drag_move(dx, dy, &transform)
    }

    pub fn drag_end(&mut self) {
        self.controller.drag_end();
    }

    pub fn drag_cancel(&mut self) {
        self.controller.drag_cancel();
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Start the confirm export: render into the cache and return the
    /// result to the caller.
    pub fn begin_confirm(&mut self) -> Result<ExportJob, SessionError> {
        self.begin(ExportKind::Confirm, self.last_settings)
    }

    pub fn begin_save_to_gallery(&mut self) -> Result<ExportJob, SessionError> {
        self.begin(ExportKind::SaveToGallery, self.last_settings)
    }

    /// Start a custom-size export. `settings` become the last-used
    /// settings even if the export then fails.
    pub fn begin_custom_export(
        &mut self,
        settings: ExportSettings,
        destination: ExportDestination,
    ) -> Result<ExportJob, SessionError> {
        self.last_settings = settings;
        let kind = match destination {
            ExportDestination::Gallery => ExportKind::CustomGallery,
            ExportDestination::File => ExportKind::CustomFile,
        };
        self.begin(kind, settings)
    }

    /// Seed values for the custom export dialog.
    pub fn custom_export_defaults(&self) -> Result<ExportDialogDefaults, SessionError> {
        self.image.as_ref().ok_or(SessionError::NoImage)?;
        let crop = self.controller.crop_rect().ok_or(SessionError::NoImage)?;
        let round = |v: f64| v.round().max(1.0) as u32;
        Ok(ExportDialogDefaults {
            default_width: round(crop.width()),
            default_height: round(crop.height()),
            last: self.last_settings,
        })
    }

    fn begin(&mut self, kind: ExportKind, settings: ExportSettings) -> Result<ExportJob, SessionError> {
        let (Some(image), Some(crop)) = (self.image.as_ref(), self.controller.crop_rect()) else {
            return Err(SessionError::NoImage);
        };
        if self.busy {
            debug!(?kind, "Export ignored, another one is running");
            return Err(SessionError::Busy);
        }

        self.busy = true;
        debug!(?kind, ?crop, ?settings, "Export started");
        Ok(ExportJob {
            kind,
            image: image.clone(),
            crop,
            settings,
            filter: self.config.resample_filter,
            cache_subdir: self.config.cache_subdir.clone(),
        })
    }

    /// Report a job's outcome. Clears the busy flag.
    pub fn finish_export<T, E>(&mut self, outcome: Result<T, E>) -> Result<T, SessionError>
    where
        E: Into<SessionError>,
    {
        self.busy = false;
        outcome.map_err(|e| {
            let e = e.into();
            match e {
                SessionError::Cancelled => debug!("Export cancelled"),
                ref other => warn!(error = %other, "Export failed"),
            }
            e
        })
    }

    /// Shareable-locator provider for confirm exports, built from the
    /// configured authority.
    pub fn content_provider(&self, cache_root: &Path) -> FsContentProvider {
        FsContentProvider::new(self.config.provider_authority.clone(), cache_root)
    }
}
