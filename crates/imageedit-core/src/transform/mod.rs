//! Bitmap operations of the edit pipeline.
//!
//! Rotation and mirroring replace the working image; crop and export
//! fitting produce the final output from it. All functions take the source
//! by reference (or by value where it may be passed through) and return a
//! fresh image.

mod crop;
mod fit;
mod orient;

pub use crop::{crop_to_rect, snap_to_pixels, PixelRect};
pub use fit::{
    apply_export_settings, render_edited_image, ExportSettings, HorizontalAlignment,
    VerticalAlignment,
};
pub use orient::{flip_horizontal, rotate90};
