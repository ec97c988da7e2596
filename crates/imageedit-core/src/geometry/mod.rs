//! Pure crop geometry.
//!
//! Everything in this module is a function of its inputs: rectangles in
//! bitmap-pixel space, the letterbox transform to screen space, aspect-ratio
//! fitting, handle hit testing and drag updates. Nothing here holds state or
//! touches pixels.

mod aspect;
mod drag;
mod handle;
mod overlay;
mod rect;
mod render;

pub use aspect::{coerce_to_aspect_ratio, default_crop_rect, AspectRatioOption};
pub use drag::update_crop_rect_by_drag;
pub use handle::{resolve_drag_handle, DragHandle};
pub use overlay::{OverlayLayout, Segment};
pub use rect::CropRect;
pub use render::{compute_render_transform, RenderTransform};
