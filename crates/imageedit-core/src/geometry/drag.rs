//! Translating drag deltas into crop rectangle updates.
//!
//! All math is in bitmap-pixel space. Deltas arriving in screen pixels must
//! be divided by [`RenderTransform::scale`](super::RenderTransform::scale)
//! first, so every limit below is expressed in source-image pixels whatever
//! the zoom level.

use super::aspect::clamp_with_min;
use super::{CropRect, DragHandle};

/// Apply one drag step to `current`.
///
/// With `ratio == None` each handle moves its own edges independently
/// (free mode). With a ratio the rectangle keeps that ratio exactly and the
/// edge or corner opposite the grabbed handle stays fixed.
///
/// The returned rectangle always lies inside `[0, image_width] x
/// [0, image_height]` and is never smaller than `min_size` along either axis
/// unless the image itself is smaller. A zero delta returns `current`
/// unchanged (within float rounding in ratio mode, where edges are rebuilt
/// from the width and the ratio).
#[allow(clippy::too_many_arguments)]
pub fn update_crop_rect_by_drag(
    current: &CropRect,
    handle: DragHandle,
    dx: f64,
    dy: f64,
    image_width: f64,
    image_height: f64,
    min_size: f64,
    ratio: Option<f64>,
) -> CropRect {
    match ratio {
        None => free_drag(current, handle, dx, dy, image_width, image_height, min_size),
        Some(ratio) => ratio_drag(
            current,
            handle,
            dx,
            dy,
            image_width,
            image_height,
            min_size,
            ratio,
        ),
    }
}

/// Clamp into `[lo, hi]`; when the range is inverted the lower bound wins.
fn clamp_low_wins(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

/// Clamp into `[lo, hi]`; when the range is inverted the upper bound wins.
///
/// Used for right/bottom edges, whose upper bound is the image edge: on an
/// image smaller than the minimum size, staying inside the image takes
/// precedence over the minimum.
fn clamp_high_wins(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

fn move_within(current: &CropRect, dx: f64, dy: f64, image_width: f64, image_height: f64) -> CropRect {
    let left = clamp_low_wins(current.left + dx, 0.0, image_width - current.width());
    let top = clamp_low_wins(current.top + dy, 0.0, image_height - current.height());
    let (shift_x, shift_y) = (left - current.left, top - current.top);
    CropRect::new(
        current.left + shift_x,
        current.top + shift_y,
        current.right + shift_x,
        current.bottom + shift_y,
    )
}

fn free_drag(
    current: &CropRect,
    handle: DragHandle,
    dx: f64,
    dy: f64,
    image_width: f64,
    image_height: f64,
    min_size: f64,
) -> CropRect {
    let mut rect = *current;

    let drag_left = |r: &mut CropRect| r.left = clamp_low_wins(r.left + dx, 0.0, r.right - min_size);
    let drag_right =
        |r: &mut CropRect| r.right = clamp_high_wins(r.right + dx, r.left + min_size, image_width);
    let drag_top = |r: &mut CropRect| r.top = clamp_low_wins(r.top + dy, 0.0, r.bottom - min_size);
    let drag_bottom =
        |r: &mut CropRect| r.bottom = clamp_high_wins(r.bottom + dy, r.top + min_size, image_height);

    match handle {
        DragHandle::None => return *current,
        DragHandle::Move => return move_within(current, dx, dy, image_width, image_height),
        DragHandle::Left => drag_left(&mut rect),
        DragHandle::Right => drag_right(&mut rect),
        DragHandle::Top => drag_top(&mut rect),
        DragHandle::Bottom => drag_bottom(&mut rect),
        DragHandle::TopLeft => {
            drag_left(&mut rect);
            drag_top(&mut rect);
        }
        DragHandle::TopRight => {
            drag_right(&mut rect);
            drag_top(&mut rect);
        }
        DragHandle::BottomLeft => {
            drag_left(&mut rect);
            drag_bottom(&mut rect);
        }
        DragHandle::BottomRight => {
            drag_right(&mut rect);
            drag_bottom(&mut rect);
        }
    }

    rect
}

#[allow(clippy::too_many_arguments)]
fn ratio_drag(
    current: &CropRect,
    handle: DragHandle,
    dx: f64,
    dy: f64,
    image_width: f64,
    image_height: f64,
    min_size: f64,
    ratio: f64,
) -> CropRect {
    let bounds = Bounds {
        width: image_width,
        height: image_height,
    };
    let min_width = min_size.max(min_size * ratio);
    let min_height = min_width / ratio;

    match handle {
        DragHandle::None => *current,
        DragHandle::Move => move_within(current, dx, dy, image_width, image_height),
        DragHandle::Left => resize_horizontal(current, dx, Side::Start, bounds, ratio, min_width),
        DragHandle::Right => resize_horizontal(current, dx, Side::End, bounds, ratio, min_width),
        DragHandle::Top => resize_vertical(current, dy, Side::Start, bounds, ratio, min_height),
        DragHandle::Bottom => resize_vertical(current, dy, Side::End, bounds, ratio, min_height),
        DragHandle::TopLeft
        | DragHandle::TopRight
        | DragHandle::BottomLeft
        | DragHandle::BottomRight => resize_corner(current, handle, dx, dy, bounds, ratio, min_width),
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    width: f64,
    height: f64,
}

/// Which side of an axis is being dragged: left/top or right/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

/// Left/right edge drag. The opposite edge is the anchor and the vertical
/// centre is preserved.
fn resize_horizontal(
    current: &CropRect,
    dx: f64,
    side: Side,
    bounds: Bounds,
    ratio: f64,
    min_width: f64,
) -> CropRect {
    let center_y = current.center_y();
    let (anchor_x, requested_width, max_width_by_x) = match side {
        Side::Start => (current.right, current.right - (current.left + dx), current.right),
        Side::End => (
            current.left,
            (current.right + dx) - current.left,
            bounds.width - current.left,
        ),
    };

    let max_height_by_center = center_y.min(bounds.height - center_y) * 2.0;
    let max_width = max_width_by_x.min(max_height_by_center * ratio);

    let width = clamp_with_min(requested_width, min_width, max_width);
    let height = width / ratio;
    let top = center_y - height / 2.0;
    let bottom = center_y + height / 2.0;

    match side {
        Side::Start => CropRect::new(anchor_x - width, top, anchor_x, bottom),
        Side::End => CropRect::new(anchor_x, top, anchor_x + width, bottom),
    }
}

/// Top/bottom edge drag. The opposite edge is the anchor and the horizontal
/// centre is preserved.
fn resize_vertical(
    current: &CropRect,
    dy: f64,
    side: Side,
    bounds: Bounds,
    ratio: f64,
    min_height: f64,
) -> CropRect {
    let center_x = current.center_x();
    let (anchor_y, requested_height, max_height_by_y) = match side {
        Side::Start => (current.bottom, current.bottom - (current.top + dy), current.bottom),
        Side::End => (
            current.top,
            (current.bottom + dy) - current.top,
            bounds.height - current.top,
        ),
    };

    let max_width_by_center = center_x.min(bounds.width - center_x) * 2.0;
    let max_height = max_height_by_y.min(max_width_by_center / ratio);

    let height = clamp_with_min(requested_height, min_height, max_height);
    let width = height * ratio;
    let left = center_x - width / 2.0;
    let right = center_x + width / 2.0;

    match side {
        Side::Start => CropRect::new(left, anchor_y - height, right, anchor_y),
        Side::End => CropRect::new(left, anchor_y, right, anchor_y + height),
    }
}

/// Corner drag. The opposite corner is the anchor; the requested width is
/// whichever of the horizontal distance or the ratio-scaled vertical distance
/// to the moved corner is larger.
fn resize_corner(
    current: &CropRect,
    handle: DragHandle,
    dx: f64,
    dy: f64,
    bounds: Bounds,
    ratio: f64,
    min_width: f64,
) -> CropRect {
    let (side_x, side_y) = match handle {
        DragHandle::TopLeft => (Side::Start, Side::Start),
        DragHandle::TopRight => (Side::End, Side::Start),
        DragHandle::BottomLeft => (Side::Start, Side::End),
        DragHandle::BottomRight => (Side::End, Side::End),
        _ => return *current,
    };

    let (anchor_x, moving_x) = match side_x {
        Side::Start => (current.right, current.left + dx),
        Side::End => (current.left, current.right + dx),
    };
    let (anchor_y, moving_y) = match side_y {
        Side::Start => (current.bottom, current.top + dy),
        Side::End => (current.top, current.bottom + dy),
    };

    let width_from_x = (moving_x - anchor_x).abs();
    let width_from_y = (moving_y - anchor_y).abs() * ratio;
    let requested_width = width_from_x.max(width_from_y);

    let max_width_by_x = match side_x {
        Side::Start => anchor_x,
        Side::End => bounds.width - anchor_x,
    };
    let max_height_by_y = match side_y {
        Side::Start => anchor_y,
        Side::End => bounds.height - anchor_y,
    };
    let max_width = max_width_by_x.min(max_height_by_y * ratio);

    let width = clamp_with_min(requested_width, min_width, max_width);
    let height = width / ratio;

    let (left, right) = match side_x {
        Side::Start => (anchor_x - width, anchor_x),
        Side::End => (anchor_x, anchor_x + width),
    };
    let (top, bottom) = match side_y {
        Side::Start => (anchor_y - height, anchor_y),
        Side::End => (anchor_y, anchor_y + height),
    };
    CropRect::new(left, top, right, bottom)
}
