//! Drag handles of the crop rectangle and hit testing.

use serde::{Deserialize, Serialize};

use super::CropRect;

/// Part of the crop rectangle grabbed by a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DragHandle {
    /// Nothing grabbed; the gesture is inert.
    #[default]
    None,
    /// Interior grabbed; the whole rectangle translates.
    Move,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl DragHandle {
    /// The eight boundary handles in hit-test priority order.
    pub const BOUNDARY: [DragHandle; 8] = [
        DragHandle::TopLeft,
        DragHandle::TopRight,
        DragHandle::BottomLeft,
        DragHandle::BottomRight,
        DragHandle::Top,
        DragHandle::Bottom,
        DragHandle::Left,
        DragHandle::Right,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            DragHandle::TopLeft
                | DragHandle::TopRight
                | DragHandle::BottomLeft
                | DragHandle::BottomRight
        )
    }

    pub fn is_edge(self) -> bool {
        matches!(
            self,
            DragHandle::Left | DragHandle::Right | DragHandle::Top | DragHandle::Bottom
        )
    }

    /// Position of this handle on `rect`, `None` for `Move`/`None`.
    pub fn anchor_point(self, rect: &CropRect) -> Option<(f64, f64)> {
        let (cx, cy) = (rect.center_x(), rect.center_y());
        let point = match self {
            DragHandle::TopLeft => (rect.left, rect.top),
            DragHandle::TopRight => (rect.right, rect.top),
            DragHandle::BottomLeft => (rect.left, rect.bottom),
            DragHandle::BottomRight => (rect.right, rect.bottom),
            DragHandle::Top => (cx, rect.top),
            DragHandle::Bottom => (cx, rect.bottom),
            DragHandle::Left => (rect.left, cy),
            DragHandle::Right => (rect.right, cy),
            DragHandle::Move | DragHandle::None => return None,
        };
        Some(point)
    }
}

/// Decide which handle a pointer-down at `(x, y)` grabs.
///
/// A handle is hit when the pointer is within `touch_radius` of it on both
/// axes. Corners are tested before edge midpoints so that a touch near a
/// corner never resolves to an adjacent edge. A pointer inside the rectangle
/// but away from every handle moves it; anything else is inert.
pub fn resolve_drag_handle(x: f64, y: f64, crop_on_screen: &CropRect, touch_radius: f64) -> DragHandle {
    let near = |(px, py): (f64, f64)| (x - px).abs() <= touch_radius && (y - py).abs() <= touch_radius;

    DragHandle::BOUNDARY
        .into_iter()
        .find(|handle| handle.anchor_point(crop_on_screen).is_some_and(near))
        .unwrap_or_else(|| {
            if crop_on_screen.contains(x, y) {
                DragHandle::Move
            } else {
                DragHandle::None
            }
        })
}
