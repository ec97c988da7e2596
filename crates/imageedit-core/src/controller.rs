//! Crop interaction state machine.
//!
//! The controller owns the current selection and the in-flight gesture. Each
//! gesture snapshots the selection at pointer-down and every move recomputes
//! the selection from that snapshot's successor, so a move always fully
//! replaces the previous value.

use crate::geometry::{
    coerce_to_aspect_ratio, default_crop_rect, resolve_drag_handle, update_crop_rect_by_drag,
    AspectRatioOption, CropRect, DragHandle, RenderTransform,
};

/// Whether a drag gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// A pointer is down. `handle` may be [`DragHandle::None`], in which case
    /// every move is ignored until the gesture ends.
    Active { handle: DragHandle, rect: CropRect },
}

#[derive(Debug, Clone)]
pub struct CropController {
    crop: Option<CropRect>,
    image_width: f64,
    image_height: f64,
    aspect: AspectRatioOption,
    min_size: f64,
    touch_radius: f64,
    gesture: GestureState,
}

impl CropController {
    /// `min_size` is in bitmap pixels, `touch_radius` in screen pixels.
    pub fn new(min_size: f64, touch_radius: f64) -> Self {
        Self {
            crop: None,
            image_width: 0.0,
            image_height: 0.0,
            aspect: AspectRatioOption::Free,
            min_size,
            touch_radius,
            gesture: GestureState::Idle,
        }
    }

    pub fn crop_rect(&self) -> Option<CropRect> {
        self.crop
    }

    pub fn aspect_ratio(&self) -> AspectRatioOption {
        self.aspect
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Handle grabbed by the current gesture, `None` when idle.
    pub fn active_handle(&self) -> DragHandle {
        match self.gesture {
            GestureState::Active { handle, .. } => handle,
            GestureState::Idle => DragHandle::None,
        }
    }

    /// Start over on an image of the given size with the default selection
    /// for the active ratio. Any gesture in progress is dropped.
    pub fn reset(&mut self, image_width: f64, image_height: f64) {
        self.image_width = image_width;
        self.image_height = image_height;
        self.gesture = GestureState::Idle;
        self.crop = (image_width > 0.0 && image_height > 0.0)
            .then(|| default_crop_rect(image_width, image_height, self.aspect.ratio()));
    }

    /// Forget the image and the selection.
    pub fn clear(&mut self) {
        self.crop = None;
        self.image_width = 0.0;
        self.image_height = 0.0;
        self.gesture = GestureState::Idle;
    }

    /// Switch ratio. Choosing free keeps the selection as is; a fixed ratio
    /// re-fits it around its centre.
    pub fn set_aspect_ratio(&mut self, option: AspectRatioOption) {
        self.aspect = option;
        let (Some(current), Some(ratio)) = (self.crop, option.ratio()) else {
            return;
        };
        self.crop = Some(coerce_to_aspect_ratio(
            &current,
            ratio,
            self.image_width,
            self.image_height,
            self.min_size,
        ));
    }

    /// Pointer down at screen `(x, y)`. Returns the grabbed handle.
    pub fn drag_start(&mut self, x: f64, y: f64, transform: &RenderTransform) -> DragHandle {
        let Some(rect) = self.crop else {
            self.gesture = GestureState::Idle;
            return DragHandle::None;
        };
        let on_screen = transform.bitmap_to_screen(&rect);
        let handle = resolve_drag_handle(x, y, &on_screen, self.touch_radius);
        self.gesture = GestureState::Active { handle, rect };
        handle
    }

    /// Pointer moved by a screen delta. Returns the new selection when the
    /// gesture is live, `None` when it was ignored.
    pub fn drag_move(&mut self, dx: f64, dy: f64, transform: &RenderTransform) -> Option<CropRect> {
        let GestureState::Active { handle, rect } = self.gesture else {
            return None;
        };
        if handle == DragHandle::None || transform.scale <= 0.0 {
            return None;
        }

        let (dx, dy) = transform.screen_delta_to_bitmap(dx, dy);
        let updated = update_crop_rect_by_drag(
            &rect,
            handle,
            dx,
            dy,
            self.image_width,
            self.image_height,
            self.min_size,
            self.aspect.ratio(),
        );
        self.gesture = GestureState::Active {
            handle,
            rect: updated,
        };
        self.crop = Some(updated);
        Some(updated)
    }

    pub fn drag_end(&mut self) {
        self.gesture = GestureState::Idle;
    }

    /// Same as [`drag_end`](Self::drag_end); the last applied move stays.
    pub fn drag_cancel(&mut self) {
        self.gesture = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::compute_render_transform;

    fn controller(w: f64, h: f64) -> CropController {
        let mut c = CropController::new(64.0, 28.0);
        c.reset(w, h);
        c
    }

    #[test]
    fn test_reset_uses_active_ratio() {
        let mut c = controller(800.0, 600.0);
        assert_eq!(c.crop_rect(), Some(CropRect::new(0.0, 0.0, 800.0, 600.0)));

        c.set_aspect_ratio(AspectRatioOption::Square);
        c.reset(600.0, 800.0);
        assert_eq!(c.crop_rect(), Some(CropRect::new(0.0, 100.0, 600.0, 700.0)));
    }

    #[test]
    fn test_free_ratio_keeps_selection() {
        let mut c = controller(800.0, 600.0);
        c.set_aspect_ratio(AspectRatioOption::Square);
        let square = c.crop_rect();
        c.set_aspect_ratio(AspectRatioOption::Free);
        assert_eq!(c.crop_rect(), square);
        assert_eq!(c.aspect_ratio(), AspectRatioOption::Free);
    }

    #[test]
    fn test_drag_scales_screen_delta() {
        // 800x600 in 400x300: scale 0.5, so 10 screen px = 20 bitmap px.
        let t = compute_render_transform(400.0, 300.0, 800.0, 600.0).unwrap();
        let mut c = controller(800.0, 600.0);
        c.set_aspect_ratio(AspectRatioOption::Free);

        let handle = c.drag_start(200.0, 150.0, &t);
        assert_eq!(handle, DragHandle::Move);
        // Full frame cannot move; shrink first with the right edge.
        c.drag_end();

        assert_eq!(c.drag_start(400.0, 150.0, &t), DragHandle::Right);
        let r = c.drag_move(-10.0, 0.0, &t).unwrap();
        assert_eq!(r, CropRect::new(0.0, 0.0, 780.0, 600.0));
        let r = c.drag_move(-10.0, 0.0, &t).unwrap();
        assert_eq!(r, CropRect::new(0.0, 0.0, 760.0, 600.0));
        c.drag_end();
        assert_eq!(c.active_handle(), DragHandle::None);
        assert_eq!(c.crop_rect(), Some(r));
    }

    #[test]
    fn test_inert_gesture_ignores_moves() {
        let t = compute_render_transform(1000.0, 1000.0, 400.0, 400.0).unwrap();
        let mut c = controller(400.0, 400.0);
        c.set_aspect_ratio(AspectRatioOption::Square);
        let before = c.crop_rect();

        // Image drawn at x 500..1500; a touch at x 10 grabs nothing.
        let small = compute_render_transform(2000.0, 1000.0, 400.0, 400.0).unwrap();
        assert_eq!(c.drag_start(10.0, 500.0, &small), DragHandle::None);
        assert_eq!(c.drag_move(50.0, 50.0, &small), None);
        assert_eq!(c.crop_rect(), before);

        c.drag_end();
        assert_eq!(c.drag_move(50.0, 50.0, &t), None);
    }

    #[test]
    fn test_no_image_means_no_gesture() {
        let t = compute_render_transform(100.0, 100.0, 100.0, 100.0).unwrap();
        let mut c = CropController::new(64.0, 28.0);
        assert_eq!(c.drag_start(50.0, 50.0, &t), DragHandle::None);
        assert_eq!(c.gesture(), GestureState::Idle);
        c.reset(0.0, 100.0);
        assert_eq!(c.crop_rect(), None);
    }

    #[test]
    fn test_reset_drops_gesture() {
        let t = compute_render_transform(800.0, 600.0, 800.0, 600.0).unwrap();
        let mut c = controller(800.0, 600.0);
        c.drag_start(0.0, 0.0, &t);
        assert_eq!(c.active_handle(), DragHandle::TopLeft);
        c.reset(600.0, 800.0);
        assert_eq!(c.gesture(), GestureState::Idle);
        c.clear();
        assert_eq!(c.crop_rect(), None);
    }
}
