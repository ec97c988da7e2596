//! Mapping between bitmap-pixel space and screen space.

use serde::{Deserialize, Serialize};

use super::CropRect;

/// Letterbox transform placing an image inside a workspace.
///
/// Derived from the workspace size and the image size; recompute it whenever
/// either changes instead of mutating it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderTransform {
    /// Screen pixels per bitmap pixel, always > 0.
    pub scale: f64,
    /// Screen x of the image's top-left corner.
    pub offset_x: f64,
    /// Screen y of the image's top-left corner.
    pub offset_y: f64,
    pub image_width: f64,
    pub image_height: f64,
}

/// Fit an image entirely inside a workspace, preserving its aspect ratio,
/// and centre it on both axes.
///
/// Returns `None` when the workspace or the image has no area; callers must
/// not render until both are non-empty.
pub fn compute_render_transform(
    workspace_width: f64,
    workspace_height: f64,
    image_width: f64,
    image_height: f64,
) -> Option<RenderTransform> {
    let sizes = [workspace_width, workspace_height, image_width, image_height];
    if sizes.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return None;
    }

    let scale = (workspace_width / image_width).min(workspace_height / image_height);
    let drawn_width = image_width * scale;
    let drawn_height = image_height * scale;

    Some(RenderTransform {
        scale,
        offset_x: (workspace_width - drawn_width) / 2.0,
        offset_y: (workspace_height - drawn_height) / 2.0,
        image_width,
        image_height,
    })
}

impl RenderTransform {
    /// Where the whole image is drawn on screen.
    pub fn image_rect_on_screen(&self) -> CropRect {
        CropRect::from_origin_size(
            self.offset_x,
            self.offset_y,
            self.image_width * self.scale,
            self.image_height * self.scale,
        )
    }

    pub fn bitmap_to_screen(&self, rect: &CropRect) -> CropRect {
        CropRect::new(
            self.offset_x + rect.left * self.scale,
            self.offset_y + rect.top * self.scale,
            self.offset_x + rect.right * self.scale,
            self.offset_y + rect.bottom * self.scale,
        )
    }

    pub fn screen_to_bitmap(&self, rect: &CropRect) -> CropRect {
        CropRect::new(
            (rect.left - self.offset_x) / self.scale,
            (rect.top - self.offset_y) / self.scale,
            (rect.right - self.offset_x) / self.scale,
            (rect.bottom - self.offset_y) / self.scale,
        )
    }

    pub fn screen_point_to_bitmap(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }

    /// Convert a pointer drag delta from screen pixels into bitmap pixels.
    pub fn screen_delta_to_bitmap(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: bitmap -> screen -> bitmap recovers the rectangle.
        #[test]
        fn prop_round_trip(
            (ww, wh) in (1.0f64..4000.0, 1.0f64..4000.0),
            (iw, ih) in (1.0f64..8000.0, 1.0f64..8000.0),
            (l, t, w, h) in (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0),
        ) {
            let transform = compute_render_transform(ww, wh, iw, ih).unwrap();
            let rect = CropRect::from_origin_size(l * iw, t * ih, w * iw, h * ih);
            let back = transform.screen_to_bitmap(&transform.bitmap_to_screen(&rect));
            let tol = 1e-6 * iw.max(ih);
            prop_assert!((back.left - rect.left).abs() <= tol);
            prop_assert!((back.top - rect.top).abs() <= tol);
            prop_assert!((back.right - rect.right).abs() <= tol);
            prop_assert!((back.bottom - rect.bottom).abs() <= tol);
        }

        /// Property: the drawn image always fits the workspace.
        #[test]
        fn prop_image_fits_workspace(
            (ww, wh) in (1.0f64..4000.0, 1.0f64..4000.0),
            (iw, ih) in (1.0f64..8000.0, 1.0f64..8000.0),
        ) {
            let transform = compute_render_transform(ww, wh, iw, ih).unwrap();
            let r = transform.image_rect_on_screen();
            prop_assert!(transform.scale > 0.0);
            prop_assert!(r.is_within(ww, wh, 1e-6 * ww.max(wh)));
        }
    }
}
