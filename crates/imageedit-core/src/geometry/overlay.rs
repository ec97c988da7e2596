//! Screen-space layout of the crop overlay.
//!
//! Hosts draw the darkened mask, the rule-of-thirds grid, the selection
//! border and the handle dots from an [`OverlayLayout`]; nothing here draws.

use serde::{Deserialize, Serialize};

use super::{CropRect, DragHandle, RenderTransform};

/// A straight segment in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Everything a renderer needs to paint the crop overlay for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayout {
    /// Where the bitmap is drawn.
    pub image: CropRect,
    /// The selection border.
    pub crop: CropRect,
    /// Mask bands outside the selection: top, bottom, left, right.
    ///
    /// Top and bottom span the full image width; left and right fill the
    /// remaining strip beside the selection. Bands may be empty.
    pub mask: [CropRect; 4],
    /// Two vertical then two horizontal thirds lines inside the selection.
    pub grid: [Segment; 4],
    /// Handle centres in [`DragHandle::BOUNDARY`] order.
    pub handles: [(DragHandle, f64, f64); 8],
}

impl OverlayLayout {
    /// Lay out the overlay for `crop` (bitmap space) under `transform`.
    pub fn compute(transform: &RenderTransform, crop: &CropRect) -> Self {
        let image = transform.image_rect_on_screen();
        let c = transform.bitmap_to_screen(crop);

        let mask = [
            CropRect::new(image.left, image.top, image.right, c.top),
            CropRect::new(image.left, c.bottom, image.right, image.bottom),
            CropRect::new(image.left, c.top, c.left, c.bottom),
            CropRect::new(c.right, c.top, image.right, c.bottom),
        ];

        let third_w = c.width() / 3.0;
        let third_h = c.height() / 3.0;
        let vertical = |x: f64| Segment {
            x1: x,
            y1: c.top,
            x2: x,
            y2: c.bottom,
        };
        let horizontal = |y: f64| Segment {
            x1: c.left,
            y1: y,
            x2: c.right,
            y2: y,
        };
        let grid = [
            vertical(c.left + third_w),
            vertical(c.left + 2.0 * third_w),
            horizontal(c.top + third_h),
            horizontal(c.top + 2.0 * third_h),
        ];

        let handles = DragHandle::BOUNDARY.map(|handle| {
            let (x, y) = handle.anchor_point(&c).unwrap_or((c.center_x(), c.center_y()));
            (handle, x, y)
        });

        Self {
            image,
            crop: c,
            mask,
            grid,
            handles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::compute_render_transform;

    fn area(r: &CropRect) -> f64 {
        r.width().max(0.0) * r.height().max(0.0)
    }

    #[test]
    fn test_layout_positions() {
        // 1000x500 image drawn at half scale in a 500x500 workspace.
        let t = compute_render_transform(500.0, 500.0, 1000.0, 500.0).unwrap();
        let crop = CropRect::new(300.0, 0.0, 900.0, 300.0);
        let layout = OverlayLayout::compute(&t, &crop);

        assert_eq!(layout.image, CropRect::new(0.0, 125.0, 500.0, 375.0));
        assert_eq!(layout.crop, CropRect::new(150.0, 125.0, 450.0, 275.0));
        assert_eq!(layout.grid[0].x1, 250.0);
        assert_eq!(layout.grid[1].x1, 350.0);
        assert_eq!(layout.grid[2].y1, 175.0);
        assert_eq!(layout.grid[3].y1, 225.0);
        assert_eq!(layout.handles[0], (DragHandle::TopLeft, 150.0, 125.0));
        assert_eq!(layout.handles[7], (DragHandle::Right, 450.0, 200.0));
    }

    #[test]
    fn test_full_frame_crop_has_empty_mask() {
        let t = compute_render_transform(400.0, 300.0, 800.0, 600.0).unwrap();
        let layout = OverlayLayout::compute(&t, &CropRect::new(0.0, 0.0, 800.0, 600.0));
        assert!(layout.mask.iter().all(|band| area(band) == 0.0));
    }
}
