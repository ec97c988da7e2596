//! Axis-aligned float rectangle used for crop selections.

use serde::{Deserialize, Serialize};

/// A rectangle given by its four edges.
///
/// The same type is used in bitmap-pixel space (the crop selection proper)
/// and in screen space (the selection as drawn); which space a value lives in
/// is decided by the code that produced it. See
/// [`RenderTransform`](super::RenderTransform) for the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CropRect {
    pub const ZERO: CropRect = CropRect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from a top-left corner and a size.
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// Width divided by height, `None` for a degenerate rectangle.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let h = self.height();
        (h > 0.0).then(|| self.width() / h)
    }

    /// Inclusive point containment.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Same size, moved so that its top-left corner is at `(left, top)`.
    pub fn translated_to(&self, left: f64, top: f64) -> Self {
        Self::from_origin_size(left, top, self.width(), self.height())
    }

    /// True when all edges are finite and the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite())
            && self.left < self.right
            && self.top < self.bottom
    }

    /// True when the rectangle lies within `[0, width] x [0, height]`,
    /// allowing `epsilon` of floating-point slack.
    pub fn is_within(&self, width: f64, height: f64, epsilon: f64) -> bool {
        self.left >= -epsilon
            && self.top >= -epsilon
            && self.right <= width + epsilon
            && self.bottom <= height + epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_center() {
        let r = CropRect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.center_x(), 60.0);
        assert_eq!(r.center_y(), 45.0);
        assert_eq!(r.aspect_ratio(), Some(2.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = CropRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(10.1, 5.0));
    }

    #[test]
    fn test_translated_to_keeps_size() {
        let r = CropRect::new(5.0, 5.0, 25.0, 15.0).translated_to(0.0, 100.0);
        assert_eq!(r, CropRect::new(0.0, 100.0, 20.0, 110.0));
    }

    #[test]
    fn test_validity() {
        assert!(CropRect::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!CropRect::ZERO.is_valid());
        assert!(!CropRect::new(0.0, 0.0, f64::NAN, 1.0).is_valid());
        assert_eq!(CropRect::ZERO.aspect_ratio(), None);
    }

    #[test]
    fn test_is_within() {
        let r = CropRect::new(0.0, 0.0, 100.0, 50.0);
        assert!(r.is_within(100.0, 50.0, 0.0));
        assert!(!r.is_within(99.0, 50.0, 0.5));
        assert!(CropRect::new(-1e-9, 0.0, 100.0, 50.0).is_within(100.0, 50.0, 1e-6));
    }
}
