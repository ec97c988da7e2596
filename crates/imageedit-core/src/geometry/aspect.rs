//! Aspect-ratio presets and ratio-fitting of crop rectangles.

use serde::{Deserialize, Serialize};

use super::CropRect;

/// Ratio choices offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatioOption {
    /// Unconstrained.
    #[default]
    Free,
    Square,
    Ratio5x4,
    Ratio4x5,
    Ratio16x9,
    Ratio9x16,
}

impl AspectRatioOption {
    pub const ALL: [AspectRatioOption; 6] = [
        AspectRatioOption::Free,
        AspectRatioOption::Square,
        AspectRatioOption::Ratio5x4,
        AspectRatioOption::Ratio4x5,
        AspectRatioOption::Ratio16x9,
        AspectRatioOption::Ratio9x16,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AspectRatioOption::Free => "a:b",
            AspectRatioOption::Square => "1:1",
            AspectRatioOption::Ratio5x4 => "5:4",
            AspectRatioOption::Ratio4x5 => "4:5",
            AspectRatioOption::Ratio16x9 => "16:9",
            AspectRatioOption::Ratio9x16 => "9:16",
        }
    }

    /// Width divided by height, `None` for [`AspectRatioOption::Free`].
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectRatioOption::Free => None,
            AspectRatioOption::Square => Some(1.0),
            AspectRatioOption::Ratio5x4 => Some(5.0 / 4.0),
            AspectRatioOption::Ratio4x5 => Some(4.0 / 5.0),
            AspectRatioOption::Ratio16x9 => Some(16.0 / 9.0),
            AspectRatioOption::Ratio9x16 => Some(9.0 / 16.0),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.label() == label)
    }
}

/// Initial crop rectangle for a freshly loaded (or rotated/flipped) image.
///
/// Without a ratio this is the full frame. With a ratio it is the largest
/// rectangle of that ratio that fits the image, centred. A degenerate image
/// yields [`CropRect::ZERO`].
pub fn default_crop_rect(image_width: f64, image_height: f64, ratio: Option<f64>) -> CropRect {
    if image_width <= 0.0 || image_height <= 0.0 {
        return CropRect::ZERO;
    }

    let Some(ratio) = ratio.filter(|r| r.is_finite() && *r > 0.0) else {
        return CropRect::new(0.0, 0.0, image_width, image_height);
    };

    let mut crop_width = image_width;
    let mut crop_height = crop_width / ratio;
    if crop_height > image_height {
        crop_height = image_height;
        crop_width = crop_height * ratio;
    }

    let left = (image_width - crop_width) / 2.0;
    let top = (image_height - crop_height) / 2.0;
    CropRect::from_origin_size(left, top, crop_width, crop_height)
}

/// Re-fit an existing selection to a newly chosen ratio.
///
/// The centre is preserved. The result is no wider than the current
/// selection allows at the new ratio, no larger than the tightest
/// centre-to-edge distance of the image permits, and no smaller than
/// `min_size` along its shorter side.
pub fn coerce_to_aspect_ratio(
    current: &CropRect,
    ratio: f64,
    image_width: f64,
    image_height: f64,
    min_size: f64,
) -> CropRect {
    let center_x = current.center_x();
    let center_y = current.center_y();

    let min_width = min_size.max(min_size * ratio);

    let current_ratio = current.width() / current.height();
    let width = if current_ratio > ratio {
        current.height() * ratio
    } else {
        current.width()
    };

    let max_width_by_bounds = (center_x.min(image_width - center_x) * 2.0)
        .min(center_y.min(image_height - center_y) * 2.0 * ratio);

    let adjusted_width = clamp_with_min(width, min_width, max_width_by_bounds);
    let adjusted_height = adjusted_width / ratio;

    CropRect::from_origin_size(
        center_x - adjusted_width / 2.0,
        center_y - adjusted_height / 2.0,
        adjusted_width,
        adjusted_height,
    )
}

/// Clamp `requested` into `[min, max]`, letting the bound win when the
/// available space is smaller than the minimum.
pub(crate) fn clamp_with_min(requested: f64, min: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    if max < min {
        return max;
    }
    requested.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_presets() {
        assert_eq!(AspectRatioOption::Free.ratio(), None);
        assert_eq!(AspectRatioOption::Ratio16x9.label(), "16:9");
        assert_eq!(
            AspectRatioOption::from_label("4:5"),
            Some(AspectRatioOption::Ratio4x5)
        );
        assert_eq!(AspectRatioOption::from_label("3:2"), None);
    }

    #[test]
    fn test_default_free_is_full_frame() {
        let r = default_crop_rect(800.0, 600.0, None);
        assert_eq!(r, CropRect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_default_square_on_landscape() {
        let r = default_crop_rect(800.0, 600.0, Some(1.0));
        assert_eq!(r, CropRect::new(100.0, 0.0, 700.0, 600.0));
    }

    #[test]
    fn test_default_wide_ratio_on_portrait() {
        let r = default_crop_rect(600.0, 800.0, Some(16.0 / 9.0));
        assert_close(r.width(), 600.0);
        assert_close(r.height(), 337.5);
        assert_close(r.top, (800.0 - 337.5) / 2.0);
    }

    #[test]
    fn test_default_tall_ratio_on_landscape() {
        let r = default_crop_rect(1600.0, 900.0, Some(9.0 / 16.0));
        assert_close(r.height(), 900.0);
        assert_close(r.width(), 506.25);
        assert_close(r.center_x(), 800.0);
    }

    #[test]
    fn test_default_degenerate_image() {
        assert_eq!(default_crop_rect(0.0, 100.0, Some(1.0)), CropRect::ZERO);
    }

    #[test]
    fn test_coerce_keeps_center_and_ratio() {
        let current = CropRect::new(0.0, 0.0, 800.0, 600.0);
        let r = coerce_to_aspect_ratio(&current, 1.0, 800.0, 600.0, 64.0);
        assert_close(r.center_x(), 400.0);
        assert_close(r.center_y(), 300.0);
        assert_close(r.width(), 600.0);
        assert_close(r.height(), 600.0);
    }

    #[test]
    fn test_coerce_limited_by_distance_to_edge() {
        // Centre close to the left edge limits the width to twice that distance.
        let current = CropRect::new(0.0, 100.0, 100.0, 500.0);
        let r = coerce_to_aspect_ratio(&current, 0.5, 800.0, 600.0, 10.0);
        assert_close(r.width(), 100.0);
        assert_close(r.height(), 200.0);
        assert_close(r.center_x(), 50.0);

        let current = CropRect::new(300.0, 500.0, 500.0, 600.0);
        let r = coerce_to_aspect_ratio(&current, 1.0, 800.0, 600.0, 10.0);
        assert_close(r.height(), 100.0);
        assert!(r.is_within(800.0, 600.0, 1e-9));
    }

    #[test]
    fn test_coerce_enforces_min_size() {
        let current = CropRect::new(390.0, 290.0, 410.0, 310.0);
        let r = coerce_to_aspect_ratio(&current, 2.0, 800.0, 600.0, 64.0);
        assert_close(r.width(), 128.0);
        assert_close(r.height(), 64.0);
    }

    #[test]
    fn test_clamp_with_min() {
        assert_eq!(clamp_with_min(50.0, 10.0, 100.0), 50.0);
        assert_eq!(clamp_with_min(5.0, 10.0, 100.0), 10.0);
        assert_eq!(clamp_with_min(500.0, 10.0, 100.0), 100.0);
        assert_eq!(clamp_with_min(50.0, 64.0, 30.0), 30.0);
        assert_eq!(clamp_with_min(50.0, 64.0, 0.0), 0.0);
    }
}
