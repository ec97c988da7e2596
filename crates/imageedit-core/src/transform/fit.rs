//! Exact-size export fitting.
//!
//! A cropped image is brought to the requested output size in two steps:
//! cut the largest sub-rectangle with the target's aspect ratio (the
//! alignment decides which part of the excess axis survives), then scale
//! that sub-rectangle to exactly the requested pixels. The output is never
//! letterboxed and never distorted.

use serde::{Deserialize, Serialize};

use super::crop::{crop_to_rect, extract, snap_to_pixels};
use crate::decode::{resize, DecodeError, DecodedImage, FilterType};
use crate::geometry::CropRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Requested output shape. Absent dimensions default to the crop size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub width_px: Option<u32>,
    pub height_px: Option<u32>,
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl ExportSettings {
    /// Output size for a source of `width x height`.
    pub fn target_size(&self, width: u32, height: u32) -> (u32, u32) {
        (
            self.width_px.filter(|v| *v > 0).unwrap_or(width),
            self.height_px.filter(|v| *v > 0).unwrap_or(height),
        )
    }

    /// Build settings from free-text dialog fields.
    ///
    /// Non-digit characters are dropped from each field before parsing. A
    /// field left empty, zero or too large for `u32` falls back to the
    /// matching entry of `defaults`.
    pub fn from_dialog_input(
        width_text: &str,
        height_text: &str,
        defaults: (u32, u32),
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        Self {
            width_px: Some(parse_dimension(width_text).unwrap_or(defaults.0)),
            height_px: Some(parse_dimension(height_text).unwrap_or(defaults.1)),
            horizontal,
            vertical,
        }
    }
}

fn parse_dimension(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u32>().ok().filter(|v| *v > 0)
}

impl HorizontalAlignment {
    fn offset(self, container: f64, content: f64) -> f64 {
        let raw = match self {
            HorizontalAlignment::Start => 0.0,
            HorizontalAlignment::Center => (container - content) / 2.0,
            HorizontalAlignment::End => container - content,
        };
        clamp_offset(raw, container, content)
    }
}

impl VerticalAlignment {
    fn offset(self, container: f64, content: f64) -> f64 {
        let raw = match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => (container - content) / 2.0,
            VerticalAlignment::Bottom => container - content,
        };
        clamp_offset(raw, container, content)
    }
}

fn clamp_offset(raw: f64, container: f64, content: f64) -> f64 {
    raw.clamp(0.0, (container - content).max(0.0))
}

/// Bring `cropped` to the size requested by `settings`.
///
/// When the target already matches, `cropped` is returned untouched.
///
/// # Errors
///
/// Propagates [`resize`] failures; an empty source is reported as
/// `DecodeError::InvalidDimensions`.
pub fn apply_export_settings(
    cropped: DecodedImage,
    settings: &ExportSettings,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let (target_w, target_h) = settings.target_size(cropped.width, cropped.height);
    if target_w == cropped.width && target_h == cropped.height {
        return Ok(cropped);
    }

    let invalid = || DecodeError::InvalidDimensions {
        width: cropped.width,
        height: cropped.height,
    };

    let (src_w, src_h) = (f64::from(cropped.width), f64::from(cropped.height));
    let source_ratio = src_w / src_h;
    let target_ratio = f64::from(target_w) / f64::from(target_h);

    let window = if source_ratio > target_ratio {
        let width = src_h * target_ratio;
        let left = settings.horizontal.offset(src_w, width);
        CropRect::from_origin_size(left, 0.0, width, src_h)
    } else {
        let height = src_w / target_ratio;
        let top = settings.vertical.offset(src_h, height);
        CropRect::from_origin_size(0.0, top, src_w, height)
    };

    let region = snap_to_pixels(&window, cropped.width, cropped.height).ok_or_else(invalid)?;
    let fitted = extract(&cropped, region).ok_or_else(invalid)?;
    resize(&fitted, target_w, target_h, filter)
}

/// Full export render: crop to the selection, then fit to the settings.
///
/// Returns `None` when the selection cannot be cut from `source` or the
/// fit fails.
pub fn render_edited_image(
    source: &DecodedImage,
    crop: &CropRect,
    settings: &ExportSettings,
    filter: FilterType,
) -> Option<DecodedImage> {
    let cropped = crop_to_rect(source, crop)?;
    apply_export_settings(cropped, settings, filter).ok()
}
