//! Editor configuration.
//!
//! Sizes that depend on the display are stored in density-independent units
//! and converted with [`EditorConfig::density`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::encode::PNG_MIME;
use crate::export::DEFAULT_GALLERY_PATH;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest crop edge, bitmap pixels.
    pub min_crop_size: f64,
    /// Hit-test reach around each handle, dp.
    pub touch_radius_dp: f64,
    /// Drawn handle dot radius, dp.
    pub handle_radius_dp: f64,
    /// Screen pixels per dp.
    pub density: f64,
    /// Directory under the cache root holding shareable exports.
    pub cache_subdir: String,
    /// Gallery collection path relative to the storage root.
    pub gallery_relative_path: String,
    pub provider_authority: String,
    /// Filter used when scaling to an exact export size.
    pub resample_filter: FilterType,
    pub export_mime: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_crop_size: 64.0,
            touch_radius_dp: 28.0,
            handle_radius_dp: 9.0,
            density: 1.0,
            cache_subdir: "image_edit_kit".to_string(),
            gallery_relative_path: DEFAULT_GALLERY_PATH.to_string(),
            provider_authority: "imageeditkit.fileprovider".to_string(),
            resample_filter: FilterType::Bilinear,
            export_mime: PNG_MIME.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(data) => Self::from_json(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn touch_radius_px(&self) -> f64 {
        self.touch_radius_dp * self.density
    }

    pub fn handle_radius_px(&self) -> f64 {
        self.handle_radius_dp * self.density
    }

    /// `<cache_root>/<cache_subdir>`.
    pub fn cache_dir(&self, cache_root: &Path) -> PathBuf {
        cache_root.join(&self.cache_subdir)
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("min_crop_size", self.min_crop_size),
            ("touch_radius_dp", self.touch_radius_dp),
            ("handle_radius_dp", self.handle_radius_dp),
            ("density", self.density),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !v.is_finite() || *v <= 0.0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
        }
        if self.cache_subdir.is_empty() || self.cache_subdir.contains("..") {
            return Err(ConfigError::Invalid(format!(
                "cache_subdir {:?} is not a plain directory name",
                self.cache_subdir
            )));
        }
        if self.export_mime != PNG_MIME {
            return Err(ConfigError::Invalid(format!(
                "export_mime {:?} is unsupported, only {PNG_MIME} is written",
                self.export_mime
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EditorConfig::default();
        assert_eq!(cfg.min_crop_size, 64.0);
        assert_eq!(cfg.touch_radius_px(), 28.0);
        assert_eq!(cfg.handle_radius_px(), 9.0);
        assert_eq!(cfg.gallery_relative_path, "Pictures/ImageEditKit");
        assert_eq!(cfg.resample_filter, FilterType::Bilinear);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = EditorConfig::from_json(r#"{"density": 2.5, "cache_subdir": "exports"}"#).unwrap();
        assert_eq!(cfg.touch_radius_px(), 70.0);
        assert_eq!(cfg.cache_dir(Path::new("/c")), PathBuf::from("/c/exports"));
        assert_eq!(cfg.provider_authority, "imageeditkit.fileprovider");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"density": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"export_mime": "image/jpeg"}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"cache_subdir": "../up"}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(EditorConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("editor.json");
        assert_eq!(EditorConfig::load(&path).unwrap(), EditorConfig::default());

        let mut cfg = EditorConfig::default();
        cfg.min_crop_size = 32.0;
        cfg.resample_filter = FilterType::Lanczos3;
        cfg.save(&path).unwrap();
        assert_eq!(EditorConfig::load(&path).unwrap(), cfg);
    }
}
