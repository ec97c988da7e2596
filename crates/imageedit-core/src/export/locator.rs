//! Opaque references to stored images.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const FILE_SCHEME: &str = "file://";

/// A URI-like string naming an image in some store.
///
/// The engine never interprets locators except for the `file://` scheme
/// (and bare paths), which the filesystem-backed implementations resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// `file://` locator for an absolute or relative path.
    pub fn from_path(path: &Path) -> Self {
        Self(format!("{FILE_SCHEME}{}", path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Filesystem path for `file://` locators and bare paths; `None` for any
    /// other scheme.
    pub fn to_path(&self) -> Option<PathBuf> {
        if let Some(rest) = self.0.strip_prefix(FILE_SCHEME) {
            return Some(PathBuf::from(rest));
        }
        if self.0.contains("://") || self.0.is_empty() {
            return None;
        }
        Some(PathBuf::from(&self.0))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
