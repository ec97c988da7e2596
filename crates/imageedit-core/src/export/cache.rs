//! Cache-backed export with a shareable locator.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{ExportError, Locator};
use crate::decode::DecodedImage;
use crate::encode::write_png;

/// Turns a private cache file into a locator other apps may be granted
/// read access to.
pub trait ContentProvider {
    fn locator_for(&self, path: &Path) -> Result<Locator, ExportError>;
}

/// Provider exposing files under `root` as
/// `content://<authority>/<path relative to root>`.
#[derive(Debug, Clone)]
pub struct FsContentProvider {
    authority: String,
    root: PathBuf,
}

impl FsContentProvider {
    pub fn new(authority: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            authority: authority.into(),
            root: root.into(),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    fn prefix(&self) -> String {
        format!("content://{}/", self.authority)
    }

    /// Map one of this provider's locators back to the file it names.
    pub fn resolve(&self, locator: &Locator) -> Option<PathBuf> {
        let relative = locator.as_str().strip_prefix(&self.prefix())?;
        if relative.is_empty() || relative.split('/').any(|part| part == "..") {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ContentProvider for FsContentProvider {
    fn locator_for(&self, path: &Path) -> Result<Locator, ExportError> {
        let relative = path.strip_prefix(&self.root).map_err(|_| ExportError::Provider {
            path: path.display().to_string(),
            reason: format!("outside {}", self.root.display()),
        })?;

        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            return Err(ExportError::Provider {
                path: path.display().to_string(),
                reason: "not a file".to_string(),
            });
        }

        Ok(Locator::new(format!("{}{}", self.prefix(), parts.join("/"))))
    }
}

/// Write `image` as PNG to `<cache_root>/<subdir>/<file_name>` and return a
/// shareable locator for it.
///
/// A partially written file is removed when encoding fails.
pub fn save_to_cache(
    image: &DecodedImage,
    cache_root: &Path,
    subdir: &str,
    provider: &dyn ContentProvider,
    file_name: &str,
) -> Result<Locator, ExportError> {
    let dir = cache_root.join(subdir);
    fs::create_dir_all(&dir)?;
    let path = dir.join(file_name);
    debug!(path = %path.display(), "Writing export to cache");

    let written = File::create(&path)
        .map_err(ExportError::from)
        .and_then(|file| write_png(image, BufWriter::new(file)).map_err(ExportError::from));
    if let Err(e) = written {
        warn!(path = %path.display(), error = %e, "Cache export failed");
        let _ = fs::remove_file(&path);
        return Err(e);
    }

    provider.locator_for(&path)
}
