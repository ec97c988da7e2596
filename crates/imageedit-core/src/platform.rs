//! Host collaborators.
//!
//! The engine never talks to a UI toolkit or a media database directly.
//! Hosts implement these traits over whatever their platform offers.

use std::fs;

use tracing::debug;

use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::export::Locator;

/// Reads and decodes the image behind a locator.
pub trait ImageSource {
    fn decode(&self, locator: &Locator) -> Result<DecodedImage, DecodeError>;
}

/// Lets the user choose an image from their media library.
pub trait ImagePicker {
    /// `None` when the user backs out.
    fn pick(&mut self) -> Option<Locator>;
}

/// Lets the user open a document.
pub trait DocumentPicker {
    fn pick_document(&mut self, mime_filter: &[&str]) -> Option<Locator>;

    /// Ask to keep read access across restarts. Best effort: returns `false`
    /// when the provider does not support it.
    fn request_persistent_access(&mut self, locator: &Locator) -> bool;
}

/// Lets the user choose where a new document is created.
pub trait FileCreator {
    fn create_document(&mut self, suggested_name: &str, mime: &str) -> Option<Locator>;
}

/// Grants another party read access to an exported locator.
pub trait Sharer {
    fn grant_read_access(&self, locator: &Locator, recipient: &str);
}

/// Decodes `file://` locators and bare paths from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn decode(&self, locator: &Locator) -> Result<DecodedImage, DecodeError> {
        let path = locator
            .to_path()
            .ok_or_else(|| DecodeError::IoError(format!("unsupported locator {locator}")))?;
        let bytes = fs::read(&path).map_err(|e| DecodeError::IoError(e.to_string()))?;
        debug!(path = %path.display(), len = bytes.len(), "Read image source");
        decode_image(&bytes)
    }
}
