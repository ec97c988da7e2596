use thiserror::Error;

use crate::encode::EncodeError;

/// Errors that can occur while writing an export to its destination.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem failure while creating or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The content provider refused to expose the file.
    #[error("Cannot share {path}: {reason}")]
    Provider { path: String, reason: String },

    /// The gallery did not accept a new entry.
    #[error("Gallery insert failed: {0}")]
    GalleryInsert(String),

    /// Crop and fit produced no pixels.
    #[error("Nothing to export")]
    EmptyRender,
}
