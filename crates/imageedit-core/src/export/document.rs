//! Export to a user-chosen document.

use std::fs::File;
use std::io::{BufWriter, Write};

use tracing::{info, warn};

use super::{ExportError, Locator};
use crate::decode::DecodedImage;
use crate::encode::write_png;

/// Opens a byte sink for a document the user picked or created.
pub trait DocumentWriter {
    fn open_writer(&self, locator: &Locator) -> Result<Box<dyn Write>, ExportError>;
}

/// Writes documents named by `file://` locators or bare paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentWriter;

impl DocumentWriter for FsDocumentWriter {
    fn open_writer(&self, locator: &Locator) -> Result<Box<dyn Write>, ExportError> {
        let path = locator.to_path().ok_or_else(|| ExportError::Provider {
            path: locator.to_string(),
            reason: "not a file locator".to_string(),
        })?;
        Ok(Box::new(File::create(path)?))
    }
}

/// Encode `image` into the document at `locator`.
pub fn write_document(
    image: &DecodedImage,
    writer: &dyn DocumentWriter,
    locator: &Locator,
) -> Result<(), ExportError> {
    let sink = writer.open_writer(locator)?;
    write_png(image, BufWriter::new(sink))?;
    info!(%locator, width = image.width, height = image.height, "Saved to document");
    Ok(())
}

/// [`write_document`] reporting only success. Failures are logged.
pub fn save_to_document(image: &DecodedImage, writer: &dyn DocumentWriter, locator: &Locator) -> bool {
    match write_document(image, writer, locator) {
        Ok(()) => true,
        Err(e) => {
            warn!(%locator, error = %e, "Document export failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    #[test]
    fn test_writes_png_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = DecodedImage::filled(3, 2, [9, 8, 7, 255]);

        assert!(save_to_document(&image, &FsDocumentWriter, &Locator::from_path(&path)));
        let decoded = decode_image(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_failures_return_false() {
        let image = DecodedImage::filled(3, 2, [9, 8, 7, 255]);
        assert!(!save_to_document(&image, &FsDocumentWriter, &Locator::from("content://docs/1")));

        let dir = tempfile::tempdir().unwrap();
        let missing_parent = dir.path().join("no/such/dir/out.png");
        assert!(!save_to_document(&image, &FsDocumentWriter, &Locator::from_path(&missing_parent)));
    }
}
