//! Export into a shared gallery collection.
//!
//! Gallery stores follow an insert-pending, write, finalize protocol so that
//! other apps never observe a half-written image. A failure anywhere after
//! the insert deletes the pending entry.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use super::{ExportError, Locator};
use crate::decode::DecodedImage;
use crate::encode::{write_png, PNG_MIME};

/// A media collection accepting new images.
pub trait GalleryStore {
    /// Store-specific handle of a pending entry.
    type Entry;

    /// Reserve a new, not yet visible entry.
    fn insert_pending(&self, file_name: &str, mime: &str) -> Result<Self::Entry, ExportError>;

    fn open_writer(&self, entry: &Self::Entry) -> Result<Box<dyn Write>, ExportError>;

    /// Publish the entry and return its public locator.
    fn finalize(&self, entry: &Self::Entry) -> Result<Locator, ExportError>;

    /// Drop a pending entry. Best effort.
    fn delete(&self, entry: &Self::Entry);
}

/// Encode `image` into a new gallery entry named `file_name`.
pub fn save_to_gallery<S: GalleryStore>(
    image: &DecodedImage,
    store: &S,
    file_name: &str,
) -> Result<Locator, ExportError> {
    let entry = store.insert_pending(file_name, PNG_MIME)?;

    let published = write_entry(image, store, &entry).and_then(|()| store.finalize(&entry));
    match published {
        Ok(locator) => {
            info!(%locator, "Saved to gallery");
            Ok(locator)
        }
        Err(e) => {
            warn!(file_name, error = %e, "Gallery export failed, removing pending entry");
            store.delete(&entry);
            Err(e)
        }
    }
}

fn write_entry<S: GalleryStore>(
    image: &DecodedImage,
    store: &S,
    entry: &S::Entry,
) -> Result<(), ExportError> {
    let writer = store.open_writer(entry)?;
    write_png(image, BufWriter::new(writer))?;
    Ok(())
}

/// Default location of the collection relative to the storage root.
pub const DEFAULT_GALLERY_PATH: &str = "Pictures/ImageEditKit";

const PENDING_PREFIX: &str = ".pending-";

static PENDING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Pending entry of a [`DirectoryGallery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    staging: PathBuf,
    display_name: String,
}

impl PendingFile {
    pub fn staging_path(&self) -> &Path {
        &self.staging
    }
}

/// Gallery backed by a plain directory, `<root>/<relative_path>`.
///
/// Pending entries are hidden `.pending-*` files in the same directory.
/// Finalizing publishes them under the requested name, or `name (n).ext`
/// when that name is taken, so every export becomes a new entry.
#[derive(Debug, Clone)]
pub struct DirectoryGallery {
    dir: PathBuf,
}

impl DirectoryGallery {
    pub fn new(root: impl AsRef<Path>, relative_path: &str) -> Self {
        Self {
            dir: root.as_ref().join(relative_path),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `name.ext`, then `name (1).ext`, `name (2).ext`, ...
    fn candidate_names<'a>(
        &'a self,
        display_name: &'a str,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        let (stem, ext) = match display_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (display_name, None),
        };
        std::iter::once(self.dir.join(display_name)).chain((1u32..).map(move |n| match ext {
            Some(ext) => self.dir.join(format!("{stem} ({n}).{ext}")),
            None => self.dir.join(format!("{stem} ({n})")),
        }))
    }
}

impl GalleryStore for DirectoryGallery {
    type Entry = PendingFile;

    fn insert_pending(&self, file_name: &str, mime: &str) -> Result<PendingFile, ExportError> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(ExportError::GalleryInsert(format!("bad file name {file_name:?}")));
        }
        fs::create_dir_all(&self.dir).map_err(|e| ExportError::GalleryInsert(e.to_string()))?;

        let seq = PENDING_SEQ.fetch_add(1, Ordering::Relaxed);
        let staging = self
            .dir
            .join(format!("{PENDING_PREFIX}{}-{seq}-{file_name}", std::process::id()));
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staging)
            .map_err(|e| ExportError::GalleryInsert(e.to_string()))?;

        debug!(path = %staging.display(), mime, "Inserted pending gallery entry");
        Ok(PendingFile {
            staging,
            display_name: file_name.to_string(),
        })
    }

    fn open_writer(&self, entry: &PendingFile) -> Result<Box<dyn Write>, ExportError> {
        let file = File::create(&entry.staging)?;
        Ok(Box::new(file))
    }

    /// Links the staged file under the first free name. Linking fails on an
    /// existing target instead of replacing it, so concurrent finalizes of
    /// the same name always end up as separate entries.
    fn finalize(&self, entry: &PendingFile) -> Result<Locator, ExportError> {
        for target in self.candidate_names(&entry.display_name) {
            match fs::hard_link(&entry.staging, &target) {
                Ok(()) => {
                    if let Err(e) = fs::remove_file(&entry.staging) {
                        let path = entry.staging.display();
                        warn!(%path, error = %e, "Could not remove staged file");
                    }
                    return Ok(Locator::from_path(&target));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(ExportError::GalleryInsert(format!(
            "no free name for {:?}",
            entry.display_name
        )))
    }

    fn delete(&self, entry: &PendingFile) {
        let _ = fs::remove_file(&entry.staging);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn image() -> DecodedImage {
        DecodedImage::filled(5, 5, [200, 100, 50, 255])
    }

    fn visible_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_directory_gallery_round_trip() {
        let root = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(root.path(), DEFAULT_GALLERY_PATH);

        let locator = save_to_gallery(&image(), &gallery, "edited_1.png").unwrap();
        let path = locator.to_path().unwrap();
        assert_eq!(path, root.path().join("Pictures/ImageEditKit/edited_1.png"));
        assert!(fs::read(&path).unwrap().starts_with(&[0x89, b'P', b'N', b'G']));
        assert_eq!(visible_files(gallery.dir()), vec!["edited_1.png"]);
    }

    #[test]
    fn test_each_insert_is_a_new_entry() {
        let root = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(root.path(), "Pictures/Test");

        save_to_gallery(&image(), &gallery, "a.png").unwrap();
        save_to_gallery(&image(), &gallery, "a.png").unwrap();
        save_to_gallery(&image(), &gallery, "a.png").unwrap();
        assert_eq!(visible_files(gallery.dir()), vec!["a (1).png", "a (2).png", "a.png"]);
    }

    #[test]
    fn test_finalize_never_replaces_existing_entry() {
        let root = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(root.path(), "g");

        let first = gallery.insert_pending("a.png", PNG_MIME).unwrap();
        let second = gallery.insert_pending("a.png", PNG_MIME).unwrap();
        fs::write(first.staging_path(), b"first").unwrap();
        fs::write(second.staging_path(), b"second").unwrap();
        // Someone else grabs the name after both entries were reserved.
        fs::write(gallery.dir().join("a.png"), b"other").unwrap();

        let a = gallery.finalize(&first).unwrap().to_path().unwrap();
        let b = gallery.finalize(&second).unwrap().to_path().unwrap();
        assert_eq!(fs::read(gallery.dir().join("a.png")).unwrap(), b"other");
        assert_eq!(fs::read(&a).unwrap(), b"first");
        assert_eq!(fs::read(&b).unwrap(), b"second");
        assert_eq!(visible_files(gallery.dir()), vec!["a (1).png", "a (2).png", "a.png"]);
    }

    #[test]
    fn test_concurrent_saves_create_distinct_entries() {
        let root = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(root.path(), "g");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let gallery = &gallery;
                scope.spawn(move || save_to_gallery(&image(), gallery, "a.png").unwrap());
            }
        });
        let files = visible_files(gallery.dir());
        assert_eq!(files.len(), 8, "{files:?}");
        assert!(files.iter().all(|f| !f.starts_with(PENDING_PREFIX)));
    }

    #[test]
    fn test_encode_failure_removes_pending_entry() {
        let root = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(root.path(), "g");
        let empty = DecodedImage::new(0, 0, Vec::new());

        let err = save_to_gallery(&empty, &gallery, "x.png").unwrap_err();
        assert!(matches!(err, ExportError::Encode(_)));
        assert!(visible_files(gallery.dir()).is_empty());
    }

    #[test]
    fn test_rejects_path_like_names() {
        let root = tempfile::tempdir().unwrap();
        let gallery = DirectoryGallery::new(root.path(), "g");
        let err = save_to_gallery(&image(), &gallery, "../x.png").unwrap_err();
        assert!(matches!(err, ExportError::GalleryInsert(_)));
    }

    /// Records protocol calls; the writer fails after `fail_after` bytes.
    struct ScriptedStore {
        calls: RefCell<Vec<&'static str>>,
        fail_after: Option<usize>,
    }

    struct LimitedWriter {
        remaining: usize,
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("disk full"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl GalleryStore for ScriptedStore {
        type Entry = u32;

        fn insert_pending(&self, _: &str, mime: &str) -> Result<u32, ExportError> {
            assert_eq!(mime, "image/png");
            self.calls.borrow_mut().push("insert");
            Ok(7)
        }

        fn open_writer(&self, _: &u32) -> Result<Box<dyn Write>, ExportError> {
            self.calls.borrow_mut().push("open");
            Ok(Box::new(LimitedWriter {
                remaining: self.fail_after.unwrap_or(usize::MAX),
            }))
        }

        fn finalize(&self, entry: &u32) -> Result<Locator, ExportError> {
            self.calls.borrow_mut().push("finalize");
            Ok(Locator::new(format!("content://media/images/{entry}")))
        }

        fn delete(&self, _: &u32) {
            self.calls.borrow_mut().push("delete");
        }
    }

    #[test]
    fn test_protocol_order_on_success() {
        let store = ScriptedStore {
            calls: RefCell::new(Vec::new()),
            fail_after: None,
        };
        let locator = save_to_gallery(&image(), &store, "a.png").unwrap();
        assert_eq!(locator.as_str(), "content://media/images/7");
        assert_eq!(*store.calls.borrow(), vec!["insert", "open", "finalize"]);
    }

    #[test]
    fn test_write_failure_rolls_back() {
        let store = ScriptedStore {
            calls: RefCell::new(Vec::new()),
            fail_after: Some(10),
        };
        let err = save_to_gallery(&image(), &store, "a.png").unwrap_err();
        assert!(matches!(err, ExportError::Encode(_)));
        assert_eq!(*store.calls.borrow(), vec!["insert", "open", "delete"]);
    }
}
