//! Export destinations.
//!
//! Three sinks take a rendered image and persist it as PNG:
//!
//! - the app cache, exposed through a [`ContentProvider`] so the result can
//!   be handed to the caller
//! - a [`GalleryStore`] collection, written through a pending entry that is
//!   rolled back on failure
//! - a user-chosen document opened through a [`DocumentWriter`]
//!
//! Filesystem-backed implementations of each collaborator are provided for
//! desktop hosts and tests.

mod cache;
mod document;
mod error;
mod gallery;
mod locator;
mod naming;

pub use cache::{save_to_cache, ContentProvider, FsContentProvider};
pub use document::{save_to_document, write_document, DocumentWriter, FsDocumentWriter};
pub use error::ExportError;
pub use gallery::{save_to_gallery, DirectoryGallery, GalleryStore, PendingFile, DEFAULT_GALLERY_PATH};
pub use locator::Locator;
pub use naming::{build_export_file_name, export_file_name};
