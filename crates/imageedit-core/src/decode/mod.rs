//! Image decoding for the edit session.
//!
//! This module provides:
//! - Decoding PNG/JPEG sources into an RGBA working image
//! - EXIF orientation correction, so the working image matches what the
//!   user sees in their gallery
//! - Exact-dimension resizing for export
//!
//! All operations are synchronous. Hosts run them on a worker thread (or a
//! Web Worker for the WASM build) and hand the result back to the session.

mod load;
mod resize;
mod types;

pub use load::{decode_image, decode_image_no_orientation, get_orientation};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, CHANNELS};
