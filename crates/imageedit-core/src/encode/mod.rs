//! Image encoding for export.
//!
//! Exports are always lossless PNG at maximum compression. The encoder can
//! target an in-memory buffer or stream straight into a destination writer
//! (gallery entry, user-chosen document).

mod png;

pub use png::{encode_png, write_png, EncodeError, PNG_MIME};
