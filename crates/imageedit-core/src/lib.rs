//! ImageEdit Core - crop and export engine
//!
//! This crate provides the platform-independent part of the image edit kit:
//! crop geometry and gesture handling, the bitmap transform pipeline,
//! export sinks and the editor session that ties them together. Hosts
//! supply the UI and the platform collaborators from [`platform`].

pub mod config;
pub mod controller;
pub mod decode;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod platform;
pub mod result;
pub mod session;
pub mod transform;
#[cfg(feature = "tokio")]
pub mod worker;

pub use config::EditorConfig;
pub use controller::{CropController, GestureState};
pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::EncodeError;
pub use export::{ExportError, Locator};
pub use geometry::{AspectRatioOption, CropRect, DragHandle, OverlayLayout, RenderTransform};
pub use result::{EditOutcome, EditResult, ImageEditContract, ResultContract};
pub use session::{EditorSession, ExportDestination, ExportJob, ExportKind, Notice, SessionError};
pub use transform::{ExportSettings, HorizontalAlignment, VerticalAlignment};
