//! Overlay Studio Preview Engine
//!
//! Local, approximate rendering of an overlay document so edits can be
//! judged before asking the remote service for the real result.
//!
//! # Pipeline
//!
//! ```text
//! document + media size ── compose ──▶ Scene (display list) ──▶ SceneSink
//!                                                               ├── SVG file
//!                                                               └── memory
//! ```
//!
//! Paint order is fixed: base media, logo, then text layers in stacking
//! order, so the logo is never drawn over text.

use std::path::PathBuf;

pub mod compositor;
pub mod scene;
pub mod session;
pub mod svg;

pub use compositor::*;
pub use scene::*;
pub use session::*;
pub use svg::render_svg;

/// Errors raised while composing or presenting a preview frame.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("No media loaded")]
    NoMedia,

    #[error("Invalid media dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to read media: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
