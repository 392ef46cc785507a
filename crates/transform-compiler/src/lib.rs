//! Overlay Studio Transform Compiler
//!
//! Turns an [`OverlayDocument`](studio_overlay_model::OverlayDocument) into
//! the slash-separated transformation grammar of the remote media service.
//!
//! # Pipeline
//!
//! ```text
//! document ──┬── base crop/resize
//!            ├── logo ──── [timing] ── apply @ anchor + edge padding
//!            └── per visible layer:
//!                 text ── [halo] ── [arc] ── [shadow] ── [rotate] ── [timing] ── apply @ anchor + offset
//!                                                                                  │
//!                                                                                  ▼
//!                                                                 <segments>/<asset>.<jpg|mp4>
//! ```
//!
//! Everything here is pure and infallible: malformed colors or fonts reach
//! the output verbatim and surface as remote-side errors.

pub mod compiler;
pub mod encode;
pub mod resolve;
pub mod segment;

pub use compiler::*;
pub use encode::*;
pub use resolve::*;
pub use segment::*;
