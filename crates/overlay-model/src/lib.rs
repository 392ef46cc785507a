//! Overlay Studio Model
//!
//! Defines the data contracts shared by the compiler, the preview, and the
//! cloud client:
//! - **Position:** percentage points, the 3×3 anchor grid, position presets
//! - **Layer:** one text overlay with its style and timing window
//! - **Logo:** the optional logo overlay
//! - **Document:** the ordered layer set for one uploaded media item
//! - **Template / Preset:** reusable style snapshots
//!
//! Positions are percentages of the media's width and height so the same
//! document survives re-encoding at a different resolution.

pub mod color;
pub mod document;
pub mod layer;
pub mod logo;
pub mod media;
pub mod position;
pub mod preset;
pub mod template;

pub use color::*;
pub use document::*;
pub use layer::*;
pub use logo::*;
pub use media::*;
pub use position::*;
pub use preset::*;
pub use template::*;
