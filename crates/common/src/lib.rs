//! Overlay Studio Common Utilities
//!
//! Shared infrastructure for all Overlay Studio crates:
//! - Error types and result aliases
//! - Clock, timecode, and redraw throttling utilities
//! - Tracing/logging initialization
//! - Configuration loading
//! - Local key-value storage for client-side state

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use store::*;
