//! Overlay Studio Cloud Client
//!
//! Everything that talks to the network:
//! - **Upload:** unsigned multipart upload of base media and logos
//! - **Webhook:** best-effort notification after a successful generate
//! - **Launch:** identity parameters handed over in the launch URL
//! - **Submit:** the generate workflow, guarded by a busy flag

pub mod launch;
pub mod submit;
pub mod upload;
pub mod webhook;

pub use launch::*;
pub use submit::*;
pub use upload::*;
pub use webhook::*;
