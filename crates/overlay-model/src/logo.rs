//! The optional logo overlay.

use serde::{Deserialize, Serialize};

use crate::layer::TimeWindow;
use crate::position::Anchor;

/// A previously uploaded image placed at one of the nine anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoOverlay {
    /// Remote asset identifier of the logo image.
    pub asset_id: String,

    /// Rendered width in pixels (> 0).
    #[serde(default = "default_logo_width")]
    pub width_px: u32,

    #[serde(default)]
    pub anchor: Anchor,

    /// Local or remote URL of the logo, used by the preview only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,

    /// Video mode only.
    #[serde(default)]
    pub timing: TimeWindow,
}

fn default_logo_width() -> u32 {
    LogoOverlay::DEFAULT_WIDTH_PX
}

impl LogoOverlay {
    pub const DEFAULT_WIDTH_PX: u32 = 120;

    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            width_px: Self::DEFAULT_WIDTH_PX,
            anchor: Anchor::NorthWest,
            preview_url: None,
            timing: TimeWindow::default(),
        }
    }

    pub fn with_width(mut self, width_px: u32) -> Self {
        self.width_px = width_px;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Asset identifier in overlay form: folder separators become `:`.
    pub fn overlay_id(&self) -> String {
        self.asset_id.replace('/', ":")
    }

    /// Human-readable problems with the logo settings.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = vec![];
        if self.asset_id.trim().is_empty() {
            issues.push("logo asset id is empty".to_string());
        }
        if self.width_px == 0 {
            issues.push("logo width must be greater than 0".to_string());
        }
        issues.extend(self.timing.issues());
        issues
    }
}
