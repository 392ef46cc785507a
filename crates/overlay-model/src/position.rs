//! Overlay positions and the named anchor grid.
//!
//! Positions are percentages: `(0, 0)` is the top-left corner and
//! `(100, 100)` the bottom-right corner of the media.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A point in percent of media width/height.
///
/// Nominally within `[0, 100]`, but values outside the range are kept as-is
/// so overlays can overshoot slightly for edge-flush placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPosition {
    pub x: f64,
    pub y: f64,
}

impl OverlayPosition {
    /// Dead center of the media.
    pub const CENTER: OverlayPosition = OverlayPosition { x: 50.0, y: 50.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Pixel location inside media of the given intrinsic size.
    pub fn to_pixels(&self, width: f64, height: f64) -> (f64, f64) {
        (self.x / 100.0 * width, self.y / 100.0 * height)
    }
}

impl Default for OverlayPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Vertical band of the anchor grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalBand {
    North,
    Center,
    South,
}

/// Horizontal band of the anchor grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalBand {
    West,
    Middle,
    East,
}

/// Named compass-point placement keyword understood by the remote grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    #[serde(alias = "top-left")]
    NorthWest,
    #[serde(alias = "top-center")]
    North,
    #[serde(alias = "top-right")]
    NorthEast,
    #[serde(alias = "center-left")]
    CenterWest,
    Center,
    #[serde(alias = "center-right")]
    CenterEast,
    #[serde(alias = "bottom-left")]
    SouthWest,
    #[serde(alias = "bottom-center")]
    South,
    #[serde(alias = "bottom-right")]
    SouthEast,
}

impl Anchor {
    /// All nine anchors, row by row from the top-left.
    pub const ALL: [Anchor; 9] = [
        Anchor::NorthWest,
        Anchor::North,
        Anchor::NorthEast,
        Anchor::CenterWest,
        Anchor::Center,
        Anchor::CenterEast,
        Anchor::SouthWest,
        Anchor::South,
        Anchor::SouthEast,
    ];

    /// Compose an anchor from its bands.
    pub fn from_bands(vertical: VerticalBand, horizontal: HorizontalBand) -> Self {
        use HorizontalBand::*;
        use VerticalBand::*;
        match (vertical, horizontal) {
            (North, West) => Anchor::NorthWest,
            (North, Middle) => Anchor::North,
            (North, East) => Anchor::NorthEast,
            (Center, West) => Anchor::CenterWest,
            (Center, Middle) => Anchor::Center,
            (Center, East) => Anchor::CenterEast,
            (South, West) => Anchor::SouthWest,
            (South, Middle) => Anchor::South,
            (South, East) => Anchor::SouthEast,
        }
    }

    pub fn vertical(self) -> VerticalBand {
        match self {
            Anchor::NorthWest | Anchor::North | Anchor::NorthEast => VerticalBand::North,
            Anchor::CenterWest | Anchor::Center | Anchor::CenterEast => VerticalBand::Center,
            Anchor::SouthWest | Anchor::South | Anchor::SouthEast => VerticalBand::South,
        }
    }

    pub fn horizontal(self) -> HorizontalBand {
        match self {
            Anchor::NorthWest | Anchor::CenterWest | Anchor::SouthWest => HorizontalBand::West,
            Anchor::North | Anchor::Center | Anchor::South => HorizontalBand::Middle,
            Anchor::NorthEast | Anchor::CenterEast | Anchor::SouthEast => HorizontalBand::East,
        }
    }

    /// Wire keyword: vertical band plus optional `_west` / `_east` suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::NorthWest => "north_west",
            Anchor::North => "north",
            Anchor::NorthEast => "north_east",
            Anchor::CenterWest => "center_west",
            Anchor::Center => "center",
            Anchor::CenterEast => "center_east",
            Anchor::SouthWest => "south_west",
            Anchor::South => "south",
            Anchor::SouthEast => "south_east",
        }
    }

    /// Editor label (`top-left`, ..., `bottom-right`).
    pub fn preset_key(self) -> &'static str {
        match self {
            Anchor::NorthWest => "top-left",
            Anchor::North => "top-center",
            Anchor::NorthEast => "top-right",
            Anchor::CenterWest => "center-left",
            Anchor::Center => "center",
            Anchor::CenterEast => "center-right",
            Anchor::SouthWest => "bottom-left",
            Anchor::South => "bottom-center",
            Anchor::SouthEast => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognised anchor names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown anchor: {0}")]
pub struct UnknownAnchor(pub String);

impl FromStr for Anchor {
    type Err = UnknownAnchor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Anchor::ALL
            .into_iter()
            .find(|a| a.as_str() == needle || a.preset_key() == needle)
            .ok_or_else(|| UnknownAnchor(s.to_string()))
    }
}

/// A named point offered as a one-click placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub position: OverlayPosition,
}

/// The nine placement presets, at 10/50/90 percent on each axis.
pub const POSITION_PRESETS: [PositionPreset; 9] = [
    preset("top-left", "Top left", 10.0, 10.0),
    preset("top-center", "Top center", 50.0, 10.0),
    preset("top-right", "Top right", 90.0, 10.0),
    preset("center-left", "Center left", 10.0, 50.0),
    preset("center", "Center", 50.0, 50.0),
    preset("center-right", "Center right", 90.0, 50.0),
    preset("bottom-left", "Bottom left", 10.0, 90.0),
    preset("bottom-center", "Bottom center", 50.0, 90.0),
    preset("bottom-right", "Bottom right", 90.0, 90.0),
];

const fn preset(key: &'static str, label: &'static str, x: f64, y: f64) -> PositionPreset {
    PositionPreset {
        key,
        label,
        position: OverlayPosition { x, y },
    }
}

/// Look up a position preset by key.
pub fn position_preset(key: &str) -> Option<&'static PositionPreset> {
    POSITION_PRESETS.iter().find(|p| p.key == key)
}
