//! Text layers: one overlay's content, style, position, and timing.

use serde::{Deserialize, Serialize};

use crate::color::RgbColor;
use crate::position::OverlayPosition;

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Horizontal text alignment. `Center` is the grammar's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Outline around the glyphs. Width 0 disables it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stroke {
    pub width: u32,
    pub color: RgbColor,
}

impl Stroke {
    pub fn is_active(&self) -> bool {
        self.width > 0
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 0,
            color: RgbColor::new("17539F"),
        }
    }
}

/// Drop shadow settings, used only when `enabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shadow {
    pub enabled: bool,
    pub color: RgbColor,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: false,
            color: RgbColor::black(),
            blur: 10.0,
            offset_x: 5.0,
            offset_y: 5.0,
        }
    }
}

/// Arc distortion. Positive angles arch upward like a rainbow, negative sag like a smile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Curve {
    pub enabled: bool,
    /// Degrees of arc.
    pub angle: f64,
}

impl Default for Curve {
    fn default() -> Self {
        Self {
            enabled: false,
            angle: 40.0,
        }
    }
}

/// Visibility window inside a video, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TimeWindow {
    pub start_time: f64,
    /// `None` runs to the end of the media.
    pub end_time: Option<f64>,
}

impl TimeWindow {
    pub fn new(start_time: f64, end_time: Option<f64>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// The whole media duration.
    pub fn is_default(&self) -> bool {
        self.start_time <= 0.0 && self.end_time.is_none()
    }

    /// Whether the window is visible at `t` seconds.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_time && self.end_time.map_or(true, |end| t < end)
    }

    /// Human-readable problems with the window.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = vec![];
        if self.start_time < 0.0 || !self.start_time.is_finite() {
            issues.push(format!("start time {} must be >= 0", self.start_time));
        }
        if let Some(end) = self.end_time {
            if end <= self.start_time {
                issues.push(format!(
                    "end time {end} must be after start time {}",
                    self.start_time
                ));
            }
        }
        issues
    }
}

/// Stylistic fields of a text layer. Templates and presets overwrite these
/// without touching text or position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub text_align: TextAlign,
    pub color: RgbColor,
    pub stroke: Stroke,
    pub shadow: Shadow,
    pub curve: Curve,
    /// Degrees, image mode only.
    pub rotation: f64,
    /// Image mode only.
    pub letter_spacing: i32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Mitr".to_string(),
            font_size: 70,
            font_weight: FontWeight::Normal,
            text_align: TextAlign::Center,
            color: RgbColor::new("FFDD17"),
            stroke: Stroke::default(),
            shadow: Shadow::default(),
            curve: Curve::default(),
            rotation: 0.0,
            letter_spacing: 0,
        }
    }
}

impl TextStyle {
    pub fn is_bold(&self) -> bool {
        self.font_weight == FontWeight::Bold
    }
}

/// One text overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    /// May be empty; blank layers are inert.
    #[serde(default)]
    pub text: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub position: OverlayPosition,

    #[serde(default)]
    pub style: TextStyle,

    /// Video mode only.
    #[serde(default)]
    pub timing: TimeWindow,
}

fn default_enabled() -> bool {
    true
}

impl Default for TextLayer {
    fn default() -> Self {
        Self {
            text: String::new(),
            enabled: true,
            position: OverlayPosition::CENTER,
            style: TextStyle::default(),
            timing: TimeWindow::default(),
        }
    }
}

impl TextLayer {
    /// Vertical spacing between successive default layers, in percent.
    pub const STACK_OFFSET_PERCENT: f64 = 15.0;

    /// A default layer for the given stack slot, nudged down so layers don't overlap.
    pub fn for_slot(index: usize) -> Self {
        Self {
            position: OverlayPosition::new(50.0, 50.0 + index as f64 * Self::STACK_OFFSET_PERCENT),
            ..Self::default()
        }
    }

    /// A layer with the given text at the given position, default style otherwise.
    pub fn with_text(text: impl Into<String>, position: OverlayPosition) -> Self {
        Self {
            text: text.into(),
            position,
            ..Self::default()
        }
    }

    /// Enabled and carrying non-blank text.
    pub fn is_visible(&self) -> bool {
        self.enabled && !self.text.trim().is_empty()
    }

    /// Whether the layer should be drawn at `t` seconds into a video.
    pub fn is_visible_at(&self, t: f64) -> bool {
        self.is_visible() && self.timing.contains(t)
    }

    /// Human-readable problems that would make the output look wrong.
    /// None of them stop compilation.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = vec![];
        if self.style.font_size == 0 {
            issues.push("font size must be greater than 0".to_string());
        }
        if self.style.font_family.trim().is_empty() {
            issues.push("font family is empty".to_string());
        }
        if !self.style.color.is_valid() {
            issues.push(format!("text color '{}' is not a hex color", self.style.color));
        }
        if self.style.stroke.is_active() && !self.style.stroke.color.is_valid() {
            issues.push(format!(
                "stroke color '{}' is not a hex color",
                self.style.stroke.color
            ));
        }
        issues.extend(self.timing.issues());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layer_matches_editor() {
        let layer = TextLayer::default();
        assert_eq!(layer.style.font_family, "Mitr");
        assert_eq!(layer.style.font_size, 70);
        assert_eq!(layer.style.color.as_str(), "FFDD17");
        assert_eq!(layer.style.stroke.color.as_str(), "17539F");
        assert!(!layer.style.curve.enabled);
        assert!((layer.style.curve.angle - 40.0).abs() < 1e-9);
        assert!(layer.enabled);
        assert!(!layer.is_visible());
    }

    #[test]
    fn test_for_slot_stacks_down() {
        assert_eq!(TextLayer::for_slot(0).position.y, 50.0);
        assert_eq!(TextLayer::for_slot(2).position.y, 80.0);
    }

    #[test]
    fn test_blank_text_is_inert() {
        let mut layer = TextLayer::with_text("   ", OverlayPosition::CENTER);
        assert!(!layer.is_visible());
        layer.text = "Hi".to_string();
        assert!(layer.is_visible());
        layer.enabled = false;
        assert!(!layer.is_visible());
    }

    #[test]
    fn test_time_window() {
        let open = TimeWindow::default();
        assert!(open.is_default());
        assert!(open.contains(1_000.0));

        let window = TimeWindow::new(2.0, Some(5.0));
        assert!(!window.is_default());
        assert!(!window.contains(1.9));
        assert!(window.contains(2.0));
        assert!(!window.contains(5.0));
        assert!(TimeWindow::new(1.5, None).contains(99.0));
    }

    #[test]
    fn test_issues() {
        let mut layer = TextLayer::with_text("x", OverlayPosition::CENTER);
        assert!(layer.issues().is_empty());

        layer.style.font_size = 0;
        layer.timing = TimeWindow::new(4.0, Some(3.0));
        let issues = layer.issues();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("font size"));
        assert!(issues[1].contains("end time"));
    }

    #[test]
    fn test_partial_layer_deserializes_with_defaults() {
        let layer: TextLayer =
            serde_json::from_str(r#"{ "text": "SALE", "style": { "font_family": "Kanit" } }"#)
                .unwrap();
        assert!(layer.enabled);
        assert_eq!(layer.style.font_family, "Kanit");
        assert_eq!(layer.style.font_size, 70);
        assert_eq!(layer.position, OverlayPosition::CENTER);
    }
}
