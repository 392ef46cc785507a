//! Typed transformation segments and their wire rendering.

use std::fmt;

use studio_overlay_model::{Anchor, MediaKind, TimeWindow};

/// One slash-separated component of a transformation string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Square crop-fill of the base media: `c_fill,g_auto,w_<S>,h_<S>`.
    Base { size: u32 },

    /// Logo image declaration: `l_<id>,w_<width>`.
    Logo { overlay_id: String, width: u32 },

    /// Text declaration: `l_text:<style>:<text>,co_rgb:<color>`.
    Text {
        style: String,
        encoded_text: String,
        color: String,
    },

    /// `e_outline:<mode>:<width>:0,co_rgb:<color>`.
    Outline {
        mode: OutlineMode,
        width: u32,
        color: String,
    },

    /// `e_distort:arc:<degrees>`.
    Arc { degrees: f64 },

    /// `e_shadow:<blur>,x_<dx>,y_<dy>,co_rgb:<color>`.
    Shadow {
        blur: f64,
        offset_x: f64,
        offset_y: f64,
        color: String,
    },

    /// `a_<degrees>`.
    Rotate { degrees: f64 },

    /// `so_<start>` and/or `eo_<end>`, comma-joined.
    Timing { start: Option<f64>, end: Option<f64> },

    /// Commit the pending overlay: `fl_layer_apply,g_<anchor>[,x_<dx>][,y_<dy>]`.
    Apply {
        anchor: Anchor,
        offset_x: i64,
        offset_y: i64,
    },
}

/// Which side of the glyph edge an outline pass paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineMode {
    Outer,
    Inner,
}

impl OutlineMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutlineMode::Outer => "outer",
            OutlineMode::Inner => "inner",
        }
    }
}

impl Segment {
    /// Timing clause for a layer window; `None` when it covers the whole media.
    pub fn layer_timing(window: &TimeWindow) -> Option<Segment> {
        if window.is_default() {
            return None;
        }
        Some(Segment::Timing {
            start: (window.start_time > 0.0).then_some(window.start_time),
            end: window.end_time,
        })
    }

    /// Timing clause for the logo, which always carries an explicit start.
    pub fn logo_timing(window: &TimeWindow) -> Segment {
        Segment::Timing {
            start: Some(window.start_time.max(0.0)),
            end: window.end_time,
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Base { .. } => "base",
            Segment::Logo { .. } => "logo",
            Segment::Text { .. } => "text",
            Segment::Outline { .. } => "outline",
            Segment::Arc { .. } => "arc",
            Segment::Shadow { .. } => "shadow",
            Segment::Rotate { .. } => "rotate",
            Segment::Timing { .. } => "timing",
            Segment::Apply { .. } => "apply",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Base { size } => write!(f, "c_fill,g_auto,w_{size},h_{size}"),
            Segment::Logo { overlay_id, width } => write!(f, "l_{overlay_id},w_{width}"),
            Segment::Text {
                style,
                encoded_text,
                color,
            } => write!(f, "l_text:{style}:{encoded_text},co_rgb:{color}"),
            Segment::Outline { mode, width, color } => {
                write!(f, "e_outline:{}:{width}:0,co_rgb:{color}", mode.as_str())
            }
            Segment::Arc { degrees } => write!(f, "e_distort:arc:{}", format_tenths(*degrees)),
            Segment::Shadow {
                blur,
                offset_x,
                offset_y,
                color,
            } => write!(
                f,
                "e_shadow:{},x_{},y_{},co_rgb:{color}",
                format_number(*blur),
                format_number(*offset_x),
                format_number(*offset_y)
            ),
            Segment::Rotate { degrees } => write!(f, "a_{}", format_number(*degrees)),
            Segment::Timing { start, end } => {
                let parts: Vec<String> = start
                    .map(|s| format!("so_{}", format_number(s)))
                    .into_iter()
                    .chain(end.map(|e| format!("eo_{}", format_number(e))))
                    .collect();
                f.write_str(&parts.join(","))
            }
            Segment::Apply {
                anchor,
                offset_x,
                offset_y,
            } => {
                write!(f, "fl_layer_apply,g_{anchor}")?;
                if *offset_x != 0 {
                    write!(f, ",x_{offset_x}")?;
                }
                if *offset_y != 0 {
                    write!(f, ",y_{offset_y}")?;
                }
                Ok(())
            }
        }
    }
}

/// Shortest decimal form: `3`, `2.5`, `0.1`. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// One decimal place, without a `-0.0` for values that round to zero.
fn format_tenths(value: f64) -> String {
    let formatted = format!("{value:.1}");
    match formatted.as_str() {
        "-0.0" => "0.0".to_string(),
        _ => formatted,
    }
}

/// A compiled transformation: ordered segments plus the delivered asset.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    pub segments: Vec<Segment>,
    pub asset_id: String,
    pub kind: MediaKind,
}

impl Transformation {
    /// Number of segments of the given kind.
    pub fn count(&self, kind: &str) -> usize {
        self.segments.iter().filter(|s| s.kind() == kind).count()
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        write!(
            f,
            "/{}.{}",
            self.asset_id,
            self.kind.delivery_extension()
        )
    }
}
