//! Backend-neutral display list of one preview frame.

/// Axis-aligned rectangle in media pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One preview frame, painted back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    /// Text operations in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn logo(&self) -> Option<(&Rect, Option<&str>)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Logo { rect, href } => Some((rect, href.as_deref())),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Base media, stretched to the full frame.
    Media { href: Option<String> },

    /// Logo image; `href` is `None` when only the asset id is known.
    Logo { rect: Rect, href: Option<String> },

    Text(TextOp),
}

/// Horizontal anchoring of a text run at its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub text: String,
    /// Anchor point in media pixels.
    pub x: f64,
    pub y: f64,
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub anchor: TextAnchor,
    /// `#RRGGBB`.
    pub fill: String,
    pub letter_spacing: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
    pub stroke: Option<StrokeOp>,
    pub shadow: Option<ShadowOp>,
    pub arc: Option<ArcPath>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOp {
    pub color: String,
    pub line_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowOp {
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Circular arc the text follows, passing through the text point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub radius: f64,
    pub start: (f64, f64),
    pub end: (f64, f64),
    /// SVG sweep flag: clockwise on screen.
    pub clockwise: bool,
    pub large_arc: bool,
}
