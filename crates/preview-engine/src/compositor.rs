//! Document → [`Scene`].
//!
//! This is an approximation of what the remote service will produce. Exact
//! glyph metrics are unknown here, so text widths are estimated from the
//! character count.

use std::path::Path;

use studio_common::PreviewSettings;
use studio_overlay_model::{
    Anchor, HorizontalBand, LogoOverlay, OverlayDocument, TextAlign, TextLayer, VerticalBand,
};

use crate::scene::{ArcPath, DrawOp, Rect, Scene, ShadowOp, StrokeOp, TextAnchor, TextOp};
use crate::PreviewError;

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// The base media as the preview sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFrame {
    pub width: u32,
    pub height: u32,
    /// Where the preview can load the pixels from.
    pub href: Option<String>,
}

impl MediaFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            href: None,
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Read the intrinsic size of a local image.
    pub fn from_image_file(path: &Path) -> Result<Self, PreviewError> {
        let (width, height) = image::image_dimensions(path)?;
        Ok(Self::new(width, height).with_href(path.display().to_string()))
    }
}

/// Knobs that are not part of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposeOptions {
    pub logo_padding: f64,
    /// Logo height / width. Square when unknown.
    pub logo_aspect: f64,
    /// Playback position for video; `None` shows every visible layer.
    pub time: Option<f64>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self::from_settings(&PreviewSettings::default())
    }
}

impl ComposeOptions {
    pub fn from_settings(settings: &PreviewSettings) -> Self {
        Self {
            logo_padding: settings.logo_padding,
            logo_aspect: 1.0,
            time: None,
        }
    }
}

/// Build the frame: base media, then logo, then text layers in stacking order.
pub fn compose(
    document: &OverlayDocument,
    frame: &MediaFrame,
    options: &ComposeOptions,
) -> Result<Scene, PreviewError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(PreviewError::InvalidDimensions {
            width: frame.width,
            height: frame.height,
        });
    }
    let width = frame.width as f64;
    let height = frame.height as f64;
    let time = options.time.filter(|_| document.kind().is_video());

    let mut ops = vec![DrawOp::Media {
        href: frame.href.clone(),
    }];

    if let Some(logo) = document.logo() {
        if time.map_or(true, |t| logo.timing.contains(t)) {
            ops.push(DrawOp::Logo {
                rect: logo_rect(logo, width, height, options),
                href: logo.preview_url.clone(),
            });
        }
    }

    for (_, layer) in document.layers() {
        let shown = match time {
            Some(t) => layer.is_visible_at(t),
            None => layer.is_visible(),
        };
        if shown {
            ops.push(DrawOp::Text(text_op(layer, width, height, !document.kind().is_video())));
        }
    }

    Ok(Scene { width, height, ops })
}

/// Pixel rectangle of the logo: its anchor corner plus padding.
pub fn logo_rect(logo: &LogoOverlay, width: f64, height: f64, options: &ComposeOptions) -> Rect {
    let w = logo.width_px as f64;
    let aspect = if options.logo_aspect.is_finite() && options.logo_aspect > 0.0 {
        options.logo_aspect
    } else {
        1.0
    };
    let h = w * aspect;
    let pad = options.logo_padding;
    Rect {
        x: place(logo.anchor, width, w, pad, true),
        y: place(logo.anchor, height, h, pad, false),
        width: w,
        height: h,
    }
}

fn place(anchor: Anchor, extent: f64, size: f64, pad: f64, horizontal: bool) -> f64 {
    let edge = if horizontal {
        match anchor.horizontal() {
            HorizontalBand::West => -1,
            HorizontalBand::Middle => 0,
            HorizontalBand::East => 1,
        }
    } else {
        match anchor.vertical() {
            VerticalBand::North => -1,
            VerticalBand::Center => 0,
            VerticalBand::South => 1,
        }
    };
    match edge {
        -1 => pad,
        0 => (extent - size) / 2.0,
        _ => extent - size - pad,
    }
}

fn text_op(layer: &TextLayer, width: f64, height: f64, image_mode: bool) -> TextOp {
    let style = &layer.style;
    let (x, y) = layer.position.to_pixels(width, height);
    let font_size = style.font_size as f64;
    let letter_spacing = if image_mode {
        style.letter_spacing as f64
    } else {
        0.0
    };

    let arc = if style.curve.enabled {
        let estimated = estimate_text_width(&layer.text, font_size, letter_spacing);
        arc_path(x, y, estimated, style.curve.angle)
    } else {
        None
    };

    TextOp {
        text: layer.text.clone(),
        x,
        y,
        font_family: style.font_family.clone(),
        font_size,
        bold: style.is_bold(),
        anchor: match style.text_align {
            TextAlign::Left => TextAnchor::Start,
            TextAlign::Center => TextAnchor::Middle,
            TextAlign::Right => TextAnchor::End,
        },
        fill: style.color.to_css(),
        letter_spacing,
        rotation: if image_mode { style.rotation } else { 0.0 },
        stroke: style.stroke.is_active().then(|| StrokeOp {
            color: style.stroke.color.to_css(),
            line_width: style.stroke.width as f64 * 2.0,
        }),
        shadow: style.shadow.enabled.then(|| ShadowOp {
            color: style.shadow.color.to_css(),
            blur: style.shadow.blur,
            offset_x: style.shadow.offset_x,
            offset_y: style.shadow.offset_y,
        }),
        arc,
    }
}

/// Rough rendered width of a run of text.
pub fn estimate_text_width(text: &str, font_size: f64, letter_spacing: f64) -> f64 {
    let chars = text.chars().count() as f64;
    chars * font_size * GLYPH_WIDTH_FACTOR + (chars - 1.0).max(0.0) * letter_spacing
}

/// Arc spanning `text_width` and subtending `angle_deg`, centered on `(x, y)`.
///
/// Positive angles arch the text like a rainbow (ends below the middle),
/// negative angles sag it like a smile. A larger angle gives a smaller
/// radius. Returns `None` for a flat (zero) angle.
pub fn arc_path(x: f64, y: f64, text_width: f64, angle_deg: f64) -> Option<ArcPath> {
    let theta = angle_deg.abs().min(359.0).to_radians();
    if theta <= f64::EPSILON || !theta.is_finite() {
        return None;
    }
    let radius = text_width.max(1.0) / theta;
    let half = theta / 2.0;
    let dx = radius * half.sin();
    let rise = radius * (1.0 - half.cos());

    // The text point is the apex; ends drop below it for a positive angle.
    let end_y = if angle_deg > 0.0 { y + rise } else { y - rise };
    Some(ArcPath {
        radius,
        start: (x - dx, end_y),
        end: (x + dx, end_y),
        clockwise: angle_deg > 0.0,
        large_arc: theta > std::f64::consts::PI,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_overlay_model::{MediaKind, MediaRef, OverlayPosition, TimeWindow};

    fn doc_with(layer: TextLayer, kind: MediaKind) -> OverlayDocument {
        OverlayDocument::with_layer(MediaRef::new("asset", kind), layer)
    }

    #[test]
    fn test_frame_from_image_file_links_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.png");
        image::RgbImage::new(4, 3).save(&path).unwrap();

        let frame = MediaFrame::from_image_file(&path).unwrap();
        assert_eq!((frame.width, frame.height), (4, 3));
        assert_eq!(frame.href.as_deref(), Some(path.display().to_string().as_str()));
    }

    #[test]
    fn test_text_placed_by_percent() {
        let doc = doc_with(
            TextLayer::with_text("Hi", OverlayPosition::new(25.0, 75.0)),
            MediaKind::Image,
        );
        let scene = compose(&doc, &MediaFrame::new(800, 400), &ComposeOptions::default()).unwrap();
        let text = scene.texts().next().unwrap();
        assert!((text.x - 200.0).abs() < 1e-9);
        assert!((text.y - 300.0).abs() < 1e-9);
        assert_eq!(text.fill, "#FFDD17");
    }

    #[test]
    fn test_logo_below_text() {
        let mut doc = doc_with(
            TextLayer::with_text("Top", OverlayPosition::CENTER),
            MediaKind::Image,
        );
        doc.set_logo(LogoOverlay::new("logo").with_anchor(Anchor::SouthEast));
        let scene = compose(&doc, &MediaFrame::new(1000, 500), &ComposeOptions::default()).unwrap();

        assert!(matches!(scene.ops[0], DrawOp::Media { .. }));
        assert!(matches!(scene.ops[1], DrawOp::Logo { .. }));
        assert!(matches!(scene.ops[2], DrawOp::Text(_)));

        let (rect, _) = scene.logo().unwrap();
        assert_eq!(
            *rect,
            Rect {
                x: 1000.0 - 120.0 - 20.0,
                y: 500.0 - 120.0 - 20.0,
                width: 120.0,
                height: 120.0
            }
        );
    }

    #[test]
    fn test_logo_rect_center_and_aspect() {
        let logo = LogoOverlay::new("logo").with_width(100).with_anchor(Anchor::Center);
        let options = ComposeOptions {
            logo_aspect: 0.5,
            ..ComposeOptions::default()
        };
        let rect = logo_rect(&logo, 400.0, 300.0, &options);
        assert_eq!(rect.x, 150.0);
        assert_eq!(rect.height, 50.0);
        assert_eq!(rect.y, 125.0);
    }

    #[test]
    fn test_stroke_width_doubles() {
        let mut layer = TextLayer::with_text("Hi", OverlayPosition::CENTER);
        layer.style.stroke.width = 3;
        let scene = compose(
            &doc_with(layer, MediaKind::Image),
            &MediaFrame::new(100, 100),
            &ComposeOptions::default(),
        )
        .unwrap();
        assert_eq!(scene.texts().next().unwrap().stroke.as_ref().unwrap().line_width, 6.0);
    }

    #[test]
    fn test_larger_angle_curves_more() {
        let gentle = arc_path(0.0, 0.0, 300.0, 20.0).unwrap();
        let steep = arc_path(0.0, 0.0, 300.0, 120.0).unwrap();
        assert!(steep.radius < gentle.radius);
        assert!(steep.start.1 > gentle.start.1);
        assert!(arc_path(0.0, 0.0, 300.0, 0.0).is_none());
    }

    #[test]
    fn test_positive_angle_arches_like_rainbow() {
        // Screen y grows downward: a rainbow has its ends below the apex and
        // sweeps clockwise from the left end over the top to the right end.
        let arch = arc_path(100.0, 100.0, 200.0, 60.0).unwrap();
        assert!(arch.start.1 > 100.0);
        assert!(arch.end.1 > 100.0);
        assert!(arch.start.0 < arch.end.0);
        assert!(arch.clockwise);
    }

    #[test]
    fn test_negative_angle_sags_like_smile() {
        let arch = arc_path(100.0, 100.0, 200.0, 60.0).unwrap();
        let sag = arc_path(100.0, 100.0, 200.0, -60.0).unwrap();
        assert!(sag.start.1 < 100.0);
        assert!(sag.end.1 < 100.0);
        assert!(!sag.clockwise);
        assert!((arch.radius - sag.radius).abs() < 1e-9);
    }

    #[test]
    fn test_playback_time_filters_layers() {
        let mut layer = TextLayer::with_text("Later", OverlayPosition::CENTER);
        layer.timing = TimeWindow::new(5.0, Some(8.0));
        let doc = doc_with(layer, MediaKind::Video);
        let frame = MediaFrame::new(640, 360);

        let at = |t| ComposeOptions {
            time: Some(t),
            ..ComposeOptions::default()
        };
        assert_eq!(compose(&doc, &frame, &at(1.0)).unwrap().texts().count(), 0);
        assert_eq!(compose(&doc, &frame, &at(6.0)).unwrap().texts().count(), 1);
        assert_eq!(
            compose(&doc, &frame, &ComposeOptions::default()).unwrap().texts().count(),
            1
        );
    }

    #[test]
    fn test_video_ignores_rotation() {
        let mut layer = TextLayer::with_text("Spin", OverlayPosition::CENTER);
        layer.style.rotation = 30.0;
        let frame = MediaFrame::new(100, 100);
        let options = ComposeOptions::default();

        let image = compose(&doc_with(layer.clone(), MediaKind::Image), &frame, &options).unwrap();
        assert_eq!(image.texts().next().unwrap().rotation, 30.0);
        let video = compose(&doc_with(layer, MediaKind::Video), &frame, &options).unwrap();
        assert_eq!(video.texts().next().unwrap().rotation, 0.0);
    }

    #[test]
    fn test_zero_size_frame_rejected() {
        let doc = doc_with(TextLayer::default(), MediaKind::Image);
        assert!(matches!(
            compose(&doc, &MediaFrame::new(0, 10), &ComposeOptions::default()),
            Err(PreviewError::InvalidDimensions { .. })
        ));
    }
}
