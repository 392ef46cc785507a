//! Document → transformation string.

use studio_common::{CloudConfig, CompilerSettings};
use studio_overlay_model::{
    HorizontalBand, LogoOverlay, MediaKind, OverlayDocument, TextAlign, TextLayer, TextStyle,
    VerticalBand,
};

use crate::encode::encode_text;
use crate::resolve::resolve_anchor_with_scale;
use crate::segment::{OutlineMode, Segment, Transformation};

/// Outline color of the inner halo pass.
const HALO_INNER_COLOR: &str = "FFFFFF";

/// Stateless compiler parameterized by the canvas and offset constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformCompiler {
    settings: CompilerSettings,
}

impl TransformCompiler {
    pub fn new(settings: CompilerSettings) -> Self {
        Self { settings }
    }

    /// Build the ordered segment list for a document.
    ///
    /// Invisible layers (disabled or blank) are skipped. Callers that must not
    /// emit a text-less result check [`OverlayDocument::ensure_visible_text`] first.
    pub fn plan(&self, document: &OverlayDocument) -> Transformation {
        let kind = document.kind();
        let mut segments = vec![Segment::Base {
            size: self.settings.canvas_size,
        }];

        if let Some(logo) = document.logo() {
            self.push_logo(&mut segments, logo, kind);
        }

        let mut layers = 0usize;
        for (_, layer) in document.visible_layers() {
            self.push_layer(&mut segments, layer, kind);
            layers += 1;
        }

        let transformation = Transformation {
            segments,
            asset_id: document.asset_id().to_string(),
            kind,
        };
        tracing::debug!(
            segments = transformation.segments.len(),
            layers,
            logo = document.logo().is_some(),
            media = kind.resource_type(),
            "Compiled transformation"
        );
        transformation
    }

    /// The full transformation string, ending in `/<asset>.<ext>`.
    pub fn compile(&self, document: &OverlayDocument) -> String {
        self.plan(document).to_string()
    }

    /// Delivery URL of the transformed media.
    pub fn delivery_url(&self, cloud: &CloudConfig, document: &OverlayDocument) -> String {
        upload_url(cloud, document.kind(), &self.compile(document))
    }

    fn push_logo(&self, segments: &mut Vec<Segment>, logo: &LogoOverlay, kind: MediaKind) {
        segments.push(Segment::Logo {
            overlay_id: logo.overlay_id(),
            width: logo.width_px,
        });
        if kind.is_video() {
            segments.push(Segment::logo_timing(&logo.timing));
        }

        let pad = self.settings.logo_padding as i64;
        let offset_x = match logo.anchor.horizontal() {
            HorizontalBand::Middle => 0,
            HorizontalBand::West | HorizontalBand::East => pad,
        };
        let offset_y = match logo.anchor.vertical() {
            VerticalBand::Center => 0,
            VerticalBand::North | VerticalBand::South => pad,
        };
        segments.push(Segment::Apply {
            anchor: logo.anchor,
            offset_x,
            offset_y,
        });
    }

    fn push_layer(&self, segments: &mut Vec<Segment>, layer: &TextLayer, kind: MediaKind) {
        let style = &layer.style;
        segments.push(Segment::Text {
            style: style_token(style, kind),
            encoded_text: encode_text(&layer.text),
            color: style.color.as_str().to_string(),
        });

        if style.stroke.is_active() {
            let width = style.stroke.width;
            segments.push(Segment::Outline {
                mode: OutlineMode::Outer,
                width: width.saturating_mul(2),
                color: style.stroke.color.as_str().to_string(),
            });
            segments.push(Segment::Outline {
                mode: OutlineMode::Inner,
                width,
                color: HALO_INNER_COLOR.to_string(),
            });
        }

        if style.curve.enabled {
            segments.push(Segment::Arc {
                degrees: style.curve.angle,
            });
        }

        if style.shadow.enabled {
            segments.push(Segment::Shadow {
                blur: style.shadow.blur,
                offset_x: style.shadow.offset_x,
                offset_y: style.shadow.offset_y,
                color: style.shadow.color.as_str().to_string(),
            });
        }

        if !kind.is_video() && style.rotation != 0.0 {
            segments.push(Segment::Rotate {
                degrees: style.rotation,
            });
        }

        if kind.is_video() {
            segments.extend(Segment::layer_timing(&layer.timing));
        }

        let resolved = resolve_anchor_with_scale(layer.position, self.settings.offset_scale);
        segments.push(Segment::Apply {
            anchor: resolved.anchor,
            offset_x: resolved.offset_x,
            offset_y: resolved.offset_y,
        });
    }
}

/// Font token of a text segment, e.g. `Noto_Sans_Thai_bold_48_left_stroke`.
pub fn style_token(style: &TextStyle, kind: MediaKind) -> String {
    let mut token = style.font_family.trim().replace(' ', "_");
    if style.is_bold() {
        token.push_str("_bold");
    }
    token.push('_');
    token.push_str(&style.font_size.to_string());
    if style.text_align != TextAlign::Center {
        token.push('_');
        token.push_str(style.text_align.as_str());
    }
    if !kind.is_video() && style.letter_spacing != 0 {
        token.push_str(&format!("_letter_spacing_{}", style.letter_spacing));
    }
    if style.stroke.is_active() {
        token.push_str("_stroke");
    }
    token
}

/// `https://<delivery host>/<cloud>/<resource>/upload/<path>`.
pub fn upload_url(cloud: &CloudConfig, kind: MediaKind, path: &str) -> String {
    let host = cloud
        .delivery_host
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!(
        "https://{host}/{}/{}/upload/{}",
        cloud.cloud_name,
        kind.resource_type(),
        path.trim_start_matches('/')
    )
}
