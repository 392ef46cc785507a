//! Built-in style presets for common e-commerce overlays.

use crate::color::RgbColor;
use crate::layer::{FontWeight, TextStyle};

/// A built-in style. Only the fields it names are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    pub key: &'static str,
    pub label: &'static str,
    pub font_family: &'static str,
    pub font_size: u32,
    pub color: &'static str,
    pub font_weight: FontWeight,
}

pub const STYLE_PRESETS: [StylePreset; 5] = [
    StylePreset {
        key: "sale-badge",
        label: "Sale badge",
        font_family: "Kanit",
        font_size: 48,
        color: "FFFFFF",
        font_weight: FontWeight::Bold,
    },
    StylePreset {
        key: "price-tag",
        label: "Price tag",
        font_family: "Mitr",
        font_size: 36,
        color: "2C3E50",
        font_weight: FontWeight::Bold,
    },
    StylePreset {
        key: "watermark",
        label: "Watermark",
        font_family: "Arial",
        font_size: 16,
        color: "000000",
        font_weight: FontWeight::Normal,
    },
    StylePreset {
        key: "header",
        label: "Header",
        font_family: "Kanit",
        font_size: 40,
        color: "FFFFFF",
        font_weight: FontWeight::Bold,
    },
    StylePreset {
        key: "cta-button",
        label: "Call to action",
        font_family: "Prompt",
        font_size: 32,
        color: "FFFFFF",
        font_weight: FontWeight::Bold,
    },
];

/// Look up a preset by key.
pub fn style_preset(key: &str) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|p| p.key == key)
}

impl StylePreset {
    /// `base` with the preset's font, size, color, and weight applied.
    pub fn apply_to(&self, base: &TextStyle) -> TextStyle {
        TextStyle {
            font_family: self.font_family.to_string(),
            font_size: self.font_size,
            color: RgbColor::new(self.color),
            font_weight: self.font_weight,
            ..base.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(style_preset("sale-badge").unwrap().font_size, 48);
        assert!(style_preset("nope").is_none());
    }

    #[test]
    fn test_apply_keeps_unrelated_fields() {
        let mut base = TextStyle::default();
        base.stroke.width = 4;
        base.curve.enabled = true;

        let styled = style_preset("price-tag").unwrap().apply_to(&base);
        assert_eq!(styled.font_family, "Mitr");
        assert_eq!(styled.color.as_str(), "2C3E50");
        assert!(styled.is_bold());
        assert_eq!(styled.stroke.width, 4);
        assert!(styled.curve.enabled);
    }
}
