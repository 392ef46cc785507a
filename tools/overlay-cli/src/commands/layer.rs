//! Add, remove, list, and edit text layers.

use std::path::Path;

use studio_overlay_model::{
    position_preset, OverlayDocument, OverlayPosition, RgbColor, TextLayer, TimeWindow,
};

use crate::{LayerAction, LayerEdit};

pub fn run(doc: &Path, action: LayerAction) -> anyhow::Result<()> {
    let mut document = super::load_document(doc)?;

    match action {
        LayerAction::Add => {
            let id = document.add_layer()?;
            super::save_document(doc, &document)?;
            let index = document.index_of(&id).map_or(0, |i| i + 1);
            println!("Added layer {index} ({} of {})", document.len(), studio_overlay_model::MAX_TEXT_LAYERS);
        }
        LayerAction::Remove { index } => {
            let id = super::layer_id(&document, index)?;
            let removed = document.remove_layer(&id)?;
            super::save_document(doc, &document)?;
            println!("Removed layer {index} \"{}\"", removed.text);
        }
        LayerAction::List => print_layers(&document),
        LayerAction::Set(edit) => {
            let id = super::layer_id(&document, edit.index)?;
            let layer = document
                .layer_mut(&id)
                .ok_or_else(|| anyhow::anyhow!("No layer {}", edit.index))?;
            apply_edit(layer, &edit)?;
            for issue in layer.issues() {
                println!("[WARN] {issue}");
            }
            super::save_document(doc, &document)?;
            println!("Updated layer {}", edit.index);
        }
    }

    Ok(())
}

fn apply_edit(layer: &mut TextLayer, edit: &LayerEdit) -> anyhow::Result<()> {
    if let Some(key) = &edit.at {
        let preset = position_preset(key)
            .ok_or_else(|| anyhow::anyhow!("Unknown position preset: {key}"))?;
        layer.position = preset.position;
    }
    if edit.x.is_some() || edit.y.is_some() {
        layer.position = OverlayPosition::new(
            edit.x.unwrap_or(layer.position.x),
            edit.y.unwrap_or(layer.position.y),
        );
    }
    if let Some(text) = &edit.text {
        layer.text = text.clone();
    }
    if let Some(enabled) = edit.enabled {
        layer.enabled = enabled;
    }

    let style = &mut layer.style;
    if let Some(font) = &edit.font {
        style.font_family = font.clone();
    }
    if let Some(size) = edit.size {
        style.font_size = size;
    }
    if let Some(weight) = edit.weight {
        style.font_weight = weight.into();
    }
    if let Some(align) = edit.align {
        style.text_align = align.into();
    }
    if let Some(color) = &edit.color {
        style.color = RgbColor::new(color);
    }
    if let Some(width) = edit.stroke_width {
        style.stroke.width = width;
    }
    if let Some(color) = &edit.stroke_color {
        style.stroke.color = RgbColor::new(color);
    }
    if let Some(shadow) = edit.shadow {
        style.shadow.enabled = shadow;
    }
    if let Some(color) = &edit.shadow_color {
        style.shadow.color = RgbColor::new(color);
    }
    if let Some(blur) = edit.shadow_blur {
        style.shadow.blur = blur;
    }
    if let Some(x) = edit.shadow_x {
        style.shadow.offset_x = x;
    }
    if let Some(y) = edit.shadow_y {
        style.shadow.offset_y = y;
    }
    if let Some(curved) = edit.curved {
        style.curve.enabled = curved;
    }
    if let Some(angle) = edit.curve_angle {
        style.curve.angle = angle;
    }
    if let Some(rotation) = edit.rotation {
        style.rotation = rotation;
    }
    if let Some(spacing) = edit.letter_spacing {
        style.letter_spacing = spacing;
    }

    if edit.start.is_some() || edit.end.is_some() || edit.to_end {
        let end = if edit.to_end {
            None
        } else {
            edit.end.or(layer.timing.end_time)
        };
        layer.timing = TimeWindow::new(edit.start.unwrap_or(layer.timing.start_time), end);
    }

    Ok(())
}

fn print_layers(document: &OverlayDocument) {
    println!(
        "Layers ({} of {}), bottom to top:",
        document.len(),
        studio_overlay_model::MAX_TEXT_LAYERS
    );
    for (index, (_, layer)) in document.layers().enumerate() {
        let style = &layer.style;
        let state = if layer.is_visible() {
            ""
        } else if layer.enabled {
            " (blank)"
        } else {
            " (disabled)"
        };
        println!(
            "  {}. \"{}\"{state} at ({}, {}) {} {}px #{}",
            index + 1,
            layer.text,
            layer.position.x,
            layer.position.y,
            style.font_family,
            style.font_size,
            style.color
        );
        if document.kind().is_video() && !layer.timing.is_default() {
            let end = layer
                .timing
                .end_time
                .map(studio_common::format_timecode)
                .unwrap_or_else(|| "end".to_string());
            println!(
                "     visible {} to {end}",
                studio_common::format_timecode(layer.timing.start_time)
            );
        }
    }
    if let Some(logo) = document.logo() {
        println!(
            "  Logo: {} ({}px, {})",
            logo.asset_id, logo.width_px, logo.anchor.as_str()
        );
    }
}
