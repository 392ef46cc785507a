//! Built-in style presets.

use std::path::Path;

use studio_overlay_model::{style_preset, STYLE_PRESETS};

use crate::PresetAction;

pub fn run(doc: &Path, action: PresetAction) -> anyhow::Result<()> {
    match action {
        PresetAction::List => {
            println!("Style presets:");
            for preset in &STYLE_PRESETS {
                println!(
                    "  {:<12} {:<12} {} {}px #{}",
                    preset.key, preset.label, preset.font_family, preset.font_size, preset.color
                );
            }
        }
        PresetAction::Apply { key, layer } => {
            let preset =
                style_preset(&key).ok_or_else(|| anyhow::anyhow!("Unknown preset: {key}"))?;
            let mut document = super::load_document(doc)?;
            let id = super::layer_id(&document, layer)?;
            let current = document
                .layer(&id)
                .map(|l| l.style.clone())
                .ok_or_else(|| anyhow::anyhow!("No layer {layer}"))?;
            document.apply_style(&id, &preset.apply_to(&current))?;
            super::save_document(doc, &document)?;
            println!("Applied preset \"{}\" to layer {layer}", preset.label);
        }
    }
    Ok(())
}
