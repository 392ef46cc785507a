//! Named style templates kept in the local store.

use std::path::Path;

use studio_common::{AppConfig, LocalStore};
use studio_overlay_model::TemplateStore;

use crate::TemplateAction;

pub fn run(config: &AppConfig, doc: &Path, action: TemplateAction) -> anyhow::Result<()> {
    let store = TemplateStore::new(LocalStore::open(&config.store.data_dir));

    match action {
        TemplateAction::Save { name, layer } => {
            let document = super::load_document(doc)?;
            let id = super::layer_id(&document, layer)?;
            let source = document
                .layer(&id)
                .ok_or_else(|| anyhow::anyhow!("No layer {layer}"))?;
            let template = store.save(&name, source)?;
            println!(
                "Saved template \"{}\" ({} {}px #{})",
                template.name, template.style.font_family, template.style.font_size, template.style.color
            );
        }
        TemplateAction::List => {
            let templates = store.list()?;
            if templates.is_empty() {
                println!("No saved templates");
                return Ok(());
            }
            println!("Templates ({}):", templates.len());
            for template in &templates {
                let style = &template.style;
                println!(
                    "  {:<20} {} {}px #{}{}{}",
                    template.name,
                    style.font_family,
                    style.font_size,
                    style.color,
                    if style.is_bold() { " bold" } else { "" },
                    if style.curve.enabled { " curved" } else { "" }
                );
            }
        }
        TemplateAction::Apply { name, layer } => {
            let mut document = super::load_document(doc)?;
            let id = super::layer_id(&document, layer)?;
            store.apply(&mut document, &id, &name)?;
            super::save_document(doc, &document)?;
            println!("Applied template \"{name}\" to layer {layer}");
        }
    }

    Ok(())
}
