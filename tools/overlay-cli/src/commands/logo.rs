//! Place or remove the logo overlay.

use std::path::Path;

use studio_overlay_model::{LogoOverlay, TimeWindow};

use crate::LogoAction;

pub fn run(doc: &Path, action: LogoAction) -> anyhow::Result<()> {
    let mut document = super::load_document(doc)?;

    match action {
        LogoAction::Set {
            asset_id,
            width,
            anchor,
            start,
            end,
        } => {
            if width == 0 {
                anyhow::bail!("Logo width must be greater than 0");
            }
            let mut logo = LogoOverlay::new(asset_id.trim())
                .with_width(width)
                .with_anchor(anchor);
            logo.timing = TimeWindow::new(start.unwrap_or(0.0), end);
            // Keep the preview image when re-placing the same asset
            if let Some(previous) = document.logo().filter(|l| l.asset_id == logo.asset_id) {
                logo.preview_url = previous.preview_url.clone();
            }
            for issue in logo.issues() {
                println!("[WARN] {issue}");
            }
            document.set_logo(logo);
            super::save_document(doc, &document)?;
            println!("Logo placed at {} ({width}px)", anchor.as_str());
        }
        LogoAction::Clear => match document.clear_logo() {
            Some(removed) => {
                super::save_document(doc, &document)?;
                println!("Removed logo {}", removed.asset_id);
            }
            None => println!("Document has no logo"),
        },
    }

    Ok(())
}
