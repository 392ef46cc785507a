//! Start a document for media that is already uploaded.

use std::path::Path;

use studio_overlay_model::{MediaKind, MediaRef, OverlayDocument};

pub fn run(
    doc: &Path,
    asset_id: String,
    kind: MediaKind,
    url: Option<String>,
    size: Option<(u32, u32)>,
) -> anyhow::Result<()> {
    if asset_id.trim().is_empty() {
        anyhow::bail!("Asset id must not be empty");
    }

    let mut media = MediaRef::new(asset_id.trim(), kind);
    if let Some(url) = url {
        media = media.with_delivery_url(url);
    }
    if let Some((width, height)) = size {
        media = media.with_size(width, height);
    }

    let document = OverlayDocument::new(media);
    super::save_document(doc, &document)?;

    println!("Created {} document at {}", kind.resource_type(), doc.display());
    println!("  Asset: {}", document.asset_id());
    println!("  Layers: {}", document.len());
    println!();
    println!("Next: overlay-studio layer set 1 --text \"...\"");
    Ok(())
}
