//! Subcommand implementations.

use std::path::Path;

use studio_overlay_model::{LayerId, OverlayDocument};

pub mod anchor;
pub mod check;
pub mod compile;
pub mod generate;
pub mod init;
pub mod layer;
pub mod logo;
pub mod preset;
pub mod preview;
pub mod template;
pub mod upload;

/// Load the document file, pointing at `upload`/`init` when it is missing.
pub fn load_document(path: &Path) -> anyhow::Result<OverlayDocument> {
    if !path.exists() {
        anyhow::bail!(
            "No document at {}. Run `overlay-studio upload <FILE>` or `overlay-studio init <ASSET_ID>` first.",
            path.display()
        );
    }
    OverlayDocument::load(path).map_err(|e| anyhow::anyhow!("Failed to load document: {e}"))
}

pub fn save_document(path: &Path, document: &OverlayDocument) -> anyhow::Result<()> {
    document
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to save document: {e}"))
}

/// Resolve a 1-based layer index.
pub fn layer_id(document: &OverlayDocument, index: usize) -> anyhow::Result<LayerId> {
    index
        .checked_sub(1)
        .and_then(|i| document.id_at(i))
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No layer {index}: the document has {} layer(s)",
                document.len()
            )
        })
}
