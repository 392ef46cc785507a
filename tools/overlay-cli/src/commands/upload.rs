//! Upload base media or a logo.

use std::path::{Path, PathBuf};

use studio_cloud_client::SubmitService;
use studio_common::AppConfig;
use studio_overlay_model::{LogoOverlay, OverlayDocument};

pub async fn run(config: &AppConfig, doc: &Path, file: PathBuf, logo: bool) -> anyhow::Result<()> {
    let service = SubmitService::from_config(config)?;

    if logo {
        let mut document = super::load_document(doc)?;
        println!("Uploading logo {}...", file.display());
        let media = service.upload_logo(&file).await?;
        let mut overlay = LogoOverlay::new(&media.asset_id);
        overlay.preview_url = Some(media.delivery_url.clone()).filter(|u| !u.is_empty());
        if let Some(previous) = document.logo() {
            overlay.width_px = previous.width_px;
            overlay.anchor = previous.anchor;
            overlay.timing = previous.timing;
        }
        document.set_logo(overlay);
        super::save_document(doc, &document)?;
        println!("Logo set: {}", media.asset_id);
        return Ok(());
    }

    println!("Uploading {}...", file.display());
    let media = service.upload_media(&file).await?;
    let document = OverlayDocument::new(media);
    super::save_document(doc, &document)?;

    let media = document.media();
    println!("Upload complete:");
    println!("  Asset: {}", media.asset_id);
    println!("  Type: {}", media.kind.resource_type());
    println!("  URL: {}", media.delivery_url);
    if let (Some(w), Some(h)) = (media.width, media.height) {
        println!("  Size: {w}x{h}");
    }
    if let Some(duration) = media.duration_secs {
        println!("  Duration: {}", studio_common::format_timecode(duration));
    }
    println!("  Document: {}", doc.display());
    Ok(())
}
