//! Show configuration, font catalog, and document issues.

use std::path::Path;

use studio_common::AppConfig;
use studio_overlay_model::OverlayDocument;

pub fn run(config: &AppConfig, doc: &Path) -> anyhow::Result<()> {
    println!("Overlay Studio Check");
    println!("{}", "=".repeat(50));

    println!("Config file: {}", AppConfig::path().display());
    if config.cloud.cloud_name.trim().is_empty() {
        println!("[WARN] Cloud name: not set (OVERLAY_CLOUD_NAME)");
    } else {
        println!("[OK] Cloud name: {}", config.cloud.cloud_name);
    }
    println!("[OK] Upload preset: {}", config.cloud.upload_preset);
    if config.webhook.is_enabled() {
        println!("[OK] Webhook: {}", config.webhook.url);
    } else {
        println!("[--] Webhook: disabled");
    }
    println!(
        "[OK] Max upload: {} MiB",
        config.app.max_file_size / (1024 * 1024)
    );
    println!("[OK] Template store: {}", config.store.data_dir.display());
    println!();

    let fonts: Vec<&str> = config.fonts.all().collect();
    println!("Fonts ({}): {}", fonts.len(), fonts.join(", "));
    println!();

    if !doc.exists() {
        println!("No document at {}", doc.display());
        return Ok(());
    }

    let document = OverlayDocument::load(doc)?;
    println!(
        "Document: {} ({}, {} layer(s))",
        doc.display(),
        document.kind().resource_type(),
        document.len()
    );

    let mut issues = document.issues();
    for (index, (_, layer)) in document.layers().enumerate() {
        if !config.fonts.contains(&layer.style.font_family) {
            issues.push(format!(
                "layer {}: font '{}' is not in the catalog",
                index + 1,
                layer.style.font_family
            ));
        }
    }
    if !document.has_visible_text() {
        issues.push("no visible text layer; generate will be refused".to_string());
    }

    if issues.is_empty() {
        println!("No issues found. Ready to generate.");
    } else {
        for issue in &issues {
            println!("[WARN] {issue}");
        }
    }
    Ok(())
}
