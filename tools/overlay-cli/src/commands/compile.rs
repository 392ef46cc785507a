//! Print the transformation string and delivery URL without submitting.

use std::path::Path;

use studio_common::AppConfig;
use studio_transform_compiler::TransformCompiler;

pub fn run(config: &AppConfig, doc: &Path) -> anyhow::Result<()> {
    let document = super::load_document(doc)?;
    if !document.has_visible_text() {
        println!("[WARN] No visible text layer; the result carries no text.");
    }

    let compiler = TransformCompiler::new(config.compiler);
    let plan = compiler.plan(&document);

    println!("Segments:");
    for segment in &plan.segments {
        println!("  {:<8} {segment}", segment.kind());
    }
    println!();
    println!("Transformation: {plan}");

    if config.cloud.cloud_name.trim().is_empty() {
        println!("URL: (set OVERLAY_CLOUD_NAME to build the delivery URL)");
    } else {
        println!("URL: {}", compiler.delivery_url(&config.cloud, &document));
    }
    Ok(())
}
