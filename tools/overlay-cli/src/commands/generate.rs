//! Build the final transformed URL and notify the webhook.

use std::path::Path;

use studio_cloud_client::{LaunchParams, SubmitService, WebhookStatus};
use studio_common::AppConfig;

pub async fn run(
    config: &AppConfig,
    doc: &Path,
    launch_url: Option<String>,
    user_id: Option<String>,
    security_code: Option<String>,
) -> anyhow::Result<()> {
    let document = super::load_document(doc)?;

    let from_url = match launch_url {
        Some(url) => LaunchParams::from_url(&url)?,
        None => LaunchParams::default(),
    };
    let launch = LaunchParams::new(
        user_id.or(from_url.user_id),
        security_code.or(from_url.security_code),
    );

    let service = SubmitService::from_config(config)?;
    let outcome = service.generate(&document, &launch).await?;

    println!("Transformed {}:", document.kind().resource_type());
    println!("  {}", outcome.url);
    println!();
    if outcome.webhook.is_enabled() {
        println!("Notifying webhook...");
    }
    match outcome.webhook.finish().await {
        WebhookStatus::Delivered => println!("Webhook notified."),
        WebhookStatus::Failed => println!("[WARN] Webhook delivery failed (see log); the URL above is still valid."),
        WebhookStatus::Disabled => println!("Webhook disabled (set OVERLAY_WEBHOOK_URL to enable)."),
    }
    tracing::debug!(transformation = %outcome.transformation, "Generate finished");
    Ok(())
}
