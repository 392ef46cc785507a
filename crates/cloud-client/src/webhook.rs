//! Best-effort notification of the automation webhook.
//!
//! A failed delivery is logged and otherwise ignored; it never affects the
//! result the user sees. There is no retry.

use std::time::Duration;

use serde::Serialize;
use studio_common::WebhookConfig;
use studio_overlay_model::{LogoOverlay, OverlayDocument, TextLayer};

use crate::launch::LaunchParams;

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

/// JSON body posted to the webhook.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub timestamp: String,
    pub app_version: String,
    pub media_type: String,
    pub user_id: String,
    pub security_code: String,
    pub original_url: String,
    pub transformed_url: String,
    pub asset_id: String,
    pub text_layers: Vec<LayerEcho>,
    pub logo: Option<LogoEcho>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerEcho {
    pub text: String,
    pub enabled: bool,
    pub position: PositionEcho,
    pub style: StyleEcho,
    pub effects: EffectsEcho,
    pub timing: TimingEcho,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PositionEcho {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleEcho {
    pub font_family: String,
    pub font_size: u32,
    pub font_weight: String,
    pub text_align: String,
    pub color: String,
    pub stroke_width: u32,
    pub stroke_color: String,
    pub letter_spacing: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectsEcho {
    pub curved: bool,
    pub curve_angle: f64,
    pub rotation: f64,
    pub shadow: bool,
    pub shadow_color: String,
    pub shadow_blur: f64,
    pub shadow_x: f64,
    pub shadow_y: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimingEcho {
    pub start_time: f64,
    pub end_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoEcho {
    pub asset_id: String,
    pub width: u32,
    pub position: String,
    pub timing: TimingEcho,
}

impl From<&TextLayer> for LayerEcho {
    fn from(layer: &TextLayer) -> Self {
        let style = &layer.style;
        Self {
            text: layer.text.clone(),
            enabled: layer.enabled,
            position: PositionEcho {
                x: layer.position.x,
                y: layer.position.y,
            },
            style: StyleEcho {
                font_family: style.font_family.clone(),
                font_size: style.font_size,
                font_weight: if style.is_bold() { "bold" } else { "normal" }.to_string(),
                text_align: style.text_align.as_str().to_string(),
                color: style.color.as_str().to_string(),
                stroke_width: style.stroke.width,
                stroke_color: style.stroke.color.as_str().to_string(),
                letter_spacing: style.letter_spacing,
            },
            effects: EffectsEcho {
                curved: style.curve.enabled,
                curve_angle: style.curve.angle,
                rotation: style.rotation,
                shadow: style.shadow.enabled,
                shadow_color: style.shadow.color.as_str().to_string(),
                shadow_blur: style.shadow.blur,
                shadow_x: style.shadow.offset_x,
                shadow_y: style.shadow.offset_y,
            },
            timing: TimingEcho {
                start_time: layer.timing.start_time,
                end_time: layer.timing.end_time,
            },
        }
    }
}

impl From<&LogoOverlay> for LogoEcho {
    fn from(logo: &LogoOverlay) -> Self {
        Self {
            asset_id: logo.asset_id.clone(),
            width: logo.width_px,
            position: logo.anchor.as_str().to_string(),
            timing: TimingEcho {
                start_time: logo.timing.start_time,
                end_time: logo.timing.end_time,
            },
        }
    }
}

impl WebhookPayload {
    /// Describe a generated result. Every layer is echoed, visible or not.
    pub fn describe(
        document: &OverlayDocument,
        launch: &LaunchParams,
        app_version: &str,
        transformed_url: &str,
    ) -> Self {
        Self {
            timestamp: studio_common::now_iso8601(),
            app_version: app_version.to_string(),
            media_type: document.kind().resource_type().to_string(),
            user_id: launch.user_id_or_anonymous().to_string(),
            security_code: launch.security_code.clone().unwrap_or_default(),
            original_url: document.media().delivery_url.clone(),
            transformed_url: transformed_url.to_string(),
            asset_id: document.asset_id().to_string(),
            text_layers: document.layers().map(|(_, layer)| LayerEcho::from(layer)).collect(),
            logo: document.logo().map(LogoEcho::from),
        }
    }
}

/// Posts payloads to one configured webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// Client for the configured URL, or `None` when delivery is disabled.
    pub fn from_config(config: &WebhookConfig) -> Result<Option<Self>, WebhookError> {
        if !config.is_enabled() {
            return Ok(None);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Some(Self {
            client,
            url: config.url.trim().to_string(),
        }))
    }

    /// Single POST; non-2xx is an error.
    pub async fn deliver(&self, payload: &WebhookPayload) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    /// Deliver and swallow failures. Returns whether delivery succeeded.
    pub async fn notify(&self, payload: &WebhookPayload) -> bool {
        match self.deliver(payload).await {
            Ok(()) => {
                tracing::info!(url = %self.url, "Webhook delivered");
                true
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Webhook delivery failed");
                false
            }
        }
    }
}
