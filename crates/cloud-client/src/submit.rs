//! Upload and generate, one at a time.
//!
//! A [`BusyFlag`] rejects a second request while one is in flight instead of
//! queueing it. The flag is released by [`BusyGuard`]'s `Drop`, so it clears
//! on success, on error, and on cancellation alike.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use studio_common::{AppConfig, CloudConfig};
use studio_overlay_model::{DocumentError, MediaRef, OverlayDocument};
use studio_transform_compiler::TransformCompiler;

use crate::launch::LaunchParams;
use crate::upload::{UploadClient, UploadError};
use crate::webhook::{WebhookClient, WebhookError, WebhookPayload};

/// Shared "request in flight" marker.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag, or `None` if it is already held.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(Arc::clone(&self.0)))
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Holds the [`BusyFlag`] until dropped.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Another request is still in progress")]
    Busy,

    #[error("No media uploaded")]
    NoMedia,

    #[error("Cloud name is not configured")]
    MissingCloudName,

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Webhook(#[from] WebhookError),
}

impl SubmitError {
    /// Caused by the request rather than the network.
    pub fn is_validation(&self) -> bool {
        match self {
            SubmitError::Busy | SubmitError::NoMedia | SubmitError::MissingCloudName => true,
            SubmitError::Document(e) => e.is_validation(),
            SubmitError::Upload(UploadError::Media(_)) => true,
            _ => false,
        }
    }
}

/// What happened to the webhook notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookStatus {
    Disabled,
    Delivered,
    Failed,
}

/// Webhook delivery running in the background after a generate.
///
/// Dropping it detaches the task; delivery still runs to completion or timeout.
#[derive(Debug)]
pub struct PendingWebhook(Option<JoinHandle<bool>>);

impl PendingWebhook {
    fn disabled() -> Self {
        Self(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Wait for the delivery to finish.
    pub async fn finish(self) -> WebhookStatus {
        match self.0 {
            None => WebhookStatus::Disabled,
            Some(handle) => match handle.await {
                Ok(true) => WebhookStatus::Delivered,
                Ok(false) => WebhookStatus::Failed,
                Err(e) => {
                    tracing::warn!(error = %e, "Webhook task did not complete");
                    WebhookStatus::Failed
                }
            },
        }
    }
}

/// Result of a successful generate. The URL is final as soon as this is
/// returned; the webhook may still be in flight.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub transformation: String,
    pub url: String,
    pub webhook: PendingWebhook,
}

/// Upload media and generate transformed URLs for one cloud account.
pub struct SubmitService {
    compiler: TransformCompiler,
    cloud: CloudConfig,
    app_version: String,
    uploader: UploadClient,
    webhook: Option<WebhookClient>,
    busy: BusyFlag,
}

impl SubmitService {
    pub fn from_config(config: &AppConfig) -> Result<Self, SubmitError> {
        Ok(Self {
            compiler: TransformCompiler::new(config.compiler),
            cloud: config.cloud.clone(),
            app_version: config.app.version.clone(),
            uploader: UploadClient::new(config.cloud.clone(), config.app.clone()),
            webhook: WebhookClient::from_config(&config.webhook)?,
            busy: BusyFlag::new(),
        })
    }

    pub fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    /// Upload base media.
    pub async fn upload_media(&self, path: &Path) -> Result<MediaRef, SubmitError> {
        let _guard = self.busy.try_acquire().ok_or(SubmitError::Busy)?;
        Ok(self.uploader.upload_media(path).await?)
    }

    /// Upload a logo image.
    pub async fn upload_logo(&self, path: &Path) -> Result<MediaRef, SubmitError> {
        let _guard = self.busy.try_acquire().ok_or(SubmitError::Busy)?;
        Ok(self.uploader.upload_logo(path).await?)
    }

    /// Compile the document into a delivery URL and start the webhook
    /// notification in the background.
    ///
    /// Requires at least one visible layer. Returns without waiting for the
    /// webhook, whose result never turns a successful generate into an error.
    pub async fn generate(
        &self,
        document: &OverlayDocument,
        launch: &LaunchParams,
    ) -> Result<GenerateOutcome, SubmitError> {
        let _guard = self.busy.try_acquire().ok_or(SubmitError::Busy)?;

        if document.asset_id().trim().is_empty() {
            return Err(SubmitError::NoMedia);
        }
        document.ensure_visible_text()?;
        if self.cloud.cloud_name.trim().is_empty() {
            return Err(SubmitError::MissingCloudName);
        }

        let transformation = self.compiler.compile(document);
        let url = studio_transform_compiler::upload_url(&self.cloud, document.kind(), &transformation);
        tracing::info!(asset = document.asset_id(), %url, "Generated transformed media URL");

        let webhook = match &self.webhook {
            None => PendingWebhook::disabled(),
            Some(client) => {
                let client = client.clone();
                let payload = WebhookPayload::describe(document, launch, &self.app_version, &url);
                PendingWebhook(Some(tokio::spawn(async move { client.notify(&payload).await })))
            }
        };

        Ok(GenerateOutcome {
            transformation,
            url,
            webhook,
        })
    }
}
