//! Unsigned multipart upload to the remote media service.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use studio_common::{AppSettings, CloudConfig};
use studio_overlay_model::{validate_media_file, MediaError, MediaKind, MediaRef};

/// Errors from the upload endpoint.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Cloud name is not configured")]
    MissingCloudName,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Upload failed ({status}): {body}")]
    ApiError { status: u16, body: String },
}

/// Fields of the upload response the studio relies on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub public_id: String,
    pub secure_url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub resource_type: Option<String>,
}

impl UploadResponse {
    /// Media reference for a new document.
    pub fn into_media_ref(self, kind: MediaKind) -> MediaRef {
        MediaRef {
            asset_id: self.public_id,
            kind,
            delivery_url: self.secure_url,
            width: self.width,
            height: self.height,
            duration_secs: self.duration,
        }
    }
}

/// HTTP client for the upload API of one cloud account.
pub struct UploadClient {
    client: reqwest::Client,
    cloud: CloudConfig,
    limits: AppSettings,
}

impl UploadClient {
    pub fn new(cloud: CloudConfig, limits: AppSettings) -> Self {
        Self::with_client(reqwest::Client::new(), cloud, limits)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, cloud: CloudConfig, limits: AppSettings) -> Self {
        Self {
            client,
            cloud,
            limits,
        }
    }

    /// `POST` target for the given kind.
    pub fn endpoint(&self, kind: MediaKind) -> String {
        format!(
            "{}/v1_1/{}/{}/upload",
            self.cloud.api_host.trim_end_matches('/'),
            self.cloud.cloud_name,
            kind.resource_type()
        )
    }

    /// Folder label the upload is filed under.
    pub fn folder(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Image => &self.cloud.image_folder,
            MediaKind::Video => &self.cloud.video_folder,
        }
    }

    /// Validate and upload base media (image or video).
    pub async fn upload_media(&self, path: &Path) -> Result<MediaRef, UploadError> {
        self.upload(path, None).await
    }

    /// Validate and upload a logo, which must be an image.
    pub async fn upload_logo(&self, path: &Path) -> Result<MediaRef, UploadError> {
        self.upload(path, Some(MediaKind::Image)).await
    }

    async fn upload(&self, path: &Path, expected: Option<MediaKind>) -> Result<MediaRef, UploadError> {
        if self.cloud.cloud_name.trim().is_empty() {
            return Err(UploadError::MissingCloudName);
        }
        let media = validate_media_file(path, &self.limits, expected)?;
        let bytes = tokio::fs::read(&media.path)
            .await
            .map_err(|e| UploadError::Io {
                path: media.path.clone(),
                source: e,
            })?;

        let file_name = media
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(media.mime)?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.cloud.upload_preset.clone())
            .text("folder", self.folder(media.kind).to_string());
        if media.kind.is_video() {
            form = form.text("resource_type", "video");
        }

        tracing::info!(
            path = %media.path.display(),
            kind = media.kind.resource_type(),
            size = media.size,
            "Uploading media"
        );

        let response = self
            .client
            .post(self.endpoint(media.kind))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(UploadError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let uploaded: UploadResponse = response.json().await?;
        tracing::info!(public_id = %uploaded.public_id, "Upload complete");
        Ok(uploaded.into_media_ref(media.kind))
    }
}
