//! Base media references and upload validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use studio_common::AppSettings;

/// Image or video. Decides endpoints, folders, extensions, and which
/// layer fields are honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Resource type segment used in upload and delivery URLs.
    pub fn resource_type(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// File extension of the delivered result.
    pub fn delivery_extension(self) -> &'static str {
        match self {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
        }
    }

    pub fn is_video(self) -> bool {
        self == MediaKind::Video
    }

    /// Classify a MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(format!("Unknown media kind: {other}. Use: image, video")),
        }
    }
}

/// The uploaded base media a document is built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Remote asset identifier returned by the upload.
    pub asset_id: String,

    pub kind: MediaKind,

    /// Canonical delivery URL of the untransformed asset.
    #[serde(default)]
    pub delivery_url: String,

    /// Intrinsic size, when reported by the upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Duration for videos, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

impl MediaRef {
    pub fn new(asset_id: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            asset_id: asset_id.into(),
            kind,
            delivery_url: String::new(),
            width: None,
            height: None,
            duration_secs: None,
        }
    }

    pub fn with_delivery_url(mut self, url: impl Into<String>) -> Self {
        self.delivery_url = url.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Reasons a local file is refused before upload.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Unsupported file type: {mime}")]
    UnsupportedType { mime: String },

    #[error("File too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Expected {expected:?} file, got {actual:?}")]
    WrongKind {
        expected: MediaKind,
        actual: MediaKind,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A local file that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMedia {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub mime: &'static str,
    pub size: u64,
}

/// MIME type guessed from the file extension.
pub fn detect_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => return None,
    };
    Some(mime)
}

/// Check type and size of a local file against the configured limits.
///
/// `expected` restricts the accepted kind (the logo must be an image).
pub fn validate_media_file(
    path: &Path,
    settings: &AppSettings,
    expected: Option<MediaKind>,
) -> Result<ValidatedMedia, MediaError> {
    if !path.exists() {
        return Err(MediaError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mime = detect_mime(path).ok_or_else(|| MediaError::UnsupportedType {
        mime: path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_else(|| "unknown".to_string()),
    })?;

    let supported = settings
        .supported_image_types
        .iter()
        .chain(settings.supported_video_types.iter())
        .any(|m| m == mime);
    let kind = MediaKind::from_mime(mime).filter(|_| supported).ok_or_else(|| {
        MediaError::UnsupportedType {
            mime: mime.to_string(),
        }
    })?;

    if let Some(expected) = expected {
        if expected != kind {
            return Err(MediaError::WrongKind {
                expected,
                actual: kind,
            });
        }
    }

    let size = std::fs::metadata(path)
        .map_err(|e| MediaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    if size > settings.max_file_size {
        return Err(MediaError::TooLarge {
            size,
            max: settings.max_file_size,
        });
    }

    Ok(ValidatedMedia {
        path: path.to_path_buf(),
        kind,
        mime,
        size,
    })
}
