//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding [`CloudConfig::cloud_name`].
pub const ENV_CLOUD_NAME: &str = "OVERLAY_CLOUD_NAME";
/// Environment variable overriding [`CloudConfig::upload_preset`].
pub const ENV_UPLOAD_PRESET: &str = "OVERLAY_UPLOAD_PRESET";
/// Environment variable overriding [`WebhookConfig::url`].
pub const ENV_WEBHOOK_URL: &str = "OVERLAY_WEBHOOK_URL";

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote media service settings.
    pub cloud: CloudConfig,

    /// Automation webhook settings.
    pub webhook: WebhookConfig,

    /// Upload limits and app metadata.
    pub app: AppSettings,

    /// Transformation compiler constants.
    pub compiler: CompilerSettings,

    /// Local preview constants.
    pub preview: PreviewSettings,

    /// Where client-local state (style templates) is kept.
    pub store: StoreConfig,

    /// Font families offered to the user.
    pub fonts: FontCatalog,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Remote media service account and endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Account identifier used in both upload and delivery URLs.
    pub cloud_name: String,

    /// Unsigned upload profile name.
    pub upload_preset: String,

    /// Upload API base, e.g. `https://api.cloudinary.com`.
    pub api_host: String,

    /// Delivery host, e.g. `res.cloudinary.com`.
    pub delivery_host: String,

    /// Target folder label for image uploads.
    pub image_folder: String,

    /// Target folder label for video uploads.
    pub video_folder: String,
}

/// Webhook delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Target URL. Empty disables delivery.
    pub url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Upload limits and app metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Version string echoed to the webhook.
    pub version: String,

    /// Largest accepted upload in bytes.
    pub max_file_size: u64,

    /// Accepted image MIME types.
    pub supported_image_types: Vec<String>,

    /// Accepted video MIME types.
    pub supported_video_types: Vec<String>,
}

/// Constants used by the transformation compiler.
///
/// These are empirical values; keep them configurable instead of re-deriving them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Side length of the square output canvas in pixels.
    pub canvas_size: u32,

    /// Pixels per percentage point away from the center.
    pub offset_scale: f64,

    /// Edge padding applied to the logo placement, in pixels.
    pub logo_padding: u32,
}

/// Constants used by the local preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Edge padding applied to the logo in the preview, in pixels.
    pub logo_padding: f64,

    /// Redraw batching rate (Hz). 0 redraws synchronously on every mutation.
    pub batch_hz: u32,
}

/// Client-local storage location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the key-value store file.
    pub data_dir: PathBuf,
}

/// Font families offered in the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontCatalog {
    pub thai: Vec<String>,
    pub english: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "studio=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cloud: CloudConfig::default(),
            webhook: WebhookConfig::default(),
            app: AppSettings::default(),
            compiler: CompilerSettings::default(),
            preview: PreviewSettings::default(),
            store: StoreConfig::default(),
            fonts: FontCatalog::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            upload_preset: "upload-image".to_string(),
            api_host: "https://api.cloudinary.com".to_string(),
            delivery_host: "res.cloudinary.com".to_string(),
            image_folder: "text-overlay".to_string(),
            video_folder: "text-overlay-video".to_string(),
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: "1.1.0".to_string(),
            max_file_size: 50 * 1024 * 1024,
            supported_image_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            supported_video_types: vec!["video/mp4".to_string(), "video/webm".to_string()],
        }
    }
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            canvas_size: 1080,
            offset_scale: 10.0,
            logo_padding: 15,
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            logo_padding: 20.0,
            batch_hz: 0,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            thai: owned(&[
                "Mitr",
                "Kanit",
                "Prompt",
                "Sarabun",
                "Noto Sans Thai",
                "Chakra Petch",
                "Bai Jamjuree",
            ]),
            english: owned(&[
                "Arial",
                "Roboto",
                "Open Sans",
                "Montserrat",
                "Poppins",
                "Playfair Display",
            ]),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl FontCatalog {
    /// All families, Thai first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.thai.iter().chain(self.english.iter()).map(String::as_str)
    }

    /// Whether the family is part of the catalog. Informational only.
    pub fn contains(&self, family: &str) -> bool {
        self.all().any(|f| f == family)
    }
}

impl WebhookConfig {
    /// Delivery is enabled only when a URL is configured.
    pub fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults,
    /// then apply environment overrides.
    pub fn load() -> Self {
        let config_path = config_file_path();
        let mut config = Self::default();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(parsed) => config = parsed,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Override account settings from the environment.
    ///
    /// The lookup is injected so tests do not touch the process environment.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup(ENV_CLOUD_NAME).filter(|v| !v.is_empty()) {
            self.cloud.cloud_name = name;
        }
        if let Some(preset) = lookup(ENV_UPLOAD_PRESET).filter(|v| !v.is_empty()) {
            self.cloud.upload_preset = preset;
        }
        if let Some(url) = lookup(ENV_WEBHOOK_URL) {
            self.webhook.url = url;
        }
    }

    /// Path of the config file this build reads.
    pub fn path() -> PathBuf {
        config_file_path()
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("overlay-studio").join("config.json")
}

/// Default data directory for client-local state.
fn default_data_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("overlay-studio")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_editor_constants() {
        let config = AppConfig::default();
        assert_eq!(config.app.max_file_size, 52_428_800);
        assert_eq!(config.compiler.canvas_size, 1080);
        assert!((config.compiler.offset_scale - 10.0).abs() < 1e-9);
        assert_eq!(config.compiler.logo_padding, 15);
        assert!((config.preview.logo_padding - 20.0).abs() < 1e-9);
        assert!(config.fonts.contains("Noto Sans Thai"));
        assert!(!config.webhook.is_enabled());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{ "cloud": { "cloud_name": "demo" } }"#).unwrap();
        assert_eq!(parsed.cloud.cloud_name, "demo");
        assert_eq!(parsed.cloud.upload_preset, "upload-image");
        assert_eq!(parsed.app.supported_video_types.len(), 2);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| match key {
            ENV_CLOUD_NAME => Some("acme".to_string()),
            ENV_WEBHOOK_URL => Some("https://hooks.example.com/x".to_string()),
            _ => None,
        });
        assert_eq!(config.cloud.cloud_name, "acme");
        assert_eq!(config.cloud.upload_preset, "upload-image");
        assert!(config.webhook.is_enabled());
    }

    #[test]
    fn test_empty_env_value_keeps_cloud_name() {
        let mut config = AppConfig::default();
        config.cloud.cloud_name = "keep".to_string();
        config.apply_env_overrides(|key| (key == ENV_CLOUD_NAME).then(String::new));
        assert_eq!(config.cloud.cloud_name, "keep");
    }
}
