//! The overlay document: every text layer and the logo for one uploaded media item.
//!
//! Layers live in an insertion-ordered map keyed by a generated [`LayerId`].
//! Order is stacking order: the first layer is drawn first (lowest).

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::layer::{TextLayer, TextStyle};
use crate::logo::LogoOverlay;
use crate::media::{MediaKind, MediaRef};

/// Hard cap on text layers per document.
pub const MAX_TEXT_LAYERS: usize = 3;

/// Stable identifier of a text layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(format!("layer-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overlay configuration for one media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentFile")]
pub struct OverlayDocument {
    media: MediaRef,
    layers: IndexMap<LayerId, TextLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<LogoOverlay>,
}

/// Unchecked on-disk form; converted through [`OverlayDocument::try_from`].
#[derive(Deserialize)]
struct DocumentFile {
    media: MediaRef,
    layers: IndexMap<LayerId, TextLayer>,
    #[serde(default)]
    logo: Option<LogoOverlay>,
}

impl TryFrom<DocumentFile> for OverlayDocument {
    type Error = DocumentError;

    fn try_from(file: DocumentFile) -> Result<Self, Self::Error> {
        let count = file.layers.len();
        if count == 0 || count > MAX_TEXT_LAYERS {
            return Err(DocumentError::InvalidLayerCount {
                count,
                max: MAX_TEXT_LAYERS,
            });
        }
        Ok(Self {
            media: file.media,
            layers: file.layers,
            logo: file.logo,
        })
    }
}

impl OverlayDocument {
    /// Create a document for freshly uploaded media, seeded with one default layer.
    pub fn new(media: MediaRef) -> Self {
        let mut layers = IndexMap::new();
        layers.insert(LayerId::generate(), TextLayer::for_slot(0));
        Self {
            media,
            layers,
            logo: None,
        }
    }

    /// Create a document whose single layer is `layer`.
    pub fn with_layer(media: MediaRef, layer: TextLayer) -> Self {
        let mut layers = IndexMap::new();
        layers.insert(LayerId::generate(), layer);
        Self {
            media,
            layers,
            logo: None,
        }
    }

    pub fn media(&self) -> &MediaRef {
        &self.media
    }

    pub fn kind(&self) -> MediaKind {
        self.media.kind
    }

    pub fn asset_id(&self) -> &str {
        &self.media.asset_id
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false: a document holds at least one layer.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.layers.len() >= MAX_TEXT_LAYERS
    }

    /// Append a default layer in the next stack slot.
    pub fn add_layer(&mut self) -> Result<LayerId, DocumentError> {
        let layer = TextLayer::for_slot(self.layers.len());
        self.insert_layer(layer)
    }

    /// Append `layer` on top of the stack.
    pub fn insert_layer(&mut self, layer: TextLayer) -> Result<LayerId, DocumentError> {
        if self.is_full() {
            return Err(DocumentError::LayerCapReached {
                max: MAX_TEXT_LAYERS,
            });
        }
        let id = LayerId::generate();
        self.layers.insert(id.clone(), layer);
        tracing::debug!(layer = %id, count = self.layers.len(), "Added text layer");
        Ok(id)
    }

    /// Remove a layer, keeping the order of the others. The last layer cannot be removed.
    pub fn remove_layer(&mut self, id: &LayerId) -> Result<TextLayer, DocumentError> {
        if !self.layers.contains_key(id) {
            return Err(DocumentError::UnknownLayer { id: id.to_string() });
        }
        if self.layers.len() <= 1 {
            return Err(DocumentError::LastLayer);
        }
        self.layers
            .shift_remove(id)
            .ok_or_else(|| DocumentError::UnknownLayer { id: id.to_string() })
    }

    pub fn layer(&self, id: &LayerId) -> Option<&TextLayer> {
        self.layers.get(id)
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut TextLayer> {
        self.layers.get_mut(id)
    }

    /// Identifier of the layer at a stack position.
    pub fn id_at(&self, index: usize) -> Option<&LayerId> {
        self.layers.get_index(index).map(|(id, _)| id)
    }

    /// Stack position of a layer.
    pub fn index_of(&self, id: &LayerId) -> Option<usize> {
        self.layers.get_index_of(id)
    }

    /// All layers in stacking order.
    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &TextLayer)> {
        self.layers.iter()
    }

    /// Enabled layers with non-blank text, in stacking order.
    pub fn visible_layers(&self) -> impl Iterator<Item = (&LayerId, &TextLayer)> {
        self.layers.iter().filter(|(_, layer)| layer.is_visible())
    }

    pub fn has_visible_text(&self) -> bool {
        self.visible_layers().next().is_some()
    }

    /// Fail with a validation error when nothing would be rendered.
    pub fn ensure_visible_text(&self) -> Result<(), DocumentError> {
        if self.has_visible_text() {
            Ok(())
        } else {
            Err(DocumentError::NoVisibleText)
        }
    }

    /// Overwrite the style fields of a layer, leaving text, position, and timing untouched.
    pub fn apply_style(&mut self, id: &LayerId, style: &TextStyle) -> Result<(), DocumentError> {
        let layer = self
            .layers
            .get_mut(id)
            .ok_or_else(|| DocumentError::UnknownLayer { id: id.to_string() })?;
        layer.style = style.clone();
        Ok(())
    }

    pub fn logo(&self) -> Option<&LogoOverlay> {
        self.logo.as_ref()
    }

    /// Set or replace the logo.
    pub fn set_logo(&mut self, logo: LogoOverlay) -> Option<LogoOverlay> {
        self.logo.replace(logo)
    }

    pub fn clear_logo(&mut self) -> Option<LogoOverlay> {
        self.logo.take()
    }

    /// Human-readable problems across all layers and the logo.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = vec![];
        if self.media.asset_id.trim().is_empty() {
            issues.push("media asset id is empty".to_string());
        }
        for (index, (_, layer)) in self.layers.iter().enumerate() {
            for issue in layer.issues() {
                issues.push(format!("layer {}: {issue}", index + 1));
            }
        }
        if let Some(logo) = &self.logo {
            issues.extend(logo.issues());
        }
        issues
    }

    /// Load a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        let json = std::fs::read_to_string(&path).map_err(|e| DocumentError::IoError {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| DocumentError::ParseError { path, source: e })
    }

    /// Save the document as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DocumentError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| DocumentError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| DocumentError::IoError { path, source: e })
    }
}

/// Errors that can occur when editing or loading documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Layer limit reached: at most {max} text layers")]
    LayerCapReached { max: usize },

    #[error("At least one text layer is required")]
    LastLayer,

    #[error("Unknown layer: {id}")]
    UnknownLayer { id: String },

    #[error("No visible text: enter text in at least one enabled layer")]
    NoVisibleText,

    #[error("Document must hold 1 to {max} layers, found {count}")]
    InvalidLayerCount { count: usize, max: usize },

    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl DocumentError {
    /// Errors caused by the requested edit rather than by I/O.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::IoError { .. } | Self::ParseError { .. })
    }
}
