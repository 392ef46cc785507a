//! Saved style templates.
//!
//! Templates are kept in the client-local store under one key as a flat,
//! append-only list. There is no update or delete: saving a second template
//! with an existing name appends another entry, and lookups by name return
//! the most recent one.

use serde::{Deserialize, Serialize};
use studio_common::{LocalStore, StudioError};

use crate::document::{DocumentError, LayerId, OverlayDocument};
use crate::layer::{TextLayer, TextStyle};

/// Store key of the template list.
pub const TEMPLATES_KEY: &str = "textTemplates";

/// A named snapshot of a layer's style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTemplate {
    pub name: String,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl StyleTemplate {
    /// Snapshot the style of `layer`; text and position are not captured.
    pub fn capture(name: impl Into<String>, layer: &TextLayer) -> Self {
        Self {
            name: name.into(),
            style: layer.style.clone(),
        }
    }
}

/// Errors from template persistence and application.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template name must not be empty")]
    EmptyName,

    #[error("Template not found: {name}")]
    NotFound { name: String },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Store(#[from] StudioError),
}

/// Template list persisted in a [`LocalStore`].
#[derive(Debug, Clone)]
pub struct TemplateStore {
    store: LocalStore,
}

impl TemplateStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Read the current list from storage.
    pub fn list(&self) -> Result<Vec<StyleTemplate>, TemplateError> {
        Ok(self
            .store
            .get::<Vec<StyleTemplate>>(TEMPLATES_KEY)?
            .unwrap_or_default())
    }

    /// Append a snapshot of `layer` under `name`.
    pub fn save(&self, name: &str, layer: &TextLayer) -> Result<StyleTemplate, TemplateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }
        let template = StyleTemplate::capture(name, layer);
        let mut templates = self.list()?;
        templates.push(template.clone());
        self.store.set(TEMPLATES_KEY, &templates)?;
        tracing::info!(name, total = templates.len(), "Saved style template");
        Ok(template)
    }

    /// Most recently saved template with this name.
    pub fn find(&self, name: &str) -> Result<StyleTemplate, TemplateError> {
        self.list()?
            .into_iter()
            .rev()
            .find(|t| t.name == name)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })
    }

    /// Overwrite the style of one layer with the named template.
    pub fn apply(
        &self,
        document: &mut OverlayDocument,
        layer: &LayerId,
        name: &str,
    ) -> Result<StyleTemplate, TemplateError> {
        let template = self.find(name)?;
        document.apply_style(layer, &template.style)?;
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::FontWeight;
    use crate::media::{MediaKind, MediaRef};
    use crate::position::OverlayPosition;

    fn store() -> (tempfile::TempDir, TemplateStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(LocalStore::open(dir.path()));
        (dir, store)
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_appends() {
        let (_dir, store) = store();
        let layer = TextLayer::default();
        store.save("first", &layer).unwrap();
        store.save("second", &layer).unwrap();
        store.save("first", &layer).unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["first", "second", "first"]);
    }

    #[test]
    fn test_empty_name_rejected() {
        let (_dir, store) = store();
        assert!(matches!(
            store.save("   ", &TextLayer::default()),
            Err(TemplateError::EmptyName)
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_find_returns_latest_with_name() {
        let (_dir, store) = store();
        let mut layer = TextLayer::default();
        layer.style.font_size = 20;
        store.save("dup", &layer).unwrap();
        layer.style.font_size = 90;
        store.save("dup", &layer).unwrap();

        assert_eq!(store.find("dup").unwrap().style.font_size, 90);
        assert!(matches!(
            store.find("missing"),
            Err(TemplateError::NotFound { .. })
        ));
    }

    #[test]
    fn test_apply_overwrites_style_only() {
        let (_dir, store) = store();
        let mut source = TextLayer::with_text("ignored", OverlayPosition::new(1.0, 2.0));
        source.style.font_family = "Kanit".to_string();
        source.style.font_weight = FontWeight::Bold;
        source.style.stroke.width = 3;
        store.save("bold-kanit", &source).unwrap();

        let target = TextLayer::with_text("Keep me", OverlayPosition::new(70.0, 80.0));
        let mut doc =
            OverlayDocument::with_layer(MediaRef::new("img", MediaKind::Image), target);
        let id = doc.id_at(0).unwrap().clone();
        store.apply(&mut doc, &id, "bold-kanit").unwrap();

        let layer = doc.layer(&id).unwrap();
        assert_eq!(layer.text, "Keep me");
        assert_eq!(layer.position, OverlayPosition::new(70.0, 80.0));
        assert_eq!(layer.style.font_family, "Kanit");
        assert!(layer.style.is_bold());
        assert_eq!(layer.style.stroke.width, 3);
    }

    #[test]
    fn test_template_json_is_flat() {
        let template = StyleTemplate::capture("flat", &TextLayer::default());
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["name"], "flat");
        assert_eq!(value["font_family"], "Mitr");
        assert!(value.get("text").is_none());
        assert!(value.get("position").is_none());
    }
}
