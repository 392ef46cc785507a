//! Live preview state: the document being edited plus its latest frame.
//!
//! ```text
//!   Idle ──load──▶ Loaded ◀──edit──▶ Composing
//!    ▲                │                  │
//!    └──────reset─────┴──────────────────┘
//! ```
//!
//! Every edit redraws before returning, unless frame batching is enabled,
//! in which case edits only mark the frame dirty and [`PreviewSession::tick`]
//! redraws at most once per frame interval.

use std::path::PathBuf;

use studio_common::{FrameThrottle, PreviewSettings};
use studio_overlay_model::OverlayDocument;

use crate::compositor::{compose, ComposeOptions, MediaFrame};
use crate::scene::Scene;
use crate::svg::render_svg;
use crate::PreviewError;

/// Where finished frames go.
pub trait SceneSink {
    fn present(&mut self, scene: &Scene) -> Result<(), PreviewError>;

    /// Human-readable name.
    fn name(&self) -> &str;
}

/// Keeps every presented frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<Scene>,
}

impl SceneSink for MemorySink {
    fn present(&mut self, scene: &Scene) -> Result<(), PreviewError> {
        self.frames.push(scene.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Overwrites an SVG file with each presented frame.
#[derive(Debug, Clone)]
pub struct SvgFileSink {
    path: PathBuf,
}

impl SvgFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SceneSink for SvgFileSink {
    fn present(&mut self, scene: &Scene) -> Result<(), PreviewError> {
        std::fs::write(&self.path, render_svg(scene)).map_err(|e| PreviewError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    fn name(&self) -> &str {
        "svg-file"
    }
}

/// Coarse state of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No media uploaded.
    Idle,
    /// Media present, nothing to draw on it yet.
    Loaded,
    /// At least one visible text layer.
    Composing,
}

#[derive(Debug)]
struct Loaded {
    document: OverlayDocument,
    frame: MediaFrame,
}

pub struct PreviewSession<S: SceneSink> {
    sink: S,
    options: ComposeOptions,
    throttle: Option<FrameThrottle>,
    current: Option<Loaded>,
    scene: Option<Scene>,
    dirty: bool,
    redraws: u64,
}

impl<S: SceneSink> PreviewSession<S> {
    pub fn new(settings: &PreviewSettings, sink: S) -> Self {
        Self {
            sink,
            options: ComposeOptions::from_settings(settings),
            throttle: (settings.batch_hz > 0).then(|| FrameThrottle::new(settings.batch_hz)),
            current: None,
            scene: None,
            dirty: false,
            redraws: 0,
        }
    }

    pub fn state(&self) -> PreviewState {
        match &self.current {
            None => PreviewState::Idle,
            Some(loaded) if loaded.document.has_visible_text() => PreviewState::Composing,
            Some(_) => PreviewState::Loaded,
        }
    }

    /// Start editing freshly uploaded media. Replaces any previous document.
    pub fn load(&mut self, document: OverlayDocument, frame: MediaFrame) -> Result<(), PreviewError> {
        tracing::info!(
            asset = document.asset_id(),
            width = frame.width,
            height = frame.height,
            "Preview loaded media"
        );
        self.current = Some(Loaded { document, frame });
        self.redraw()
    }

    /// Drop the document, returning to `Idle`. Used when a new upload starts.
    pub fn reset(&mut self) -> Option<OverlayDocument> {
        self.scene = None;
        self.dirty = false;
        self.current.take().map(|loaded| loaded.document)
    }

    pub fn document(&self) -> Option<&OverlayDocument> {
        self.current.as_ref().map(|loaded| &loaded.document)
    }

    /// Apply an edit, then redraw (or schedule a redraw when batching).
    pub fn mutate<R>(
        &mut self,
        edit: impl FnOnce(&mut OverlayDocument) -> R,
    ) -> Result<R, PreviewError> {
        let loaded = self.current.as_mut().ok_or(PreviewError::NoMedia)?;
        let result = edit(&mut loaded.document);
        if self.throttle.is_some() {
            self.dirty = true;
        } else {
            self.redraw()?;
        }
        Ok(result)
    }

    /// Logo height over width, once the logo image has been measured.
    pub fn set_logo_aspect(&mut self, aspect: f64) -> Result<(), PreviewError> {
        self.options.logo_aspect = aspect;
        self.request_redraw()
    }

    /// Move the video playhead. `None` shows all layers regardless of timing.
    pub fn seek(&mut self, time: Option<f64>) -> Result<(), PreviewError> {
        self.options.time = time;
        self.request_redraw()
    }

    /// Frame callback for batched mode. Returns whether a redraw happened.
    pub fn tick(&mut self, now_ns: u64) -> Result<bool, PreviewError> {
        if !self.dirty {
            return Ok(false);
        }
        let ready = self
            .throttle
            .as_mut()
            .map_or(true, |throttle| throttle.should_tick(now_ns));
        if !ready {
            return Ok(false);
        }
        self.redraw()?;
        Ok(true)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Latest composed frame.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Frames presented since the session was created.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn request_redraw(&mut self) -> Result<(), PreviewError> {
        if self.current.is_none() {
            return Ok(());
        }
        if self.throttle.is_some() {
            self.dirty = true;
            Ok(())
        } else {
            self.redraw()
        }
    }

    fn redraw(&mut self) -> Result<(), PreviewError> {
        let Some(loaded) = &self.current else {
            return Ok(());
        };
        let scene = compose(&loaded.document, &loaded.frame, &self.options)?;
        self.sink.present(&scene)?;
        self.redraws += 1;
        self.dirty = false;
        tracing::trace!(
            ops = scene.ops.len(),
            sink = self.sink.name(),
            "Preview redrawn"
        );
        self.scene = Some(scene);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_overlay_model::{MediaKind, MediaRef};

    fn document() -> OverlayDocument {
        OverlayDocument::new(MediaRef::new("img", MediaKind::Image))
    }

    fn session(batch_hz: u32) -> PreviewSession<MemorySink> {
        let settings = PreviewSettings {
            batch_hz,
            ..PreviewSettings::default()
        };
        PreviewSession::new(&settings, MemorySink::default())
    }

    fn set_first_text(doc: &mut OverlayDocument, text: &str) {
        let id = doc.id_at(0).cloned().unwrap();
        doc.layer_mut(&id).unwrap().text = text.to_string();
    }

    #[test]
    fn test_state_transitions() {
        let mut session = session(0);
        assert_eq!(session.state(), PreviewState::Idle);
        assert!(matches!(
            session.mutate(|_| ()),
            Err(PreviewError::NoMedia)
        ));

        session.load(document(), MediaFrame::new(640, 480)).unwrap();
        assert_eq!(session.state(), PreviewState::Loaded);

        session.mutate(|doc| set_first_text(doc, "Hello")).unwrap();
        assert_eq!(session.state(), PreviewState::Composing);

        session.mutate(|doc| set_first_text(doc, "  ")).unwrap();
        assert_eq!(session.state(), PreviewState::Loaded);

        assert!(session.reset().is_some());
        assert_eq!(session.state(), PreviewState::Idle);
        assert!(session.scene().is_none());
    }

    #[test]
    fn test_every_edit_redraws_synchronously() {
        let mut session = session(0);
        session.load(document(), MediaFrame::new(100, 100)).unwrap();
        session.mutate(|doc| set_first_text(doc, "A")).unwrap();
        session.mutate(|doc| set_first_text(doc, "AB")).unwrap();

        assert_eq!(session.redraws(), 3);
        assert_eq!(session.sink().frames.len(), 3);
        assert_eq!(session.scene().unwrap().texts().next().unwrap().text, "AB");
    }

    #[test]
    fn test_batched_edits_coalesce() {
        let mut session = session(30);
        session.load(document(), MediaFrame::new(100, 100)).unwrap();
        assert_eq!(session.redraws(), 1);

        session.mutate(|doc| set_first_text(doc, "A")).unwrap();
        session.mutate(|doc| set_first_text(doc, "AB")).unwrap();
        assert!(session.is_dirty());
        assert_eq!(session.redraws(), 1);

        assert!(session.tick(0).unwrap());
        assert_eq!(session.redraws(), 2);
        assert!(!session.tick(1_000).unwrap());

        session.mutate(|doc| set_first_text(doc, "ABC")).unwrap();
        assert!(!session.tick(1_000).unwrap());
        assert!(session.tick(100_000_000).unwrap());
        assert_eq!(session.scene().unwrap().texts().next().unwrap().text, "ABC");
    }

    #[test]
    fn test_seek_hides_out_of_window_layers() {
        let mut doc = OverlayDocument::new(MediaRef::new("clip", MediaKind::Video));
        set_first_text(&mut doc, "Late");
        let id = doc.id_at(0).cloned().unwrap();
        doc.layer_mut(&id).unwrap().timing.start_time = 3.0;

        let mut session = session(0);
        session.load(doc, MediaFrame::new(100, 100)).unwrap();
        session.seek(Some(1.0)).unwrap();
        assert_eq!(session.scene().unwrap().texts().count(), 0);
        session.seek(Some(3.5)).unwrap();
        assert_eq!(session.scene().unwrap().texts().count(), 1);
    }

    #[test]
    fn test_svg_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.svg");
        let mut session = PreviewSession::new(&PreviewSettings::default(), SvgFileSink::new(&path));
        let mut doc = document();
        set_first_text(&mut doc, "Saved");
        session.load(doc, MediaFrame::new(200, 100)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(">Saved</text>"));
    }
}
