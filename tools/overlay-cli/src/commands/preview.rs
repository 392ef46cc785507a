//! Write an approximate SVG preview of the document.

use std::path::{Path, PathBuf};

use studio_common::AppConfig;
use studio_preview_engine::{MediaFrame, PreviewSession, PreviewState, SvgFileSink};

pub fn run(
    config: &AppConfig,
    doc: &Path,
    output: PathBuf,
    media: Option<PathBuf>,
    time: Option<f64>,
) -> anyhow::Result<()> {
    let document = super::load_document(doc)?;

    let frame = match media {
        Some(path) => MediaFrame::from_image_file(&path)?,
        None => {
            let info = document.media();
            let canvas = config.compiler.canvas_size;
            let frame = MediaFrame::new(info.width.unwrap_or(canvas), info.height.unwrap_or(canvas));
            if info.delivery_url.is_empty() || info.kind.is_video() {
                frame
            } else {
                frame.with_href(info.delivery_url.clone())
            }
        }
    };
    let (width, height) = (frame.width, frame.height);

    // Redraw synchronously so the file reflects the final playhead
    let mut settings = config.preview;
    settings.batch_hz = 0;
    let mut session = PreviewSession::new(&settings, SvgFileSink::new(output.clone()));
    session.load(document, frame)?;
    if time.is_some() {
        session.seek(time)?;
    }

    let texts = session.scene().map_or(0, |scene| scene.texts().count());
    println!("Preview written to {}", output.display());
    println!("  Canvas: {width}x{height}");
    println!("  Text layers drawn: {texts}");
    if let Some(t) = time {
        println!("  Time: {}", studio_common::format_timecode(t));
    }
    if session.state() == PreviewState::Loaded {
        println!("[WARN] No visible text layer");
    }
    Ok(())
}
