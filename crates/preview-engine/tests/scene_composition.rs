use studio_overlay_model::{
    Anchor, LogoOverlay, MediaKind, MediaRef, OverlayDocument, OverlayPosition, TextLayer,
};
use studio_preview_engine::{compose, render_svg, ComposeOptions, DrawOp, MediaFrame};

fn storefront() -> OverlayDocument {
    let mut headline = TextLayer::with_text("SALE 50%", OverlayPosition::new(10.0, 10.0));
    headline.style.stroke.width = 2;
    headline.style.curve.enabled = true;

    let mut footer = TextLayer::with_text("Shop now", OverlayPosition::new(50.0, 90.0));
    footer.style.shadow.enabled = true;

    let mut doc = OverlayDocument::with_layer(MediaRef::new("img123", MediaKind::Image), headline);
    doc.insert_layer(footer).unwrap();
    doc.set_logo(LogoOverlay::new("brand/logo").with_anchor(Anchor::NorthEast));
    doc
}

#[test]
fn scene_keeps_logo_under_text_and_stacking_order() {
    let scene = compose(
        &storefront(),
        &MediaFrame::new(1080, 1080),
        &ComposeOptions::default(),
    )
    .unwrap();

    let kinds: Vec<&str> = scene
        .ops
        .iter()
        .map(|op| match op {
            DrawOp::Media { .. } => "media",
            DrawOp::Logo { .. } => "logo",
            DrawOp::Text(_) => "text",
        })
        .collect();
    assert_eq!(kinds, vec!["media", "logo", "text", "text"]);

    let texts: Vec<&str> = scene.texts().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["SALE 50%", "Shop now"]);

    let (rect, _) = scene.logo().unwrap();
    assert_eq!((rect.x, rect.y), (1080.0 - 120.0 - 20.0, 20.0));
}

#[test]
fn every_effect_reaches_the_svg() {
    let scene = compose(
        &storefront(),
        &MediaFrame::new(1080, 1080).with_href("photo.jpg"),
        &ComposeOptions::default(),
    )
    .unwrap();
    let svg = render_svg(&scene);

    assert!(svg.contains(r#"href="photo.jpg""#));
    assert!(svg.contains("<textPath"));
    assert!(svg.contains(r#"stroke-width="4""#));
    assert!(svg.contains("feDropShadow"));
    assert!(svg.contains("stroke-dasharray"));
}
