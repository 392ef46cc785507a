//! Show how a percentage position resolves to an anchor and offsets.

use studio_common::AppConfig;
use studio_overlay_model::OverlayPosition;
use studio_transform_compiler::resolve_anchor_with_scale;

pub fn run(config: &AppConfig, x: f64, y: f64) -> anyhow::Result<()> {
    let resolved = resolve_anchor_with_scale(OverlayPosition::new(x, y), config.compiler.offset_scale);

    println!("Position ({x}, {y}):");
    println!("  Anchor: {}", resolved.anchor.as_str());
    println!("  Offset X: {}", resolved.offset_x);
    println!("  Offset Y: {}", resolved.offset_y);
    if !(0.0..=100.0).contains(&x) || !(0.0..=100.0).contains(&y) {
        println!("[WARN] Outside 0-100; offsets are extrapolated");
    }
    Ok(())
}
