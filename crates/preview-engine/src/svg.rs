//! SVG serialization of a [`Scene`].

use std::fmt::Write as _;

use crate::scene::{ArcPath, DrawOp, Scene, TextAnchor, TextOp};

/// Render a scene as a standalone SVG document.
pub fn render_svg(scene: &Scene) -> String {
    let mut defs = String::new();
    let mut body = String::new();

    for (index, op) in scene.ops.iter().enumerate() {
        match op {
            DrawOp::Media { href } => match href {
                Some(href) => {
                    let _ = writeln!(
                        body,
                        r#"  <image href="{}" x="0" y="0" width="{}" height="{}" preserveAspectRatio="none"/>"#,
                        escape(href),
                        num(scene.width),
                        num(scene.height)
                    );
                }
                None => {
                    let _ = writeln!(
                        body,
                        r##"  <rect x="0" y="0" width="{}" height="{}" fill="#222222"/>"##,
                        num(scene.width),
                        num(scene.height)
                    );
                }
            },
            DrawOp::Logo { rect, href } => match href {
                Some(href) => {
                    let _ = writeln!(
                        body,
                        r#"  <image href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
                        escape(href),
                        num(rect.x),
                        num(rect.y),
                        num(rect.width),
                        num(rect.height)
                    );
                }
                None => {
                    let _ = writeln!(
                        body,
                        r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#FFFFFF" stroke-dasharray="6 4"/>"##,
                        num(rect.x),
                        num(rect.y),
                        num(rect.width),
                        num(rect.height)
                    );
                }
            },
            DrawOp::Text(text) => write_text(&mut defs, &mut body, index, text),
        }
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(scene.width),
        h = num(scene.height)
    );
    if !defs.is_empty() {
        svg.push_str("  <defs>\n");
        svg.push_str(&defs);
        svg.push_str("  </defs>\n");
    }
    svg.push_str(&body);
    svg.push_str("</svg>\n");
    svg
}

fn write_text(defs: &mut String, body: &mut String, index: usize, text: &TextOp) {
    let mut attrs = format!(
        r#"font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{}""#,
        escape(&text.font_family),
        num(text.font_size),
        if text.bold { "bold" } else { "normal" },
        escape(&text.fill),
        match text.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    );
    if text.letter_spacing != 0.0 {
        let _ = write!(attrs, r#" letter-spacing="{}""#, num(text.letter_spacing));
    }
    if let Some(stroke) = &text.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{}" stroke-linejoin="round" paint-order="stroke""#,
            escape(&stroke.color),
            num(stroke.line_width)
        );
    }
    if let Some(shadow) = &text.shadow {
        let id = format!("shadow-{index}");
        let _ = writeln!(
            defs,
            r#"    <filter id="{id}"><feDropShadow dx="{}" dy="{}" stdDeviation="{}" flood-color="{}"/></filter>"#,
            num(shadow.offset_x),
            num(shadow.offset_y),
            num(shadow.blur / 2.0),
            escape(&shadow.color)
        );
        let _ = write!(attrs, r#" filter="url(#{id})""#);
    }
    if text.rotation != 0.0 {
        let _ = write!(
            attrs,
            r#" transform="rotate({} {} {})""#,
            num(text.rotation),
            num(text.x),
            num(text.y)
        );
    }

    let content = escape(&text.text);
    match &text.arc {
        Some(arc) => {
            let id = format!("arc-{index}");
            let _ = writeln!(defs, r#"    <path id="{id}" d="{}"/>"#, arc_d(arc));
            let _ = writeln!(
                body,
                r##"  <text {attrs}><textPath href="#{id}" startOffset="50%">{content}</textPath></text>"##
            );
        }
        None => {
            let _ = writeln!(
                body,
                r#"  <text x="{}" y="{}" dominant-baseline="middle" {attrs}>{content}</text>"#,
                num(text.x),
                num(text.y)
            );
        }
    }
}

fn arc_d(arc: &ArcPath) -> String {
    format!(
        "M {} {} A {r} {r} 0 {} {} {} {}",
        num(arc.start.0),
        num(arc.start.1),
        u8::from(arc.large_arc),
        u8::from(arc.clockwise),
        num(arc.end.0),
        num(arc.end.1),
        r = num(arc.radius)
    )
}

/// Two decimals at most, trailing zeros dropped.
fn num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
