//! SVG document assembly.

use std::fmt::Write;

use glam::Vec2;
use lapidary_interact::{GlowStyle, Highlight};
use lapidary_widget::{Pathway, Widget};

use crate::layout::FlatGem;

/// Drop-shadow radius of an individually emphasized facet, px.
const FACET_SHADOW: f32 = 15.0;

/// Emphasized facet brightness (matches the hover style of the 3D facets).
const FACET_EMPHASIS_BRIGHTNESS: f32 = 1.3;

/// Sparkle circle radii, cycled around the table center.
const SPARKLE_RADII: [f32; 6] = [2.0, 1.5, 1.5, 2.0, 1.0, 1.0];

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn points_attr(points: &[Vec2]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:.1},{:.1}", p.x, p.y);
    }
    out
}

/// Render one frame of the widget as a standalone SVG document.
///
/// Pure: equal inputs produce byte-equal documents.
pub fn render_svg(
    flat: &FlatGem,
    highlight: &Highlight,
    glow: &GlowStyle,
    pathways: &[Pathway],
    selected: Option<usize>,
) -> String {
    let mut doc = String::new();
    let glowing = glow.intensity > 0.0;

    let _ = writeln!(
        doc,
        "<svg viewBox=\"0 0 {:.0} {:.0}\" xmlns=\"http://www.w3.org/2000/svg\">",
        flat.width(),
        flat.height()
    );

    // Center table: carries the pooled glow as stacked drop-shadows
    let table_style = if glowing {
        format!(
            "filter: drop-shadow(0 0 {r:.1}px rgba(59,130,246,{i:.2})) \
             drop-shadow(0 0 {r2:.1}px rgba(147,197,253,{i2:.2}))",
            r = glow.glow_radius,
            i = glow.intensity,
            r2 = glow.glow_radius * 2.0,
            i2 = glow.intensity * 0.7,
        )
    } else {
        "filter: none".to_string()
    };
    let _ = writeln!(
        doc,
        "  <polygon class=\"table\" points=\"{}\" fill=\"#dbeafe\" fill-opacity=\"0.9\" style=\"{}\"/>",
        points_attr(flat.table()),
        table_style
    );

    // Facets, ring order; hover and selection emphasis compose
    for (i, pathway) in pathways.iter().enumerate() {
        let emphasized = highlight.is_active(i) || selected == Some(i);
        let style = if emphasized {
            format!(
                "filter: drop-shadow(0 0 {FACET_SHADOW:.1}px {color}) brightness({FACET_EMPHASIS_BRIGHTNESS}) saturate({sat:.2})",
                color = pathway.color.hex(),
                sat = glow.facet_saturation,
            )
        } else {
            format!(
                "filter: brightness({:.2}) saturate({:.2})",
                glow.facet_brightness, glow.facet_saturation
            )
        };
        let _ = writeln!(
            doc,
            "  <polygon class=\"facet\" points=\"{}\" fill=\"{}\" fill-opacity=\"0.55\" style=\"{}\"/>",
            points_attr(flat.facet(i)),
            pathway.color.hex(),
            style
        );
    }

    // Sparkles around the table center
    let center = flat.center();
    for (k, radius) in SPARKLE_RADII.iter().enumerate() {
        let angle = k as f32 * std::f32::consts::TAU / SPARKLE_RADII.len() as f32;
        let p = center + Vec2::new(angle.cos(), angle.sin()) * 30.0;
        let _ = writeln!(
            doc,
            "  <circle class=\"sparkle\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"#3b82f6\" opacity=\"{:.2}\"/>",
            p.x, p.y, radius, glow.sparkle_opacity
        );
    }

    // Labels
    for (i, pathway) in pathways.iter().enumerate() {
        let emphasized = highlight.is_active(i) || selected == Some(i);
        let (fill, size) = if emphasized {
            (pathway.color.hex(), 18)
        } else {
            ("#374151", 16)
        };
        let anchor = flat.label(i);
        let _ = writeln!(
            doc,
            "  <text class=\"label\" x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"{}\" \
             font-weight=\"600\" text-anchor=\"middle\">{}</text>",
            anchor.x,
            anchor.y,
            fill,
            size,
            escape(&pathway.title)
        );
    }

    doc.push_str("</svg>\n");
    doc
}

/// Convenience wrapper: project, derive the frame style and render.
pub fn render_widget(widget: &Widget, t_secs: f32) -> String {
    let flat = FlatGem::project(widget.mesh(), 500.0, 480.0);
    let frame = widget.frame(t_secs);
    render_svg(
        &flat,
        widget.highlight(),
        &frame.glow,
        widget.pathways(),
        widget.selection().selected(),
    )
}
