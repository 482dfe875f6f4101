//! SVG backend for timelines.
//!
//! Serializes draw commands one element each, in paint order.

use super::palette::Color;
use super::timeline::{DrawCommand, Timeline};
use log::info;

/// Serialize a timeline to an SVG document
pub fn timeline_to_svg(timeline: &Timeline, title: &str) -> String {
    let mut svg = String::new();

    // Header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = timeline.width,
        h = timeline.height
    ));
    svg.push_str("<style>text { font-family: sans-serif; }</style>");
    svg.push_str(&format!("<title>{}</title>", escape_xml(title)));
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        timeline.width,
        timeline.height,
        Color::WHITE
    ));

    for command in &timeline.commands {
        svg.push_str(&command_element(command));
    }

    svg.push_str("</svg>");

    info!("Timeline SVG generated ({} bytes)", svg.len());
    svg
}

/// One SVG element for a draw command
fn command_element(command: &DrawCommand) -> String {
    match command {
        DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            x, y, width, height, color
        ),
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            color,
        } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
            x1, y1, x2, y2, color
        ),
        DrawCommand::Text {
            x,
            y,
            text,
            color,
            font_size,
            rotation,
        } => {
            let transform = if *rotation != 0.0 {
                format!(r#" transform="rotate({} {} {})""#, rotation, x, y)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{}" y="{}" font-size="{}" fill="{}"{}>{}</text>"#,
                x,
                y,
                font_size,
                color,
                transform,
                escape_xml(text)
            )
        }
    }
}

/// Escape text for use in SVG content
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
