//! Gantt-style timeline layout.
//!
//! Maps a loaded trace to a flat list of draw commands on a fixed pixel
//! grid: one row per task, one extra kernel row for the gaps between
//! consecutive events, a time axis along the bottom and row labels on the
//! left. Rendering is pure; it trusts the loader's output and cannot fail.

use super::palette::{kernel_color, task_color, Color};
use crate::parser::schema::Trace;
use crate::utils::config::{
    BAR_HEIGHT, BAR_TOP, CANVAS_WIDTH, FONT_SIZE, HEIGHT_PADDING, LABEL_EVERY, LEFT_MARGIN,
    PIXELS_PER_UNIT, ROW_HEIGHT,
};
use log::debug;

// Gridline geometry, relative to the canvas edges
const GRID_TOP: i32 = 10;
const AXIS_LINE_INSET: i32 = 95;
const AXIS_LABEL_INSET: i32 = 90;
const AXIS_LABEL_SHIFT: i32 = 3;
const AXIS_LABEL_ROTATION: f64 = 45.0;
const ROW_LINE_INSET: i32 = 92;
const ROW_LABEL_X: i32 = 10;

/// Timeline layout configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    /// Horizontal pixels per display unit; also the gridline spacing
    pub pixels_per_unit: i32,
    pub left_margin: i32,
    pub row_height: i32,
    pub bar_height: i32,
    pub bar_top: i32,
    pub canvas_width: i32,
    /// Added to the row area to get the canvas height
    pub height_padding: i32,
    pub font_size: u32,
}

impl Default for TimelineLayout {
    fn default() -> Self {
        Self {
            pixels_per_unit: PIXELS_PER_UNIT,
            left_margin: LEFT_MARGIN,
            row_height: ROW_HEIGHT,
            bar_height: BAR_HEIGHT,
            bar_top: BAR_TOP,
            canvas_width: CANVAS_WIDTH,
            height_padding: HEIGHT_PADDING,
            font_size: FONT_SIZE,
        }
    }
}

impl TimelineLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas_width(mut self, width: i32) -> Self {
        self.canvas_width = width;
        self
    }

    pub fn with_pixels_per_unit(mut self, pixels: i32) -> Self {
        self.pixels_per_unit = pixels;
        self
    }
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
        font_size: u32,
        /// Clockwise, in degrees
        rotation: f64,
    },
}

/// Rendered timeline: canvas size plus draw commands in paint order
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub width: i32,
    pub height: i32,
    pub commands: Vec<DrawCommand>,
}

impl Timeline {
    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Canvas size needed for `task_count` task rows plus the kernel row
pub fn preferred_size(task_count: usize, layout: &TimelineLayout) -> (i32, i32) {
    let rows = i32::try_from(task_count).unwrap_or(i32::MAX);
    (
        layout.canvas_width,
        rows.saturating_mul(layout.row_height)
            .saturating_add(layout.height_padding),
    )
}

/// Render a trace into draw commands
///
/// **Public** - main entry point for rendering
pub fn render_timeline(trace: &Trace, layout: &TimelineLayout) -> Timeline {
    let (width, height) = preferred_size(trace.task_count, layout);
    let mut commands = Vec::new();

    draw_events(trace, layout, &mut commands);
    draw_time_axis(trace, layout, height, &mut commands);
    draw_rows(trace.task_count, layout, height, &mut commands);

    debug!(
        "Timeline {}x{} with {} draw commands",
        width,
        height,
        commands.len()
    );

    Timeline {
        width,
        height,
        commands,
    }
}

fn draw_events(trace: &Trace, layout: &TimelineLayout, out: &mut Vec<DrawCommand>) {
    let to_x = |time: f64| -> i32 {
        ((time - trace.start_time) * f64::from(layout.pixels_per_unit)
            + f64::from(layout.left_margin)) as i32
    };

    for event in &trace.events {
        out.push(DrawCommand::FillRect {
            x: to_x(event.start),
            y: row_y(event.task_id as usize, layout),
            width: span_width(event.duration(), layout),
            height: layout.bar_height,
            color: task_color(event.task_id),
        });
    }

    let kernel_y = row_y(trace.kernel_row(), layout);
    for gap in trace.kernel_gaps() {
        out.push(DrawCommand::FillRect {
            x: to_x(gap.start),
            y: kernel_y,
            width: span_width(gap.duration(), layout),
            height: layout.bar_height,
            color: kernel_color(gap.dispatch),
        });
    }
}

fn draw_time_axis(trace: &Trace, layout: &TimelineLayout, height: i32, out: &mut Vec<DrawCommand>) {
    let step = layout.pixels_per_unit.max(1);
    let ms_per_unit = trace.resolution.ms_per_unit() as f32;
    let mut column = trace.start_time as i64;
    let mut x = layout.left_margin;

    while x < layout.canvas_width {
        out.push(DrawCommand::Line {
            x1: x,
            y1: GRID_TOP,
            x2: x,
            y2: height - AXIS_LINE_INSET,
            color: Color::LIGHT_GRAY,
        });

        if column % LABEL_EVERY == 0 {
            out.push(DrawCommand::Text {
                x: x - AXIS_LABEL_SHIFT,
                y: height - AXIS_LABEL_INSET,
                text: format_axis_label(column as f32 * ms_per_unit),
                color: Color::BLACK,
                font_size: layout.font_size,
                rotation: AXIS_LABEL_ROTATION,
            });
        }

        column += 1;
        x = x.saturating_add(step);
    }
}

fn draw_rows(task_count: usize, layout: &TimelineLayout, height: i32, out: &mut Vec<DrawCommand>) {
    let step = layout.row_height.max(1);
    let mut y = layout.bar_top + layout.bar_height;
    let mut row = 0;

    while y < height - ROW_LINE_INSET {
        out.push(DrawCommand::Line {
            x1: ROW_LABEL_X,
            y1: y,
            x2: layout.canvas_width,
            y2: y,
            color: Color::LIGHT_GRAY,
        });
        out.push(DrawCommand::Text {
            x: ROW_LABEL_X,
            y,
            text: row_label(row, task_count),
            color: Color::BLACK,
            font_size: layout.font_size,
            rotation: 0.0,
        });

        row += 1;
        y = y.saturating_add(step);
    }
}

fn row_y(row: usize, layout: &TimelineLayout) -> i32 {
    let row = i32::try_from(row).unwrap_or(i32::MAX);
    row.saturating_mul(layout.row_height)
        .saturating_add(layout.bar_top)
}

/// Pixel width of a time span, never below one pixel
fn span_width(duration: f64, layout: &TimelineLayout) -> i32 {
    ((duration * f64::from(layout.pixels_per_unit)) as i32)
        .saturating_add(1)
        .max(1)
}

/// Row label: "Task N" for task rows, "Kernel" past the last task
pub fn row_label(row: usize, task_count: usize) -> String {
    if row < task_count {
        format!("Task {}", row)
    } else {
        "Kernel".to_string()
    }
}

/// Axis label in milliseconds; whole values keep one decimal ("5.0ms")
pub fn format_axis_label(ms: f32) -> String {
    if ms.fract() == 0.0 && ms.abs() < 1e7 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}ms", ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_trace, Resolution};
    use pretty_assertions::assert_eq;

    fn rect_at(timeline: &Timeline, index: usize) -> (i32, i32, i32, i32, Color) {
        match timeline.rects().nth(index) {
            Some(DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            }) => (*x, *y, *width, *height, *color),
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_event_rect_geometry() {
        let trace = parse_trace(
            "# trace\n1 1 1 100 1000 dispatch 3000\n".as_bytes(),
            0.0,
            Resolution::OneMs,
        );
        let timeline = render_timeline(&trace, &TimelineLayout::default());

        // x = 1 * 15 + 200, y = 1 * 24 + 20, width = 2 * 15 + 1
        assert_eq!(rect_at(&timeline, 0), (215, 44, 31, 14, task_color(1)));
        assert_eq!(timeline.rects().count(), 1);
    }

    #[test]
    fn test_kernel_gap_colors() {
        let trace = parse_trace(
            "# trace\n0 1 1 100 1000 dispatch 2000\n1 1 1 100 3000 preempt 4000\n0 1 1 100 5000 dispatch 6000\n"
                .as_bytes(),
            0.0,
            Resolution::OneMs,
        );
        let timeline = render_timeline(&trace, &TimelineLayout::default());

        assert_eq!(timeline.rects().count(), 5);
        let kernel_y = 2 * 24 + 20;
        assert_eq!(rect_at(&timeline, 3), (230, kernel_y, 16, 14, Color::GRAY));
        assert_eq!(rect_at(&timeline, 4), (260, kernel_y, 16, 14, Color::BLACK));
    }

    #[test]
    fn test_negative_width_clamped() {
        let trace = parse_trace(
            "# trace\n0 1 1 100 3000 dispatch 1000\n".as_bytes(),
            0.0,
            Resolution::OneMs,
        );
        let timeline = render_timeline(&trace, &TimelineLayout::default());
        assert_eq!(rect_at(&timeline, 0).2, 1);
    }

    #[test]
    fn test_start_time_shifts_events() {
        let trace = parse_trace(
            "# trace\n0 1 1 100 12000 dispatch 13000\n".as_bytes(),
            10.0,
            Resolution::OneMs,
        );
        let timeline = render_timeline(&trace, &TimelineLayout::default());
        assert_eq!(rect_at(&timeline, 0).0, 2 * 15 + 200);
    }

    #[test]
    fn test_preferred_size() {
        assert_eq!(preferred_size(3, &TimelineLayout::default()), (32_000, 3 * 24 + 140));
    }

    #[test]
    fn test_row_labels() {
        let trace = parse_trace(
            "# trace\n2 1 1 100 1000 dispatch 2000\n".as_bytes(),
            0.0,
            Resolution::OneMs,
        );
        let timeline = render_timeline(&trace, &TimelineLayout::default());
        let rows: Vec<&str> = timeline
            .texts()
            .filter(|t| t.starts_with("Task") || *t == "Kernel")
            .collect();
        assert_eq!(rows, vec!["Task 0", "Task 1", "Task 2", "Kernel"]);
    }

    #[test]
    fn test_axis_labels_every_fifth_column() {
        let trace = parse_trace("# trace\n".as_bytes(), 0.0, Resolution::TwoMs);
        let layout = TimelineLayout::default().with_canvas_width(200 + 15 * 11);
        let timeline = render_timeline(&trace, &layout);

        let labels: Vec<&str> = timeline.texts().filter(|t| t.ends_with("ms")).collect();
        assert_eq!(labels, vec!["0.0ms", "10.0ms", "20.0ms"]);
    }

    #[test]
    fn test_format_axis_label() {
        assert_eq!(format_axis_label(5.0), "5.0ms");
        assert_eq!(format_axis_label(0.5), "0.5ms");
        assert_eq!(format_axis_label(2.5), "2.5ms");
    }

    #[test]
    fn test_row_label() {
        assert_eq!(row_label(0, 2), "Task 0");
        assert_eq!(row_label(2, 2), "Kernel");
    }
}
