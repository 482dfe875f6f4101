//! Timeline rendering.
//!
//! This module converts a loaded trace into draw commands on a fixed
//! pixel grid, and serializes those commands to SVG.

pub mod palette;
pub mod svg;
pub mod timeline;

// Re-export main types
pub use palette::{kernel_color, task_color, Color, TASK_PALETTE};
pub use svg::timeline_to_svg;
pub use timeline::{
    preferred_size, render_timeline, row_label, DrawCommand, Timeline, TimelineLayout,
};
