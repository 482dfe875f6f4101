//! Colors used on the timeline.

use crate::utils::config::PALETTE_SIZE;
use std::fmt;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Task row colors, cycled by task id
pub const TASK_PALETTE: [Color; PALETTE_SIZE] = [
    Color::rgb(153, 0, 0),
    Color::rgb(153, 76, 0),
    Color::rgb(153, 153, 0),
    Color::rgb(76, 153, 0),
    Color::rgb(0, 153, 0),
    Color::rgb(0, 153, 76),
    Color::rgb(0, 153, 153),
    Color::rgb(0, 76, 153),
    Color::rgb(0, 0, 153),
    Color::rgb(76, 0, 153),
    Color::rgb(153, 0, 153),
    Color::rgb(153, 0, 76),
];

pub fn task_color(task_id: u32) -> Color {
    TASK_PALETTE[task_id as usize % PALETTE_SIZE]
}

/// Kernel row color: black for a dispatch, gray for other overhead
pub fn kernel_color(dispatch: bool) -> Color {
    if dispatch {
        Color::BLACK
    } else {
        Color::GRAY
    }
}
