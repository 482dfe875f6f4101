//! Configuration and constants for the trace loader and renderer.

/// Current JSON export schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Trace format
pub const MIN_LINE_TOKENS: usize = 7;
pub const FIXED_FIELDS: usize = 5;

/// Highest accepted task id. Every id below it gets a timeline row, so the
/// canvas height and row count grow with it.
pub const MAX_TASK_ID: u32 = 65_535;

/// Label of the kernel operation that switches tasks
pub const DISPATCH_LABEL: &str = "dispatch";

/// Width of the visible window, in display units past the start time.
/// Scanning stops at the first event that ends beyond it.
pub const MAX_TRACE_WINDOW: f64 = 2115.0;

// Timeline layout (pixels)
pub const PIXELS_PER_UNIT: i32 = 15;
pub const LEFT_MARGIN: i32 = 200;
pub const ROW_HEIGHT: i32 = 24;
pub const BAR_HEIGHT: i32 = 14;
pub const BAR_TOP: i32 = 20;
pub const CANVAS_WIDTH: i32 = 32_000;
pub const HEIGHT_PADDING: i32 = 140;
pub const FONT_SIZE: u32 = 11;

/// Axis labels are shown on every Nth vertical gridline
pub const LABEL_EVERY: i64 = 5;

pub const PALETTE_SIZE: usize = 12;

// Environment overrides for the CLI
pub const RESOLUTION_ENV: &str = "KPROFILER_RESOLUTION";
pub const START_TIME_ENV: &str = "KPROFILER_START_TIME";
