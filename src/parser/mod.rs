//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Reading kernel trace logs line by line
//! - Converting ticks to display units for a chosen resolution
//! - Best-effort truncation on malformed lines
//! - Defining the export schema

pub mod kernel_trace;
pub mod resolution;
pub mod schema;

// Re-export main types
pub use kernel_trace::{load_trace, parse_event_line, parse_trace, ParsedLine};
pub use resolution::Resolution;
pub use schema::{KernelGap, LoadOutcome, SchedEvent, Trace, TraceExport};
