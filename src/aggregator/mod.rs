//! Aggregation of trace events into statistics.
//!
//! This module turns a loaded trace into:
//! - Per-task event counts, busy time and utilization
//! - Kernel overhead split into dispatches and other gaps

pub mod metrics;

// Re-export main types and functions
pub use metrics::{analyze_trace, generate_text_summary, KernelOverhead, TaskStats, TraceAnalysis};
