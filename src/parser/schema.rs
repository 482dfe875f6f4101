//! Trace data model and the JSON export schema.
//!
//! Events are immutable once loaded. A different file, resolution or start
//! time always produces a fresh `Trace`.

use super::resolution::Resolution;
use crate::utils::config::{DISPATCH_LABEL, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scheduling occurrence for a task
///
/// `start` and `stop` are in display units (ticks / resolution divisor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedEvent {
    pub task_id: u32,

    pub priority: i64,

    /// Criticality/period, passed through untouched
    pub c: i64,

    /// Deadline, passed through untouched
    pub d: i64,

    pub start: f64,

    pub stop: f64,

    /// Label of the last (label, stop) pair on the line
    pub label: String,
}

impl SchedEvent {
    /// Stop minus start. Can be negative; the format does not forbid it.
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }

    pub fn is_dispatch(&self) -> bool {
        self.label == DISPATCH_LABEL
    }
}

/// How the scan over the trace file ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Reached end of file
    Complete,

    /// An event ended past the visible window; later lines were not read
    WindowExhausted { line: usize },

    /// A malformed line ended the scan; earlier events are kept
    Truncated { line: usize, reason: String },
}

impl LoadOutcome {
    pub fn is_truncated(&self) -> bool {
        matches!(self, LoadOutcome::Truncated { .. })
    }
}

/// Inter-event gap drawn on the kernel row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelGap {
    /// Stop of the previous event
    pub start: f64,
    /// Start of the current event
    pub end: f64,
    /// Current event is labelled `dispatch`
    pub dispatch: bool,
}

impl KernelGap {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A loaded trace
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// File the trace was read from (None for in-memory readers)
    pub source: Option<PathBuf>,

    pub resolution: Resolution,

    /// Requested start offset in milliseconds
    pub start_time_ms: f64,

    /// Start offset in display units
    pub start_time: f64,

    pub events: Vec<SchedEvent>,

    /// Highest task id seen plus one; the kernel row sits at this index
    pub task_count: usize,

    /// Lines dropped for having too few tokens
    pub skipped_lines: usize,

    pub outcome: LoadOutcome,
}

impl Trace {
    pub fn events_len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Row index of the kernel overhead row
    pub fn kernel_row(&self) -> usize {
        self.task_count
    }

    /// Gaps between consecutive events, in order
    pub fn kernel_gaps(&self) -> impl Iterator<Item = KernelGap> + '_ {
        self.events.windows(2).map(|pair| KernelGap {
            start: pair[0].stop,
            end: pair[1].start,
            dispatch: pair[1].is_dispatch(),
        })
    }

    /// Short "N events, M tasks" report
    pub fn summary(&self) -> String {
        format!("{} events, {} tasks", self.events_len(), self.task_count)
    }

    /// Convert to the on-disk export format
    pub fn to_export(&self) -> TraceExport {
        use chrono::Utc;

        TraceExport {
            version: SCHEMA_VERSION.to_string(),
            source: self
                .source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            resolution: self.resolution,
            start_time_ms: self.start_time_ms,
            task_count: self.task_count,
            event_count: self.events_len(),
            outcome: self.outcome.clone(),
            events: self.events.clone(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Top-level structure of an exported trace JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceExport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file path (empty when loaded from memory)
    pub source: String,

    pub resolution: Resolution,

    pub start_time_ms: f64,

    pub task_count: usize,

    pub event_count: usize,

    pub outcome: LoadOutcome,

    pub events: Vec<SchedEvent>,

    /// Timestamp when the export was generated
    pub generated_at: String,
}
