//! Open traces for one run of the tool.
//!
//! Each opened trace gets its own immutable dataset and a sequence number
//! used in its title. The counter lives here rather than in any global.

use crate::parser::{load_trace, Resolution, Trace};
use crate::utils::error::ParseError;
use std::path::Path;

/// A trace opened within a session
#[derive(Debug, Clone)]
pub struct TraceView {
    /// 1-based open order
    pub number: usize,
    pub title: String,
    pub trace: Trace,
}

/// Tracks the traces opened in this run
#[derive(Debug, Default)]
pub struct TraceSession {
    opened: usize,
}

impl TraceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a trace and number it
    ///
    /// A file that cannot be opened is not counted.
    pub fn open(
        &mut self,
        path: &Path,
        start_time_ms: f64,
        resolution: Resolution,
    ) -> Result<TraceView, ParseError> {
        let trace = load_trace(path, start_time_ms, resolution)?;
        self.opened += 1;

        Ok(TraceView {
            number: self.opened,
            title: format!("Execution trace #{} [{}]", self.opened, path.display()),
            trace,
        })
    }

    pub fn opened(&self) -> usize {
        self.opened
    }
}
