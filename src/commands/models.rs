use crate::parser::Resolution;
use crate::render::TimelineLayout;
use std::path::PathBuf;

/// Arguments for the plot command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct PlotArgs {
    /// Trace logs to plot, one timeline each
    pub traces: Vec<PathBuf>,

    pub resolution: Resolution,

    /// Events starting before this offset (ms) are dropped
    pub start_time_ms: f64,

    /// Directory receiving `<stem>.svg` (and `<stem>.json`)
    pub output_dir: PathBuf,

    /// Also export the parsed events as JSON
    pub export_json: bool,

    /// Title override; defaults to "Execution trace #N [path]"
    pub title: Option<String>,

    pub layout: TimelineLayout,
}

impl Default for PlotArgs {
    fn default() -> Self {
        Self {
            traces: Vec::new(),
            resolution: Resolution::default(),
            start_time_ms: 0.0,
            output_dir: PathBuf::from("."),
            export_json: false,
            title: None,
            layout: TimelineLayout::default(),
        }
    }
}

/// Arguments for the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    pub trace: PathBuf,

    pub resolution: Resolution,

    pub start_time_ms: f64,

    /// Write the analysis as JSON here
    pub output_json: Option<PathBuf>,

    /// Print the text table to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::new(),
            resolution: Resolution::default(),
            start_time_ms: 0.0,
            output_json: None,
            print_summary: true,
        }
    }
}
