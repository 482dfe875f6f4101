//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod plot;
pub mod session;
pub mod utils;

// Re-export main command functions
pub use analyze::execute_analyze;
pub use models::{AnalyzeArgs, PlotArgs};
pub use plot::{execute_plot, validate_plot_args, validate_start_time, PlotOutput};
pub use session::{TraceSession, TraceView};
pub use utils::{display_version, validate_export_file};
