//! Analyze command implementation.
//!
//! Loads one trace and reports per-task utilization and kernel overhead.

use super::models::AnalyzeArgs;
use super::plot::validate_start_time;
use crate::aggregator::{analyze_trace, generate_text_summary, TraceAnalysis};
use crate::output::write_json;
use crate::parser::load_trace;
use anyhow::{Context, Result};
use log::info;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
pub fn execute_analyze(args: AnalyzeArgs) -> Result<TraceAnalysis> {
    validate_start_time(args.start_time_ms)?;

    let trace = load_trace(&args.trace, args.start_time_ms, args.resolution)
        .with_context(|| format!("Failed to load trace {}", args.trace.display()))?;

    let analysis = analyze_trace(&trace);
    info!("Analysis: {}", analysis.summary());

    if let Some(path) = &args.output_json {
        write_json(&analysis, path)
            .with_context(|| format!("Failed to write analysis {}", path.display()))?;
        info!("✓ Analysis written to: {}", path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(60));
        println!("TRACE ANALYSIS");
        println!("{}", "=".repeat(60));
        println!("Trace:      {}", args.trace.display());
        println!("Resolution: {}", trace.resolution);
        println!("Loaded:     {}", trace.summary());
        println!("\n{}", generate_text_summary(&analysis));
        println!("{}", "=".repeat(60));
    }

    Ok(analysis)
}
