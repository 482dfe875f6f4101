//! Plot command implementation.
//!
//! The plot command, for each trace:
//! 1. Loads the trace log
//! 2. Renders the timeline
//! 3. Writes the SVG (and optionally the JSON export)

use super::models::PlotArgs;
use super::session::TraceSession;
use crate::output::{write_svg, write_trace_export};
use crate::parser::LoadOutcome;
use crate::render::{render_timeline, timeline_to_svg};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Files produced for one trace
#[derive(Debug, Clone)]
pub struct PlotOutput {
    pub title: String,
    pub svg_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub events: usize,
    pub tasks: usize,
    pub outcome: LoadOutcome,
}

/// Execute the plot command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * A trace file cannot be opened
/// * Output files cannot be written
///
/// A trace that ends in garbage still plots; the truncation is logged.
pub fn execute_plot(args: PlotArgs) -> Result<Vec<PlotOutput>> {
    let started = Instant::now();
    let mut session = TraceSession::new();
    let mut outputs = Vec::with_capacity(args.traces.len());

    info!(
        "Plotting {} trace(s) at {} from {} ms",
        args.traces.len(),
        args.resolution,
        args.start_time_ms
    );

    for path in &args.traces {
        let view = session
            .open(path, args.start_time_ms, args.resolution)
            .with_context(|| format!("Failed to load trace {}", path.display()))?;

        if let LoadOutcome::Truncated { line, reason } = &view.trace.outcome {
            warn!(
                "{}: stopped at line {} ({}), plotting what was read",
                path.display(),
                line,
                reason
            );
        }

        let title = args.title.clone().unwrap_or_else(|| view.title.clone());
        let timeline = render_timeline(&view.trace, &args.layout);
        debug!("{}: canvas {}x{}", title, timeline.width, timeline.height);

        let svg_path = output_file(&args.output_dir, path, "svg");
        write_svg(&timeline_to_svg(&timeline, &title), &svg_path)
            .with_context(|| format!("Failed to write timeline {}", svg_path.display()))?;
        info!("✓ Timeline written to: {}", svg_path.display());

        let json_path = if args.export_json {
            let json_path = output_file(&args.output_dir, path, "json");
            write_trace_export(&view.trace.to_export(), &json_path)
                .with_context(|| format!("Failed to write export {}", json_path.display()))?;
            info!("✓ Export written to: {}", json_path.display());
            Some(json_path)
        } else {
            None
        };

        println!("{}: {}", title, view.trace.summary());

        outputs.push(PlotOutput {
            title,
            svg_path,
            json_path,
            events: view.trace.events_len(),
            tasks: view.trace.task_count,
            outcome: view.trace.outcome,
        });
    }

    info!(
        "Plotted {} trace(s) in {:.2}s",
        session.opened(),
        started.elapsed().as_secs_f64()
    );

    Ok(outputs)
}

/// `<dir>/<trace stem>.<ext>`
fn output_file(dir: &Path, trace: &Path, ext: &str) -> PathBuf {
    let stem = trace
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_string());
    dir.join(format!("{}.{}", stem, ext))
}

/// Validate plot arguments
///
/// **Public** - can be called before execute_plot for early validation
pub fn validate_plot_args(args: &PlotArgs) -> Result<()> {
    if args.traces.is_empty() {
        anyhow::bail!("At least one trace file is required");
    }

    validate_start_time(args.start_time_ms)?;

    let mut stems = HashSet::new();
    for trace in &args.traces {
        if !trace.is_file() {
            anyhow::bail!("Trace file not found: {}", trace.display());
        }
        if !stems.insert(trace.file_stem().map(|s| s.to_os_string())) {
            anyhow::bail!(
                "Two traces would write the same output file: {}",
                trace.display()
            );
        }
    }

    if args.layout.pixels_per_unit <= 0 {
        anyhow::bail!("pixels per unit must be greater than 0");
    }

    Ok(())
}

/// Start offset must be a finite, non-negative number of ms
pub fn validate_start_time(start_time_ms: f64) -> Result<()> {
    if !start_time_ms.is_finite() {
        anyhow::bail!("Start time must be a finite number");
    }
    if start_time_ms < 0.0 {
        anyhow::bail!("Start time cannot be negative");
    }
    Ok(())
}
