//! kprofiler CLI
//!
//! Plots and analyzes execution traces from a real-time kernel.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use kprofiler::commands::{
    display_version, execute_analyze, execute_plot, validate_export_file, validate_plot_args,
    AnalyzeArgs, PlotArgs,
};
use kprofiler::parser::Resolution;
use kprofiler::render::TimelineLayout;
use kprofiler::utils::config::{RESOLUTION_ENV, START_TIME_ENV};

/// Kernel trace profiler - scheduling timelines for real-time kernel traces
#[derive(Parser, Debug)]
#[command(name = "kprofiler")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render trace timelines to SVG
    Plot {
        /// Trace log files
        #[arg(required = true)]
        traces: Vec<PathBuf>,

        /// Tick resolution: 0.1ms, 0.5ms, 1ms, 2ms or 10ms
        #[arg(short, long, default_value = "1ms", env = RESOLUTION_ENV)]
        resolution: Resolution,

        /// Start time in milliseconds
        #[arg(short, long, default_value = "0.0", env = START_TIME_ENV)]
        start_time: f64,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Also export parsed events as JSON
        #[arg(long)]
        json: bool,

        /// Timeline title
        #[arg(long)]
        title: Option<String>,

        /// Canvas width in pixels
        #[arg(long, default_value = "32000")]
        width: i32,

        /// Horizontal pixels per display unit
        #[arg(long, default_value = "15")]
        scale: i32,
    },

    /// Report per-task utilization and kernel overhead
    Analyze {
        /// Trace log file
        trace: PathBuf,

        /// Tick resolution: 0.1ms, 0.5ms, 1ms, 2ms or 10ms
        #[arg(short, long, default_value = "1ms", env = RESOLUTION_ENV)]
        resolution: Resolution,

        /// Start time in milliseconds
        #[arg(short, long, default_value = "0.0", env = START_TIME_ENV)]
        start_time: f64,

        /// Write the analysis as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Validate a trace export JSON file
    Validate {
        /// Path to export JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Plot {
            traces,
            resolution,
            start_time,
            output,
            json,
            title,
            width,
            scale,
        } => {
            let args = PlotArgs {
                traces,
                resolution,
                start_time_ms: start_time,
                output_dir: output,
                export_json: json,
                title,
                layout: TimelineLayout::new()
                    .with_canvas_width(width)
                    .with_pixels_per_unit(scale),
            };

            validate_plot_args(&args)?;
            execute_plot(args)?;
        }

        Commands::Analyze {
            trace,
            resolution,
            start_time,
            json,
        } => {
            execute_analyze(AnalyzeArgs {
                trace,
                resolution,
                start_time_ms: start_time,
                output_json: json,
                print_summary: true,
            })?;
        }

        Commands::Validate { file } => {
            validate_export_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
