use crate::output::read_trace_export;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a trace export JSON file
pub fn validate_export_file(file_path: &Path) -> Result<()> {
    println!("Validating export: {}", file_path.display());

    let export = read_trace_export(file_path)
        .with_context(|| format!("Invalid trace export {}", file_path.display()))?;

    if export.event_count != export.events.len() {
        anyhow::bail!(
            "Export claims {} events but contains {}",
            export.event_count,
            export.events.len()
        );
    }

    println!("✓ Valid trace export");
    println!("  Version: {}", export.version);
    println!("  Source: {}", export.source);
    println!("  Resolution: {}", export.resolution);
    println!("  Start time: {} ms", export.start_time_ms);
    println!("  Events: {}", export.event_count);
    println!("  Tasks: {}", export.task_count);

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("kprofiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Export Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Timeline viewer for real-time kernel execution traces.");
}
