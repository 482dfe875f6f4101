//! Per-task and kernel-overhead statistics.
//!
//! Busy time is the sum of event durations per task. Kernel overhead is the
//! sum of the gaps between consecutive events, split into dispatches and
//! everything else. Negative spans count as zero.

use crate::parser::schema::Trace;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Statistics for one task row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStats {
    pub task_id: u32,

    pub events: usize,

    /// Sum of event durations, in display units
    pub busy: f64,

    pub first_start: f64,

    pub last_stop: f64,

    /// Busy time as a percentage of the trace span
    pub utilization: f64,
}

/// Kernel row statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KernelOverhead {
    pub dispatches: usize,
    pub dispatch_time: f64,
    pub other: usize,
    pub other_time: f64,
}

impl KernelOverhead {
    pub fn total_time(&self) -> f64 {
        self.dispatch_time + self.other_time
    }
}

/// Result of analyzing a trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceAnalysis {
    pub event_count: usize,

    pub task_count: usize,

    /// Last stop minus first start, in display units
    pub span: f64,

    /// Milliseconds per display unit, for reporting
    pub ms_per_unit: f64,

    pub tasks: Vec<TaskStats>,

    pub kernel: KernelOverhead,
}

impl TraceAnalysis {
    pub fn to_ms(&self, units: f64) -> f64 {
        units * self.ms_per_unit
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging
    pub fn summary(&self) -> String {
        format!(
            "Events: {} | Tasks: {} | Span: {:.3} ms | Kernel: {:.3} ms ({} dispatches)",
            self.event_count,
            self.task_count,
            self.to_ms(self.span),
            self.to_ms(self.kernel.total_time()),
            self.kernel.dispatches
        )
    }
}

/// Analyze a loaded trace
///
/// **Public** - main entry point for analysis
pub fn analyze_trace(trace: &Trace) -> TraceAnalysis {
    debug!("Analyzing {} events", trace.events_len());

    let mut by_task: BTreeMap<u32, TaskStats> = BTreeMap::new();
    for event in &trace.events {
        let stats = by_task.entry(event.task_id).or_insert_with(|| TaskStats {
            task_id: event.task_id,
            events: 0,
            busy: 0.0,
            first_start: event.start,
            last_stop: event.stop,
            utilization: 0.0,
        });
        stats.events += 1;
        stats.busy += event.duration().max(0.0);
        stats.first_start = stats.first_start.min(event.start);
        stats.last_stop = stats.last_stop.max(event.stop);
    }

    let span = trace_span(trace);

    let tasks: Vec<TaskStats> = by_task
        .into_values()
        .map(|mut stats| {
            stats.utilization = percentage(stats.busy, span);
            stats
        })
        .collect();

    let mut kernel = KernelOverhead::default();
    for gap in trace.kernel_gaps() {
        let time = gap.duration().max(0.0);
        if gap.dispatch {
            kernel.dispatches += 1;
            kernel.dispatch_time += time;
        } else {
            kernel.other += 1;
            kernel.other_time += time;
        }
    }

    TraceAnalysis {
        event_count: trace.events_len(),
        task_count: trace.task_count,
        span,
        ms_per_unit: trace.resolution.ms_per_unit(),
        tasks,
        kernel,
    }
}

/// Last stop minus first start, zero for an empty trace
fn trace_span(trace: &Trace) -> f64 {
    let first = trace.events.iter().map(|e| e.start).reduce(f64::min);
    let last = trace.events.iter().map(|e| e.stop).reduce(f64::max);
    match (first, last) {
        (Some(first), Some(last)) => (last - first).max(0.0),
        _ => 0.0,
    }
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}

/// Create a text table of the analysis
pub fn generate_text_summary(analysis: &TraceAnalysis) -> String {
    let mut lines = Vec::new();

    lines.push("  TASK UTILIZATION".to_string());
    lines.push("  ┏━━━━━━━━━━━━┳━━━━━━━━━━┳━━━━━━━━━━━━━━┳━━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:<10} ┃ {:^8} ┃ {:^12} ┃ {:^7} ┃",
        "Task", "EVENTS", "BUSY (ms)", "%"
    ));
    lines.push("  ┣━━━━━━━━━━━━╋━━━━━━━━━━╋━━━━━━━━━━━━━━╋━━━━━━━━━┫".to_string());

    for task in &analysis.tasks {
        lines.push(format!(
            "  ┃ {:<10} ┃ {:>8} ┃ {:>12.3} ┃ {:>6.1}% ┃",
            format!("Task {}", task.task_id),
            task.events,
            analysis.to_ms(task.busy),
            task.utilization
        ));
    }

    lines.push("  ┗━━━━━━━━━━━━┻━━━━━━━━━━┻━━━━━━━━━━━━━━┻━━━━━━━━━┛".to_string());
    lines.push(String::new());
    lines.push("  KERNEL OVERHEAD".to_string());
    lines.push(format!(
        "  dispatch: {:>6} gaps {:>12.3} ms",
        analysis.kernel.dispatches,
        analysis.to_ms(analysis.kernel.dispatch_time)
    ));
    lines.push(format!(
        "  other:    {:>6} gaps {:>12.3} ms",
        analysis.kernel.other,
        analysis.to_ms(analysis.kernel.other_time)
    ));
    lines.push(format!(
        "  span:                {:>12.3} ms",
        analysis.to_ms(analysis.span)
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_trace, Resolution};

    const LOG: &str = "# trace\n\
        0 1 1 100 1000 dispatch 3000\n\
        1 2 1 100 4000 dispatch 5000\n\
        0 1 1 100 5000 preempt 9000\n";

    #[test]
    fn test_analyze_tasks() {
        let trace = parse_trace(LOG.as_bytes(), 0.0, Resolution::OneMs);
        let analysis = analyze_trace(&trace);

        assert_eq!(analysis.event_count, 3);
        assert_eq!(analysis.task_count, 2);
        assert_eq!(analysis.span, 8.0);
        assert_eq!(analysis.tasks.len(), 2);

        let task0 = &analysis.tasks[0];
        assert_eq!(task0.events, 2);
        assert_eq!(task0.busy, 6.0);
        assert_eq!(task0.first_start, 1.0);
        assert_eq!(task0.last_stop, 9.0);
        assert_eq!(task0.utilization, 75.0);
    }

    #[test]
    fn test_kernel_overhead() {
        let trace = parse_trace(LOG.as_bytes(), 0.0, Resolution::OneMs);
        let analysis = analyze_trace(&trace);

        assert_eq!(analysis.kernel.dispatches, 1);
        assert_eq!(analysis.kernel.dispatch_time, 1.0);
        assert_eq!(analysis.kernel.other, 1);
        assert_eq!(analysis.kernel.other_time, 0.0);
    }

    #[test]
    fn test_ms_conversion() {
        let trace = parse_trace(LOG.as_bytes(), 0.0, Resolution::TwoMs);
        let analysis = analyze_trace(&trace);

        assert_eq!(analysis.span, 4.0);
        assert_eq!(analysis.to_ms(analysis.span), 8.0);
    }

    #[test]
    fn test_empty_trace() {
        let trace = parse_trace("# trace\n".as_bytes(), 0.0, Resolution::OneMs);
        let analysis = analyze_trace(&trace);

        assert_eq!(analysis.span, 0.0);
        assert!(analysis.tasks.is_empty());
        assert_eq!(analysis.kernel, KernelOverhead::default());
    }

    #[test]
    fn test_negative_duration_counts_zero() {
        let trace = parse_trace(
            "# trace\n0 1 1 100 3000 dispatch 1000\n".as_bytes(),
            0.0,
            Resolution::OneMs,
        );
        let analysis = analyze_trace(&trace);
        assert_eq!(analysis.tasks[0].busy, 0.0);
    }

    #[test]
    fn test_text_summary() {
        let trace = parse_trace(LOG.as_bytes(), 0.0, Resolution::OneMs);
        let text = generate_text_summary(&analyze_trace(&trace));

        assert!(text.contains("Task 0"));
        assert!(text.contains("Task 1"));
        assert!(text.contains("KERNEL OVERHEAD"));
    }
}
