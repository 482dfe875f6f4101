//! Main parser for kernel execution-trace logs.
//!
//! The log is plain text: a header line, then one event per line:
//!
//! ```text
//! <task> <priority> <C> <D> <start_tick> <label> <stop_tick> [<label> <stop_tick> ...]
//! ```
//!
//! Parsing is best-effort. Short lines are skipped, and the first malformed
//! line ends the scan while keeping everything read before it. Logs pulled
//! from a crashed target often end in garbage.

use super::resolution::Resolution;
use super::schema::{LoadOutcome, SchedEvent, Trace};
use crate::utils::config::{FIXED_FIELDS, MAX_TASK_ID, MAX_TRACE_WINDOW, MIN_LINE_TOKENS};
use crate::utils::error::{LineError, ParseError};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Classification of one trace line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// Fewer than the minimum number of tokens
    Skipped,
    /// Starts before the requested start time
    BeforeStart,
    Event(SchedEvent),
}

/// Load a trace file
///
/// **Public** - main entry point for loading
///
/// # Arguments
/// * `path` - Trace log to read
/// * `start_time_ms` - Events starting before this offset are dropped
/// * `resolution` - Tick conversion
///
/// # Errors
/// * `ParseError::Io` - The file cannot be opened. Nothing is loaded.
///
/// Problems inside the file never fail the load; see `Trace::outcome`.
pub fn load_trace(
    path: impl AsRef<Path>,
    start_time_ms: f64,
    resolution: Resolution,
) -> Result<Trace, ParseError> {
    let path = path.as_ref();

    debug!("Opening trace: {}", path.display());

    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut trace = parse_trace(BufReader::new(file), start_time_ms, resolution);
    trace.source = Some(path.to_path_buf());

    info!("{}: {}", path.display(), trace.summary());

    Ok(trace)
}

/// Parse a trace from any buffered reader
///
/// **Public** - used by `load_trace` and by tests with in-memory logs
pub fn parse_trace<R: BufRead>(mut reader: R, start_time_ms: f64, resolution: Resolution) -> Trace {
    let start_time = resolution.normalize_start(start_time_ms);
    let window_end = MAX_TRACE_WINDOW + start_time;

    debug!(
        "Parsing trace at {} from {} ms ({} units)",
        resolution, start_time_ms, start_time
    );

    let mut events = Vec::new();
    let mut max_task: u32 = 0;
    let mut skipped_lines = 0;
    let mut before_start = 0;
    let mut buf = Vec::new();

    // Header is line 1, dropped without decoding
    let outcome = match reader.read_until(b'\n', &mut buf) {
        Err(e) => truncated(1, LineError::Read(e.to_string())),
        Ok(_) => {
            let mut outcome = LoadOutcome::Complete;

            for line_no in 2.. {
                let line = match read_line_lossy(&mut reader, &mut buf) {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        outcome = truncated(line_no, LineError::Read(e.to_string()));
                        break;
                    }
                };

                match parse_event_line(&line, resolution, start_time) {
                    Ok(ParsedLine::Skipped) => skipped_lines += 1,
                    Ok(ParsedLine::BeforeStart) => before_start += 1,
                    Ok(ParsedLine::Event(event)) => {
                        max_task = max_task.max(event.task_id);
                        let past_window = event.stop > window_end;
                        events.push(event);

                        if past_window {
                            debug!("Window exhausted at line {}", line_no);
                            outcome = LoadOutcome::WindowExhausted { line: line_no };
                            break;
                        }
                    }
                    Err(e) => {
                        outcome = truncated(line_no, e);
                        break;
                    }
                }
            }

            outcome
        }
    };

    debug!(
        "{} events, {} short lines skipped, {} before start",
        events.len(),
        skipped_lines,
        before_start
    );

    Trace {
        source: None,
        resolution,
        start_time_ms,
        start_time,
        events,
        task_count: max_task as usize + 1,
        skipped_lines,
        outcome,
    }
}

/// Classify and parse a single (non-header) line
///
/// **Public** - exposed for line-level testing
///
/// `start_time` is in display units. Pairs after the fifth field are all
/// parsed but only the last one is kept. A line that starts before
/// `start_time` is rejected before its pairs are looked at.
pub fn parse_event_line(
    line: &str,
    resolution: Resolution,
    start_time: f64,
) -> Result<ParsedLine, LineError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_LINE_TOKENS {
        return Ok(ParsedLine::Skipped);
    }

    let task_id = parse_task_id(tokens[0])?;
    let priority: i64 = parse_field("priority", tokens[1])?;
    let c: i64 = parse_field("C", tokens[2])?;
    let d: i64 = parse_field("D", tokens[3])?;
    let start = resolution.to_units(parse_field("start", tokens[4])?);

    if start < start_time {
        return Ok(ParsedLine::BeforeStart);
    }

    let mut label = tokens[FIXED_FIELDS];
    let mut stop_tick: i64 = parse_field("stop", tokens[FIXED_FIELDS + 1])?;

    for pair in tokens[FIXED_FIELDS + 2..].chunks(2) {
        label = pair[0];
        let Some(tick) = pair.get(1) else {
            return Err(LineError::MissingStop {
                label: label.to_string(),
            });
        };
        stop_tick = parse_field("stop", tick)?;
    }

    Ok(ParsedLine::Event(SchedEvent {
        task_id,
        priority,
        c,
        d,
        start,
        stop: resolution.to_units(stop_tick),
        label: label.to_string(),
    }))
}

/// Read the next line, replacing invalid UTF-8 with U+FFFD
///
/// Returns `None` at end of input. Only I/O failures are errors.
fn read_line_lossy<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Parse the task id: a non-negative 32-bit signed integer no larger than
/// `MAX_TASK_ID`
fn parse_task_id(value: &str) -> Result<u32, LineError> {
    let id: i32 = parse_field("task", value)?;
    u32::try_from(id)
        .ok()
        .filter(|id| *id <= MAX_TASK_ID)
        .ok_or_else(|| LineError::TaskOutOfRange {
            value: value.to_string(),
        })
}

/// Parse one integer field
///
/// **Private** - internal utility
fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, LineError> {
    value.parse::<T>().map_err(|_| LineError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

fn truncated(line: usize, error: LineError) -> LoadOutcome {
    warn!("Trace truncated at line {}: {}", line, error);
    LoadOutcome::Truncated {
        line,
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(log: &str, start_ms: f64, resolution: Resolution) -> Trace {
        parse_trace(log.as_bytes(), start_ms, resolution)
    }

    #[test]
    fn test_single_dispatch_event() {
        let trace = parse("# trace\n0 1 1 100 1000 dispatch 2000\n", 0.0, Resolution::OneMs);

        assert_eq!(
            trace.events,
            vec![SchedEvent {
                task_id: 0,
                priority: 1,
                c: 1,
                d: 100,
                start: 1.0,
                stop: 2.0,
                label: "dispatch".to_string(),
            }]
        );
        assert_eq!(trace.task_count, 1);
        assert_eq!(trace.outcome, LoadOutcome::Complete);
    }

    #[test]
    fn test_two_ms_resolution_halves_times() {
        let trace = parse("# trace\n0 1 1 100 1000 dispatch 2000\n", 0.0, Resolution::TwoMs);

        assert_eq!(trace.events[0].start, 0.5);
        assert_eq!(trace.events[0].stop, 1.0);
    }

    #[test]
    fn test_header_is_discarded() {
        // A header that looks like an event is still dropped
        let trace = parse(
            "3 1 1 100 1000 dispatch 2000\n0 1 1 100 1000 dispatch 2000\n",
            0.0,
            Resolution::OneMs,
        );
        assert_eq!(trace.events_len(), 1);
        assert_eq!(trace.events[0].task_id, 0);
    }

    #[test]
    fn test_short_line_skipped() {
        let trace = parse(
            "# trace\n1 2 3 4 5\n0 1 1 100 1000 dispatch 2000\n",
            0.0,
            Resolution::OneMs,
        );
        assert_eq!(trace.events_len(), 1);
        assert_eq!(trace.skipped_lines, 1);
    }

    #[test]
    fn test_last_pair_wins() {
        let trace = parse(
            "# trace\n2 1 1 100 1000 preempt 1500 dispatch 3000\n",
            0.0,
            Resolution::OneMs,
        );
        assert_eq!(trace.events[0].label, "dispatch");
        assert_eq!(trace.events[0].stop, 3.0);
        assert_eq!(trace.task_count, 3);
    }

    #[test]
    fn test_garbage_truncates() {
        let trace = parse(
            "# trace\n0 1 1 100 1000 dispatch 2000\n1 1 1 100 2100 dispatch 3000\nzz 1 1 100 3100 dispatch 4000\n2 1 1 100 4100 dispatch 5000\n",
            0.0,
            Resolution::OneMs,
        );
        assert_eq!(trace.events_len(), 2);
        assert_eq!(trace.task_count, 2);
        assert!(matches!(trace.outcome, LoadOutcome::Truncated { line: 4, .. }));
    }

    #[test]
    fn test_dangling_label_truncates() {
        let trace = parse(
            "# trace\n0 1 1 100 1000 dispatch 2000\n1 1 1 100 2100 dispatch 3000 exit\n",
            0.0,
            Resolution::OneMs,
        );
        assert_eq!(trace.events_len(), 1);
        assert!(trace.outcome.is_truncated());
    }

    #[test]
    fn test_before_start_skipped_without_reading_pairs() {
        // The first line has a bad stop tick but starts too early to matter
        let trace = parse(
            "# trace\n0 1 1 100 1000 dispatch oops\n1 1 1 100 5000 dispatch 6000\n",
            4.0,
            Resolution::OneMs,
        );
        assert_eq!(trace.events_len(), 1);
        assert_eq!(trace.events[0].task_id, 1);
        assert_eq!(trace.outcome, LoadOutcome::Complete);
    }

    #[test]
    fn test_start_time_normalized_by_resolution() {
        // 4 ms at 2ms resolution is 2 units; a start of 2000 ticks is 1 unit
        let trace = parse(
            "# trace\n0 1 1 100 2000 dispatch 3000\n1 1 1 100 6000 dispatch 7000\n",
            4.0,
            Resolution::TwoMs,
        );
        assert_eq!(trace.start_time, 2.0);
        assert_eq!(trace.events_len(), 1);
        assert_eq!(trace.events[0].start, 3.0);
    }

    #[test]
    fn test_stops_after_window() {
        let trace = parse(
            "# trace\n0 1 1 100 1000 dispatch 2000\n1 1 1 100 2000 dispatch 2116000\n2 1 1 100 2117000 dispatch 2118000\n",
            0.0,
            Resolution::OneMs,
        );
        assert_eq!(trace.events_len(), 2);
        assert_eq!(trace.task_count, 2);
        assert_eq!(trace.outcome, LoadOutcome::WindowExhausted { line: 3 });
    }

    #[test]
    fn test_negative_task_id_truncates() {
        let result = parse_event_line("-1 1 1 100 1000 dispatch 2000", Resolution::OneMs, 0.0);
        assert!(matches!(
            result,
            Err(LineError::TaskOutOfRange { .. })
        ));
    }

    #[test]
    fn test_task_id_beyond_int_range_truncates() {
        let result = parse_event_line("4000000000 1 1 100 1000 dispatch 2000", Resolution::OneMs, 0.0);
        assert!(matches!(
            result,
            Err(LineError::InvalidInteger { field: "task", .. })
        ));
    }

    #[test]
    fn test_task_id_above_row_limit_truncates() {
        let trace = parse_trace(
            "# trace\n0 1 1 100 1000 dispatch 2000\n70000 1 1 100 2000 dispatch 3000\n".as_bytes(),
            0.0,
            Resolution::OneMs,
        );
        assert_eq!(trace.events.len(), 1);
        assert_eq!(trace.task_count, 1);
        match trace.outcome {
            LoadOutcome::Truncated { line, reason } => {
                assert_eq!(line, 3);
                assert_eq!(reason, "task id 70000 is out of range");
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let trace = parse("", 0.0, Resolution::OneMs);
        assert!(trace.is_empty());
        assert_eq!(trace.task_count, 1);
        assert_eq!(trace.outcome, LoadOutcome::Complete);
    }

    #[test]
    fn test_stop_before_start_is_kept() {
        let trace = parse("# trace\n0 1 1 100 3000 dispatch 2000\n", 0.0, Resolution::OneMs);
        assert_eq!(trace.events_len(), 1);
        assert!(trace.events[0].duration() < 0.0);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_trace("/nonexistent/kernel.log", 0.0, Resolution::OneMs);
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
