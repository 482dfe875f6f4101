//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a trace
///
/// Only failures that leave us with no trace at all end up here.
/// Problems inside the file are recorded as a truncation instead.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot open trace file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid resolution '{0}' (expected one of: 0.1ms, 0.5ms, 1ms, 2ms, 10ms)")]
    InvalidResolution(String),
}

/// Reasons a single trace line stops the scan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("field '{field}' is not an integer: '{value}'")]
    InvalidInteger { field: &'static str, value: String },

    #[error("task id {value} is out of range")]
    TaskOutOfRange { value: String },

    #[error("label '{label}' has no stop tick")]
    MissingStop { label: String },

    #[error("read failed: {0}")]
    Read(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
