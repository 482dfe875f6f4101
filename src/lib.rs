//! kprofiler
//!
//! Timeline viewer for execution traces written by a real-time kernel.
//!
//! The library loads a trace log into scheduling events, renders a
//! Gantt-style timeline (one row per task plus a kernel overhead row) as
//! draw commands, and writes it out as SVG.
//!
//! ## Getting Started
//!
//! ```bash
//! kprofiler plot kernel.log --resolution 1ms --start-time 0
//! kprofiler analyze kernel.log
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod render;
pub mod utils;
