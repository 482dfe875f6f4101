//! Tick resolution options.
//!
//! The kernel writes raw tick counts. A resolution picks how many ticks make
//! one display unit on the timeline, and how many milliseconds that unit
//! stands for on the axis labels.

use crate::utils::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ticks-per-unit conversion, chosen from a fixed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "0.1ms")]
    TenthMs,
    #[serde(rename = "0.5ms")]
    HalfMs,
    #[default]
    #[serde(rename = "1ms")]
    OneMs,
    #[serde(rename = "2ms")]
    TwoMs,
    #[serde(rename = "10ms")]
    TenMs,
}

impl Resolution {
    pub const ALL: [Resolution; 5] = [
        Resolution::TenthMs,
        Resolution::HalfMs,
        Resolution::OneMs,
        Resolution::TwoMs,
        Resolution::TenMs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TenthMs => "0.1ms",
            Self::HalfMs => "0.5ms",
            Self::OneMs => "1ms",
            Self::TwoMs => "2ms",
            Self::TenMs => "10ms",
        }
    }

    /// Ticks per display unit
    pub fn divisor(self) -> f64 {
        match self {
            Self::TenthMs => 100.0,
            Self::HalfMs => 500.0,
            Self::OneMs => 1000.0,
            Self::TwoMs => 2000.0,
            Self::TenMs => 10000.0,
        }
    }

    /// Milliseconds represented by one display unit
    pub fn ms_per_unit(self) -> f64 {
        self.divisor() / 1000.0
    }

    /// Convert a raw tick count to display units
    pub fn to_units(self, ticks: i64) -> f64 {
        ticks as f64 / self.divisor()
    }

    /// Convert a start offset in milliseconds to display units.
    ///
    /// Event times are compared against this value directly.
    pub fn normalize_start(self, start_time_ms: f64) -> f64 {
        start_time_ms / self.ms_per_unit()
    }
}

impl FromStr for Resolution {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| ParseError::InvalidResolution(s.to_string()))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
