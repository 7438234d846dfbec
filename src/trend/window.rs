//! Trend Time Windows
//!
//! The selectable look-back window for trend charts, in whole hours.

use std::str::FromStr;
use thiserror::Error;

const HOUR_MS: i64 = 3600 * 1000;

/// Look-back window for trend aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    hours: u32,
}

impl TimeWindow {
    /// Presets offered by the time-range selector
    pub const PRESETS: [TimeWindow; 4] = [
        TimeWindow { hours: 1 },
        TimeWindow { hours: 6 },
        TimeWindow { hours: 24 },
        TimeWindow { hours: 168 },
    ];

    /// Create a window of `hours` hours
    pub fn hours(hours: u32) -> Result<Self, WindowError> {
        if hours == 0 {
            return Err(WindowError::Empty);
        }
        Ok(Self { hours })
    }

    pub fn as_hours(&self) -> u32 {
        self.hours
    }

    pub fn duration_ms(&self) -> i64 {
        self.hours as i64 * HOUR_MS
    }

    /// Oldest instant still inside the window
    pub fn cutoff_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.duration_ms()
    }

    /// Days requested from the coarse history endpoint.
    ///
    /// Whole days only, never less than one.
    pub fn fallback_days(&self) -> u32 {
        self.hours.div_ceil(24).max(1)
    }

    /// Whether this window is one of the selector presets
    pub fn is_preset(&self) -> bool {
        Self::PRESETS.contains(self)
    }

    /// Short label, e.g. `6h` or `7d`
    pub fn label(&self) -> String {
        if self.hours >= 24 && self.hours % 24 == 0 {
            format!("{}d", self.hours / 24)
        } else {
            format!("{}h", self.hours)
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self { hours: 1 }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = WindowError;

    /// Accepts `6`, `6h`, or `7d`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let (digits, per_unit) = if let Some(d) = s.strip_suffix('d') {
            (d, 24)
        } else if let Some(h) = s.strip_suffix('h') {
            (h, 1)
        } else {
            (s.as_str(), 1)
        };

        let count: u32 = digits
            .parse()
            .map_err(|_| WindowError::Invalid(s.clone()))?;
        let hours = count
            .checked_mul(per_unit)
            .ok_or_else(|| WindowError::Invalid(s.clone()))?;
        Self::hours(hours)
    }
}

/// Time window errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("Time window must be at least one hour")]
    Empty,

    #[error("Invalid time window: {0}")]
    Invalid(String),
}
