//! Display Formatting
//!
//! Pure helpers turning raw numbers and instants into display strings.

use chrono::{DateTime, FixedOffset, TimeZone};

/// How much of an instant an axis or tooltip label shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelGranularity {
    /// `H:MM`
    TimeOnly,
    /// `M/D H:MM`
    DateTime,
}

impl LabelGranularity {
    /// Pick the granularity for a merged data span in milliseconds.
    ///
    /// Spans above 24 hours need the date to stay unambiguous.
    pub fn for_span_ms(span_ms: i64) -> Self {
        if span_ms > 24 * 3600 * 1000 {
            LabelGranularity::DateTime
        } else {
            LabelGranularity::TimeOnly
        }
    }

    /// ECharts time-axis template for this granularity
    pub fn echarts_template(&self) -> &'static str {
        match self {
            LabelGranularity::TimeOnly => "{H}:{mm}",
            LabelGranularity::DateTime => "{M}/{d} {H}:{mm}",
        }
    }
}

/// Abbreviate a hot value with 万 (1e4) / 亿 (1e8) units
pub fn format_hot(value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    if value > 100_000_000 {
        return format!("{:.1}亿", value as f64 / 100_000_000.0);
    }
    if value > 10_000 {
        return format!("{:.1}万", value as f64 / 10_000.0);
    }
    value.to_string()
}

/// Convert Unix milliseconds to a datetime in the display offset
pub fn to_display_time(ts_ms: i64, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    offset.timestamp_millis_opt(ts_ms).single()
}

/// Wall-clock label used for "last updated"
pub fn format_clock(ts_ms: i64, offset: &FixedOffset) -> String {
    to_display_time(ts_ms, offset)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Escape text for safe interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
