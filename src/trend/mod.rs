//! Trend Aggregation
//!
//! Turns the comparison workspace into chart-ready series.
//!
//! ## Pipeline
//!
//! 1. For each word (in workspace order) fetch fine-grained trend samples
//! 2. Fall back to coarse history when trend fails or comes back empty
//! 3. Drop samples older than the selected window
//! 4. Normalize to `[timestamp_ms, hot_value]` pairs
//!
//! One word failing never aborts the others; it just contributes an
//! empty series.

mod aggregator;
mod generation;
mod window;

pub use aggregator::TrendAggregator;
pub use generation::{GenerationCounter, PassTicket};
pub use window::{TimeWindow, WindowError};

/// `(timestamp_ms, hot_value)`; `None` marks a sample without a value
pub type SeriesPoint = (i64, Option<f64>);

use chrono::FixedOffset;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::types::TrendPoint;

/// Series colors, assigned by workspace index and reused cyclically
pub const PALETTE: [&str; 6] = [
    "#6366f1", // Indigo
    "#ec4899", // Pink
    "#10b981", // Emerald
    "#f59e0b", // Amber
    "#06b6d4", // Cyan
    "#8b5cf6", // Violet
];

/// Color for the series at `index`
pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One word's normalized samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordSeries {
    pub word: String,
    pub color: &'static str,
    /// Samples in source order
    pub points: Vec<SeriesPoint>,
}

/// Result of one aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSet {
    /// Series in workspace order
    pub series: Vec<WordSeries>,
    /// Window the pass was run for
    #[serde(skip)]
    pub window: TimeWindow,
    /// Reference "now" of the pass
    pub now_ms: i64,
}

impl SeriesSet {
    /// Build a set, assigning colors by position
    pub fn new(words: Vec<(String, Vec<SeriesPoint>)>, window: TimeWindow, now_ms: i64) -> Self {
        let series = words
            .into_iter()
            .enumerate()
            .map(|(idx, (word, points))| WordSeries {
                word,
                color: series_color(idx),
                points,
            })
            .collect();

        Self {
            series,
            window,
            now_ms,
        }
    }

    /// Union of every timestamp across all series
    pub fn timestamps(&self) -> BTreeSet<i64> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|(ts, _)| *ts))
            .collect()
    }

    /// `[min, max]` timestamp across all series, if any point exists
    pub fn data_range(&self) -> Option<(i64, i64)> {
        let stamps = self.timestamps();
        Some((*stamps.first()?, *stamps.last()?))
    }

    /// Data range, or the nominal window ending at `now_ms` when empty
    pub fn merged_range(&self) -> (i64, i64) {
        self.data_range()
            .unwrap_or((self.window.cutoff_ms(self.now_ms), self.now_ms))
    }

    pub fn has_points(&self) -> bool {
        self.series.iter().any(|s| !s.points.is_empty())
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.word.as_str())
    }
}

/// Keep samples at or after `cutoff_ms`, normalized to `(ts, value)`.
///
/// Samples whose instant cannot be parsed are dropped. Samples without a
/// value are kept as `None`.
pub fn filter_points(
    points: &[TrendPoint],
    cutoff_ms: i64,
    offset: &FixedOffset,
) -> Vec<SeriesPoint> {
    points
        .iter()
        .filter_map(|p| p.instant_millis(offset).map(|ts| (ts, p.hot_value)))
        .filter(|(ts, _)| *ts >= cutoff_ms)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HOUR: i64 = 3600 * 1000;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn stamp(ms: i64) -> String {
        utc()
            .timestamp_millis_opt(ms)
            .unwrap()
            .format("%Y-%m-%dT%H:%M:%S%.3f")
            .to_string()
    }

    #[test]
    fn test_filter_keeps_cutoff_boundary() {
        let now = 1_700_000_000_000;
        let cutoff = now - 30 * HOUR;
        let points = vec![
            TrendPoint::at(stamp(cutoff - 1), 1.0),
            TrendPoint::at(stamp(cutoff), 2.0),
            TrendPoint::at(stamp(now), 3.0),
        ];

        let kept = filter_points(&points, cutoff, &utc());
        assert_eq!(kept, vec![(cutoff, Some(2.0)), (now, Some(3.0))]);
    }

    #[test]
    fn test_filter_drops_unparseable() {
        let points = vec![TrendPoint::at("not a time", 1.0)];
        assert!(filter_points(&points, 0, &utc()).is_empty());
    }

    #[test]
    fn test_filter_keeps_valueless_samples() {
        let now = 1_700_000_000_000;
        let mut gap = TrendPoint::at(stamp(now - HOUR), 0.0);
        gap.hot_value = None;
        let points = vec![
            TrendPoint::at(stamp(now - 2 * HOUR), 1.0),
            gap,
            TrendPoint::at(stamp(now), 3.0),
        ];

        let kept = filter_points(&points, now - 6 * HOUR, &utc());
        assert_eq!(
            kept,
            vec![(now - 2 * HOUR, Some(1.0)), (now - HOUR, None), (now, Some(3.0))]
        );
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(series_color(0), "#6366f1");
        assert_eq!(series_color(6), "#6366f1");
        assert_eq!(series_color(7), "#ec4899");
    }

    #[test]
    fn test_series_set_ranges() {
        let window = TimeWindow::hours(6).unwrap();
        let set = SeriesSet::new(
            vec![
                ("a".to_string(), vec![(5, Some(1.0)), (9, Some(2.0))]),
                ("b".to_string(), vec![(3, Some(1.0)), (9, None)]),
                ("c".to_string(), vec![]),
            ],
            window,
            100 * HOUR,
        );

        assert_eq!(set.timestamps().into_iter().collect::<Vec<_>>(), vec![3, 5, 9]);
        assert_eq!(set.merged_range(), (3, 9));
        assert_eq!(set.series[1].color, PALETTE[1]);
        assert_eq!(set.words().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_set_falls_back_to_window() {
        let window = TimeWindow::hours(6).unwrap();
        let set = SeriesSet::new(vec![("a".to_string(), vec![])], window, 100 * HOUR);

        assert!(!set.has_points());
        assert_eq!(set.data_range(), None);
        assert_eq!(set.merged_range(), (94 * HOUR, 100 * HOUR));
    }
}
