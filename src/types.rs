//! Core data types for the Hotboard client
//!
//! This module defines the records exchanged with the hot-word backend:
//! - `HotWordItem`: One entry of the current hot list
//! - `RisingItem` and `RankChange`: Entries of the rising list
//! - `TrendPoint`: A single trend/history sample for a word
//! - `Settings`: Server-side monitor settings mirrored by the dashboard
//! - `SnapshotSummary`: One row of the snapshot history

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Tags the backend uses to mark an item as trending hard
const ELEVATED_TAGS: [&str; 2] = ["热", "爆"];

/// A single entry of the hot list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotWordItem {
    /// The hot word itself
    pub word: String,
    /// Popularity score; zero means the word has no ranking yet
    #[serde(default, deserialize_with = "null_as_default")]
    pub hot_value: u64,
    /// Source-provided category tag
    #[serde(default)]
    pub tag: Option<String>,
    /// Signed change in list position, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_change: Option<i64>,
    /// Position on the source board
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Link to the topic page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl HotWordItem {
    /// Create an item with the given word and hot value
    pub fn new(word: impl Into<String>, hot_value: u64) -> Self {
        Self {
            word: word.into(),
            hot_value,
            tag: None,
            rank_change: None,
            position: None,
            url: None,
        }
    }

    /// Builder method: set the category tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Items without a hot value are new entries
    pub fn is_new_entry(&self) -> bool {
        self.hot_value == 0
    }

    /// Whether the source tag marks this item as elevated ("HOT")
    pub fn is_elevated(&self) -> bool {
        self.tag
            .as_deref()
            .map(|t| ELEVATED_TAGS.contains(&t))
            .unwrap_or(false)
    }
}

/// Rank movement reported by the rising list
///
/// The backend reports `"TOP"` instead of a number when there are not yet
/// two snapshots to compare.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RankChange {
    Delta(i64),
    Marker(String),
}

impl RankChange {
    /// Numeric movement, including markers like `"+345"`
    pub fn delta(&self) -> Option<i64> {
        match self {
            RankChange::Delta(n) => Some(*n),
            RankChange::Marker(s) => s.trim().parse().ok(),
        }
    }

    /// Large jumps get the rocket icon
    pub fn is_surging(&self) -> bool {
        self.delta().is_some_and(|n| n > 10)
    }
}

impl std::fmt::Display for RankChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankChange::Delta(n) => write!(f, "{}", n),
            RankChange::Marker(s) => write!(f, "{}", s),
        }
    }
}

/// A single entry of the rising list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RisingItem {
    pub word: String,
    pub rank_change: RankChange,
}

/// A trend or history sample
///
/// Trend samples carry `time`, history samples carry `timestamp`.
/// Both normalize to the same instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Missing or `null` samples stay `None` so the chart can bridge them
    #[serde(default)]
    pub hot_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl TrendPoint {
    /// Create a trend-style sample
    pub fn at(time: impl Into<String>, hot_value: f64) -> Self {
        Self {
            time: Some(time.into()),
            timestamp: None,
            hot_value: Some(hot_value),
            position: None,
        }
    }

    /// The raw instant string, preferring `time` over `timestamp`
    pub fn raw_instant(&self) -> Option<&str> {
        self.time
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.timestamp.as_deref().filter(|s| !s.is_empty()))
    }

    /// Instant of this sample in Unix milliseconds
    pub fn instant_millis(&self, offset: &FixedOffset) -> Option<i64> {
        parse_instant(self.raw_instant()?, offset)
    }
}

/// Parse a backend timestamp into Unix milliseconds.
///
/// Values without an offset are interpreted in `offset`.
pub fn parse_instant(raw: &str, offset: &FixedOffset) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(raw, fmt)
            .ok()
            .and_then(|naive| offset.from_local_datetime(&naive).single())
            .map(|dt| dt.timestamp_millis())
    })
}

// ============================================
// Settings
// ============================================

pub const DEFAULT_SCRAPE_INTERVAL_MINUTES: u32 = 10;
pub const DEFAULT_AUTO_REFRESH_SECONDS: u32 = 60;
pub const DEFAULT_MAX_HISTORY_DAYS: u32 = 7;

/// Monitor settings, owned by the backend and mirrored locally
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub scrape_interval_minutes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_refresh_seconds: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_history_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scrape_interval_minutes: DEFAULT_SCRAPE_INTERVAL_MINUTES,
            auto_refresh_seconds: DEFAULT_AUTO_REFRESH_SECONDS,
            max_history_days: DEFAULT_MAX_HISTORY_DAYS,
        }
    }
}

impl Settings {
    /// Create settings from user input, rejecting zero values
    pub fn new(
        scrape_interval_minutes: u32,
        auto_refresh_seconds: u32,
        max_history_days: u32,
    ) -> Result<Self, SettingsError> {
        for (field, value) in [
            ("scrape_interval_minutes", scrape_interval_minutes),
            ("auto_refresh_seconds", auto_refresh_seconds),
            ("max_history_days", max_history_days),
        ] {
            if value == 0 {
                return Err(SettingsError::NotPositive(field));
            }
        }

        Ok(Self {
            scrape_interval_minutes,
            auto_refresh_seconds,
            max_history_days,
        })
    }

    /// Replace missing (zero) fields with their defaults
    pub fn normalized(self) -> Self {
        fn or_default(value: u32, default: u32) -> u32 {
            if value == 0 {
                default
            } else {
                value
            }
        }

        Self {
            scrape_interval_minutes: or_default(
                self.scrape_interval_minutes,
                DEFAULT_SCRAPE_INTERVAL_MINUTES,
            ),
            auto_refresh_seconds: or_default(self.auto_refresh_seconds, DEFAULT_AUTO_REFRESH_SECONDS),
            max_history_days: or_default(self.max_history_days, DEFAULT_MAX_HISTORY_DAYS),
        }
    }

    /// Clamp to the ranges the backend accepts
    pub fn clamped(self) -> Self {
        Self {
            scrape_interval_minutes: self.scrape_interval_minutes.clamp(1, 60),
            auto_refresh_seconds: self.auto_refresh_seconds.clamp(10, 300),
            max_history_days: self.max_history_days.clamp(1, 30),
        }
    }

    /// Period of the dashboard's recurring refresh
    pub fn refresh_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.normalized().auto_refresh_seconds as u64)
    }
}

/// Settings validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
}

/// One row of the snapshot history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotSummary {
    pub id: i64,
    pub captured_at: String,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_hot_item_classification() {
        let ranked = HotWordItem::new("A", 500_000);
        let fresh = HotWordItem::new("B", 0);

        assert!(!ranked.is_new_entry());
        assert!(fresh.is_new_entry());
    }

    #[test]
    fn test_elevated_tags() {
        assert!(HotWordItem::new("a", 1).tag("热").is_elevated());
        assert!(HotWordItem::new("a", 1).tag("爆").is_elevated());
        assert!(!HotWordItem::new("a", 1).tag("新").is_elevated());
        assert!(!HotWordItem::new("a", 1).is_elevated());
    }

    #[test]
    fn test_hot_item_tolerates_null_hot_value() {
        let item: HotWordItem =
            serde_json::from_str(r#"{"word": "x", "hot_value": null, "tag": null}"#).unwrap();
        assert_eq!(item.hot_value, 0);
        assert!(item.is_new_entry());
    }

    #[test]
    fn test_rank_change_variants() {
        let items: Vec<RisingItem> = serde_json::from_str(
            r#"[{"word": "a", "rank_change": 12}, {"word": "b", "rank_change": "TOP"}]"#,
        )
        .unwrap();

        assert_eq!(items[0].rank_change, RankChange::Delta(12));
        assert!(items[0].rank_change.is_surging());
        assert_eq!(items[1].rank_change, RankChange::Marker("TOP".to_string()));
        assert!(!items[1].rank_change.is_surging());
        assert_eq!(items[1].rank_change.to_string(), "TOP");
    }

    #[test]
    fn test_numeric_markers_count_as_deltas() {
        let items: Vec<RisingItem> = serde_json::from_str(
            r#"[
                {"word": "a", "rank_change": "+345"},
                {"word": "b", "rank_change": "+5"},
                {"word": "c", "rank_change": "+12w"},
                {"word": "d", "rank_change": "NEW"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items[0].rank_change.delta(), Some(345));
        assert!(items[0].rank_change.is_surging());
        assert!(!items[1].rank_change.is_surging());
        assert_eq!(items[2].rank_change.delta(), None);
        assert!(!items[2].rank_change.is_surging());
        assert!(!items[3].rank_change.is_surging());
        assert_eq!(items[0].rank_change.to_string(), "+345");
    }

    #[test]
    fn test_trend_point_prefers_time() {
        let point: TrendPoint = serde_json::from_str(
            r#"{"time": "2024-01-14 10:00:00", "timestamp": "2020-01-01T00:00:00", "hot_value": 5}"#,
        )
        .unwrap();
        assert_eq!(point.raw_instant(), Some("2024-01-14 10:00:00"));

        let history: TrendPoint =
            serde_json::from_str(r#"{"timestamp": "2024-01-14T10:00:00.123456", "hot_value": 5}"#)
                .unwrap();
        assert_eq!(history.raw_instant(), Some("2024-01-14T10:00:00.123456"));
    }

    #[test]
    fn test_trend_point_keeps_null_hot_value() {
        let points: Vec<TrendPoint> = serde_json::from_str(
            r#"[{"time": "2024-01-14 10:00:00", "hot_value": null}, {"time": "2024-01-14 10:10:00"}]"#,
        )
        .unwrap();
        assert_eq!(points[0].hot_value, None);
        assert_eq!(points[1].hot_value, None);
        assert_eq!(TrendPoint::at("2024-01-14 10:00:00", 3.0).hot_value, Some(3.0));
    }

    #[test]
    fn test_parse_instant_formats() {
        let expected = utc()
            .with_ymd_and_hms(2024, 1, 14, 10, 0, 0)
            .unwrap()
            .timestamp_millis();

        assert_eq!(parse_instant("2024-01-14 10:00:00", &utc()), Some(expected));
        assert_eq!(parse_instant("2024-01-14T10:00:00", &utc()), Some(expected));
        assert_eq!(parse_instant("2024-01-14T10:00:00Z", &utc()), Some(expected));
        assert_eq!(
            parse_instant("2024-01-14T18:00:00+08:00", &utc()),
            Some(expected)
        );
        assert_eq!(
            parse_instant("2024-01-14T10:00:00.250", &utc()),
            Some(expected + 250)
        );
        assert_eq!(parse_instant("yesterday", &utc()), None);
    }

    #[test]
    fn test_parse_instant_uses_offset_for_naive_values() {
        let cst = FixedOffset::east_opt(8 * 3600).unwrap();
        let utc_ms = parse_instant("2024-01-14 10:00:00", &utc()).unwrap();
        let cst_ms = parse_instant("2024-01-14 10:00:00", &cst).unwrap();
        assert_eq!(utc_ms - cst_ms, 8 * 3600 * 1000);
    }

    #[test]
    fn test_settings_normalized_and_clamped() {
        let raw: Settings = serde_json::from_str(r#"{"auto_refresh_seconds": 0}"#).unwrap();
        assert_eq!(raw.normalized(), Settings::default());

        let wild = Settings {
            scrape_interval_minutes: 500,
            auto_refresh_seconds: 1,
            max_history_days: 90,
        };
        let clamped = wild.clamped();
        assert_eq!(clamped.scrape_interval_minutes, 60);
        assert_eq!(clamped.auto_refresh_seconds, 10);
        assert_eq!(clamped.max_history_days, 30);
    }

    #[test]
    fn test_settings_new_rejects_zero() {
        assert_eq!(
            Settings::new(10, 0, 7),
            Err(SettingsError::NotPositive("auto_refresh_seconds"))
        );
        assert!(Settings::new(10, 30, 7).is_ok());
    }

    #[test]
    fn test_refresh_period() {
        let settings = Settings::new(10, 30, 7).unwrap();
        assert_eq!(settings.refresh_period(), std::time::Duration::from_secs(30));
    }
}
