//! Trend Aggregator
//!
//! Resolves every workspace word to a filtered series, one word at a time.

use chrono::FixedOffset;
use std::sync::Arc;

use super::{filter_points, PassTicket, SeriesSet, TimeWindow};
use crate::api::{ApiResult, HotApi};
use crate::types::TrendPoint;

/// Fetches and merges per-word series
#[derive(Clone)]
pub struct TrendAggregator {
    api: Arc<dyn HotApi>,
    offset: FixedOffset,
}

impl TrendAggregator {
    /// Create an aggregator reading offset-less timestamps in `offset`
    pub fn new(api: Arc<dyn HotApi>, offset: FixedOffset) -> Self {
        Self { api, offset }
    }

    /// Fetch samples for one word: trend first, history as fallback
    pub async fn resolve_word(&self, word: &str, window: TimeWindow) -> ApiResult<Vec<TrendPoint>> {
        match self.api.trend(word, window.as_hours()).await {
            Ok(points) if !points.is_empty() => return Ok(points),
            Ok(_) => {
                tracing::debug!(word = %word, "No trend samples, falling back to history");
            }
            Err(e) => {
                tracing::debug!(word = %word, error = %e, "Trend request failed, falling back to history");
            }
        }

        self.api.history(word, window.fallback_days()).await
    }

    /// Run one pass over `words`.
    ///
    /// Returns `None` if `ticket` was superseded before the pass finished.
    pub async fn aggregate(
        &self,
        words: &[String],
        window: TimeWindow,
        now_ms: i64,
        ticket: &PassTicket,
    ) -> Option<SeriesSet> {
        let cutoff = window.cutoff_ms(now_ms);
        let mut resolved = Vec::with_capacity(words.len());

        for word in words {
            if !ticket.is_current() {
                tracing::debug!(
                    generation = ticket.generation(),
                    "Trend pass superseded, stopping early"
                );
                return None;
            }

            let points = match self.resolve_word(word, window).await {
                Ok(points) => filter_points(&points, cutoff, &self.offset),
                Err(e) => {
                    tracing::warn!(word = %word, error = %e, "Failed to load trend data");
                    Vec::new()
                }
            };

            tracing::debug!(word = %word, points = points.len(), "Resolved trend series");
            resolved.push((word.clone(), points));
        }

        if !ticket.is_current() {
            return None;
        }

        Some(SeriesSet::new(resolved, window, now_ms))
    }
}
