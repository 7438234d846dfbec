//! Hot-Word Backend API
//!
//! Typed client for the backend's REST endpoints.
//!
//! # Endpoints
//!
//! - `GET /api/hot` - Latest hot list
//! - `GET /api/rising` - Fastest-rising words
//! - `GET /api/status` - Snapshot count and current settings
//! - `POST /api/refresh` - Trigger a scrape now
//! - `GET /api/trend/{word}?hours=N` - Fine-grained samples for a word
//! - `GET /api/history/{word}?days=N` - Coarse samples for a word
//! - `GET /api/settings` / `POST /api/settings` - Monitor settings
//! - `GET /api/snapshots?limit=N` - Snapshot history
//!
//! The dashboard talks to the backend only through the [`HotApi`] trait,
//! so aggregation and polling can run against any implementation.

pub mod client;
pub mod dto;
pub mod error;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{BackendClient, ClientConfig};
pub use dto::{HotList, StatusReport};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::types::{RisingItem, Settings, SnapshotSummary, TrendPoint};

/// Operations the dashboard needs from the backend
#[async_trait]
pub trait HotApi: Send + Sync {
    /// Latest hot list snapshot
    async fn hot_list(&self) -> ApiResult<HotList>;

    /// Rising words, optionally limited
    async fn rising(&self, limit: Option<u32>) -> ApiResult<Vec<RisingItem>>;

    /// Backend status, including its settings when available
    async fn status(&self) -> ApiResult<StatusReport>;

    /// Ask the backend to take a snapshot now
    async fn trigger_refresh(&self) -> ApiResult<()>;

    /// Fine-grained samples for a word over the last `hours`
    async fn trend(&self, word: &str, hours: u32) -> ApiResult<Vec<TrendPoint>>;

    /// Coarse samples for a word over the last `days`
    async fn history(&self, word: &str, days: u32) -> ApiResult<Vec<TrendPoint>>;

    /// Current settings
    async fn settings(&self) -> ApiResult<Settings>;

    /// Store new settings; returns what the backend stored, if it says
    async fn save_settings(&self, settings: &Settings) -> ApiResult<Option<Settings>>;

    /// Most recent snapshots
    async fn snapshots(&self, limit: u32) -> ApiResult<Vec<SnapshotSummary>>;
}
