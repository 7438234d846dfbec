//! # Hotboard
//!
//! Terminal dashboard for a hot-word ranking monitor. Polls the monitor's
//! REST backend, shows the ranked and rising lists, and compares the trends
//! of up to five words on a shared time axis.
//!
//! ## Features
//!
//! - **Hot board**: ranked list, new entries and rising words
//! - **Comparison workspace**: up to five words, one chart series each
//! - **Trend fallback**: fine-grained trend data, coarse history when missing
//! - **Polling**: periodic refresh whose period follows the server settings
//!
//! ## Modules
//!
//! - [`api`]: Typed client for the backend REST API
//! - [`workspace`]: Ordered comparison set
//! - [`trend`]: Per-word fetch, window filter and merge
//! - [`chart`]: ECharts option derivation and chart surfaces
//! - [`board`]: Hot-list partitioning and item interactions
//! - [`dashboard`]: Polling controller and session state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Offset;
//! use hotboard::api::{BackendClient, ClientConfig};
//! use hotboard::trend::{GenerationCounter, TimeWindow, TrendAggregator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(BackendClient::new(ClientConfig::default())?);
//!     let aggregator = TrendAggregator::new(client, chrono::Utc.fix());
//!
//!     let words = vec!["rust".to_string()];
//!     let ticket = GenerationCounter::new().next();
//!     let now = chrono::Utc::now().timestamp_millis();
//!
//!     if let Some(set) = aggregator.aggregate(&words, TimeWindow::hours(6)?, now, &ticket).await {
//!         let option = hotboard::chart::build_option(&set);
//!         println!("{}", option.to_json()?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod board;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod notify;
pub mod trend;
pub mod types;
pub mod view;
pub mod workspace;

// Re-export top-level types for convenience
pub use types::{
    HotWordItem, RankChange, RisingItem, Settings, SettingsError, SnapshotSummary, TrendPoint,
};

pub use api::{ApiError, ApiResult, BackendClient, ClientConfig, HotApi};

pub use workspace::{Workspace, WorkspaceError, MAX_WORKSPACE_WORDS};

pub use trend::{SeriesSet, TimeWindow, TrendAggregator};

pub use chart::{ChartError, ChartOption, ChartSurface, HtmlChartSurface};

pub use board::{HotBoard, ItemInteraction};

pub use dashboard::{ControllerOptions, DashboardController};

pub use view::{DashboardView, TerminalView};

pub use notify::{Notification, Severity};

pub use config::{Config, ConfigError, DefaultLoad, LoggingConfig};
