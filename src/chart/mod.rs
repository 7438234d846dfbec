//! Trend Chart
//!
//! Translates aggregated series into the charting library's configuration.
//!
//! - [`build_option`]: pure derivation of the option from a `SeriesSet`
//! - [`render`]: clear-then-set onto a [`ChartSurface`]
//! - [`HtmlChartSurface`]: standalone ECharts page on disk

mod adapter;
pub mod option;
mod surface;

pub use adapter::{build_option, render};
pub use option::ChartOption;
pub use surface::{chart_page, placeholder_page, ChartSurface, HtmlChartSurface};

use thiserror::Error;

/// Errors raised while applying a chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
