//! Chart Adapter
//!
//! Derives the full chart configuration from a [`SeriesSet`]. Label
//! granularity comes from the span of the data actually returned, not from
//! the requested window.

use super::option::*;
use super::{ChartError, ChartSurface};
use crate::format::LabelGranularity;
use crate::trend::SeriesSet;

const MUTED: &str = "#71717a";
const BORDER: &str = "#3f3f46";

/// Build the chart option for `set`
pub fn build_option(set: &SeriesSet) -> ChartOption {
    let range = set.merged_range();
    let granularity = LabelGranularity::for_span_ms(range.1 - range.0);

    let series = set
        .series
        .iter()
        .map(|s| LineSeries {
            name: s.word.clone(),
            kind: "line",
            data: s.points.clone(),
            smooth: true,
            symbol: "circle",
            symbol_size: 6,
            line_style: LineStyle {
                color: None,
                width: Some(3),
                shadow_blur: Some(10),
                shadow_color: Some(s.color),
            },
            item_style: ItemStyle { color: s.color },
            connect_nulls: true,
        })
        .collect();

    ChartOption {
        background_color: "transparent",
        grid: Grid {
            top: 30,
            right: 20,
            bottom: 60,
            left: 10,
            contain_label: true,
        },
        tooltip: Tooltip {
            trigger: "axis",
            background_color: "rgba(24, 24, 27, 0.9)",
            border_color: BORDER,
            text_style: TextStyle { color: "#fafafa" },
        },
        legend: Legend {
            data: set.words().map(str::to_string).collect(),
            text_style: TextStyle { color: "#a1a1aa" },
            icon: "circle",
            top: 0,
        },
        x_axis: Axis {
            kind: "time",
            axis_line: Some(AxisLine {
                line_style: LineStyle::color(BORDER),
            }),
            axis_label: AxisLabel {
                color: MUTED,
                font_size: Some(10),
                formatter: Some(granularity.echarts_template()),
            },
            axis_tick: Some(Toggle { show: false }),
            split_line: SplitLine {
                show: false,
                line_style: None,
            },
        },
        y_axis: Axis {
            kind: "value",
            axis_line: None,
            axis_label: AxisLabel {
                color: MUTED,
                font_size: None,
                formatter: None,
            },
            axis_tick: None,
            split_line: SplitLine {
                show: true,
                line_style: Some(LineStyle::color("#27272a")),
            },
        },
        series,
        data_zoom: vec![DataZoom::inside(), DataZoom::slider(granularity)],
        granularity,
        range,
    }
}

/// Fully reconfigure `surface` from `set`: clear, then apply.
///
/// Rendering the same set twice yields the same configuration.
pub fn render(surface: &mut dyn ChartSurface, set: &SeriesSet) -> Result<ChartOption, ChartError> {
    let option = build_option(set);
    surface.clear()?;
    surface.set_option(&option)?;
    tracing::debug!(
        series = option.series.len(),
        granularity = ?option.granularity,
        "Chart rendered"
    );
    Ok(option)
}
