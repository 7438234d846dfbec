//! Chart Option Model
//!
//! Serializable subset of the ECharts option schema used by the trend chart.
//! Field names serialize in the camelCase the charting library expects.

use serde::Serialize;

use crate::format::LabelGranularity;
use crate::trend::SeriesPoint;

/// Full chart configuration handed to a [`super::ChartSurface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOption {
    pub background_color: &'static str,
    pub grid: Grid,
    pub tooltip: Tooltip,
    pub legend: Legend,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<LineSeries>,
    pub data_zoom: Vec<DataZoom>,

    /// Granularity the labels were derived with
    #[serde(skip)]
    pub granularity: LabelGranularity,
    /// Merged `[min, max]` time range the option was derived from
    #[serde(skip)]
    pub range: (i64, i64),
}

impl ChartOption {
    /// Serialize to the JSON document the charting library consumes
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
    pub contain_label: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub trigger: &'static str,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub text_style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub data: Vec<String>,
    pub text_style: TextStyle,
    pub icon: &'static str,
    pub top: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toggle {
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<&'static str>,
}

impl LineStyle {
    pub fn color(color: &'static str) -> Self {
        Self {
            color: Some(color),
            width: None,
            shadow_blur: None,
            shadow_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLine {
    pub line_style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabel {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Label template; time axes use `{M}/{d} {H}:{mm}` style placeholders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_line: Option<AxisLine>,
    pub axis_label: AxisLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_tick: Option<Toggle>,
    pub split_line: SplitLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLine {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStyle {
    pub color: &'static str,
}

/// One word's line on the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[timestamp_ms, hot_value]` pairs; a missing value serializes as `null`
    pub data: Vec<SeriesPoint>,
    pub smooth: bool,
    pub symbol: &'static str,
    pub symbol_size: u32,
    pub line_style: LineStyle,
    pub item_style: ItemStyle,
    /// Bridge missing samples instead of breaking the line
    pub connect_nulls: bool,
}

/// Zoom/pan control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoom {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub start: u32,
    pub end: u32,
    pub zoom_lock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_on_mouse_move: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_on_mouse_wheel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brush_select: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_formatter: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filler_color: Option<&'static str>,
}

impl DataZoom {
    /// Wheel/drag panning inside the plot area
    pub fn inside() -> Self {
        Self {
            kind: "inside",
            start: 0,
            end: 100,
            zoom_lock: true,
            show: None,
            move_on_mouse_move: Some(true),
            move_on_mouse_wheel: Some(true),
            height: None,
            bottom: None,
            brush_select: None,
            label_formatter: None,
            filler_color: None,
        }
    }

    /// Range slider under the plot, labelled with `granularity`
    pub fn slider(granularity: LabelGranularity) -> Self {
        Self {
            kind: "slider",
            start: 0,
            end: 100,
            zoom_lock: true,
            show: Some(true),
            move_on_mouse_move: None,
            move_on_mouse_wheel: None,
            height: Some(20),
            bottom: Some(10),
            brush_select: Some(false),
            label_formatter: Some(granularity.echarts_template()),
            filler_color: Some("rgba(99, 102, 241, 0.3)"),
        }
    }
}
