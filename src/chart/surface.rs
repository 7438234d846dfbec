//! Chart Surfaces
//!
//! A surface is wherever the chart library actually draws. The adapter only
//! ever clears it or hands it a complete option.

use std::path::{Path, PathBuf};

use super::option::ChartOption;
use super::ChartError;
use crate::format::escape_html;

/// Rendering target for chart options
pub trait ChartSurface {
    /// Drop every series and setting currently shown
    fn clear(&mut self) -> Result<(), ChartError>;

    /// Apply a complete configuration
    fn set_option(&mut self, option: &ChartOption) -> Result<(), ChartError>;
}

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// Writes the chart as a standalone HTML page driven by ECharts.
///
/// `clear` rewrites the page with the drop-target placeholder.
#[derive(Debug, Clone)]
pub struct HtmlChartSurface {
    path: PathBuf,
    title: String,
}

impl HtmlChartSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            title: "Hot word trends".to_string(),
        }
    }

    /// Builder method: set the page title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, body: &str) -> Result<(), ChartError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}

impl ChartSurface for HtmlChartSurface {
    fn clear(&mut self) -> Result<(), ChartError> {
        self.write(&placeholder_page(&self.title))
    }

    fn set_option(&mut self, option: &ChartOption) -> Result<(), ChartError> {
        let json = option.to_json()?;
        self.write(&chart_page(&self.title, &json))?;
        tracing::info!(path = %self.path.display(), "Chart written");
        Ok(())
    }
}

/// Page shown while the workspace is empty
pub fn placeholder_page(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{title}</title></head>
<body style="background:#09090b;color:#71717a;font-family:sans-serif">
<div class="drop-placeholder" style="display:flex;align-items:center;justify-content:center;height:90vh">
Add words to the workspace to compare their trends
</div>
</body></html>
"#,
        title = escape_html(title)
    )
}

/// Axis, slider and tooltip formatters installed on the option before drawing.
///
/// Series names come from the backend and are escaped before they reach the
/// tooltip markup. Samples without a value show as `-`.
const FORMATTERS_JS: &str = r##"const escapeHtml = s => String(s).replace(/[&<>"']/g, c => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' })[c]);
const compact = v => v == null ? '-' : v >= 1e6 ? (v / 1e6).toFixed(0) + 'M' : v >= 1e3 ? (v / 1e3).toFixed(0) + 'k' : String(v);
const fmt = (t, tpl) => echarts.time.format(t, tpl, false);
const tpl = option.xAxis.axisLabel.formatter;
option.yAxis.axisLabel.formatter = compact;
option.dataZoom.forEach(z => { if (z.labelFormatter) { const t = z.labelFormatter; z.labelFormatter = v => fmt(v, t); } });
option.tooltip.formatter = params => {
  if (!params || params.length === 0) return '';
  let html = `<div style="font-weight:bold;margin-bottom:8px">${fmt(params[0].value[0], tpl)}</div>`;
  params.forEach(p => {
    html += `<div style="display:flex;justify-content:space-between;gap:20px"><span>${p.marker} ${escapeHtml(p.seriesName)}</span><span style="font-weight:bold">${compact(p.value[1])}</span></div>`;
  });
  return html;
};"##;

/// Page that renders `option_json` with ECharts
pub fn chart_page(title: &str, option_json: &str) -> String {
    // Keep the JSON from terminating the script element early
    let embedded = option_json.replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{title}</title>
<script src="{cdn}"></script></head>
<body style="background:#09090b;margin:0">
<div id="mainChart" style="width:100vw;height:100vh"></div>
<script>
const option = {embedded};
{formatters}
const chart = echarts.init(document.getElementById('mainChart'));
chart.clear();
chart.setOption(option);
window.addEventListener('resize', () => chart.resize());
</script>
</body></html>
"#,
        title = escape_html(title),
        cdn = ECHARTS_CDN,
        embedded = embedded,
        formatters = FORMATTERS_JS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_option;
    use crate::trend::{SeriesSet, TimeWindow};
    use tempfile::tempdir;

    #[test]
    fn test_set_option_writes_page() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("charts").join("trend.html");
        let mut surface = HtmlChartSurface::new(&path);

        let set = SeriesSet::new(
            vec![(
                "</script>".to_string(),
                vec![(1_700_000_000_000, Some(3.0)), (1_700_000_600_000, None)],
            )],
            TimeWindow::default(),
            1_700_000_000_000,
        );
        surface.set_option(&build_option(&set)).unwrap();

        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains("echarts.init"));
        assert!(page.contains("\"connectNulls\":true"));
        assert!(!page.contains("\"</script>\""));
        assert!(page.contains("<\\/script>"));
        assert!(page.contains("[1700000600000,null]"));
    }

    #[test]
    fn test_chart_page_escapes_tooltip_series_names() {
        let page = chart_page("t", "{}");

        assert!(page.contains("const escapeHtml = s =>"));
        assert!(page.contains("${escapeHtml(p.seriesName)}"));
        assert!(!page.contains("${p.seriesName}"));
        assert!(page.contains("option.tooltip.formatter"));
        assert!(page.contains("option.yAxis.axisLabel.formatter = compact"));
        // Installed after the option is defined and before the chart draws
        let option_at = page.find("const option = {}").unwrap();
        let tooltip_at = page.find("option.tooltip.formatter").unwrap();
        let draw_at = page.find("chart.setOption(option)").unwrap();
        assert!(option_at < tooltip_at && tooltip_at < draw_at);
    }

    #[test]
    fn test_clear_writes_placeholder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trend.html");
        let mut surface = HtmlChartSurface::new(&path).title("A & B");

        surface.clear().unwrap();

        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains("drop-placeholder"));
        assert!(page.contains("A &amp; B"));
        assert!(!page.contains("echarts.init"));
    }
}
