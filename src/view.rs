//! Dashboard View
//!
//! The thin layer the controller draws through. [`TerminalView`] prints to a
//! writer (stdout in the binary) and forwards chart calls to an
//! [`HtmlChartSurface`].

use std::io::Write;

use crate::board::{HotBoard, RisingEntry};
use crate::chart::{ChartError, ChartOption, ChartSurface, HtmlChartSurface};
use crate::notify::{Notification, Toasts};
use crate::types::Settings;

/// Numbers shown in the status bar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub total_snapshots: u64,
    /// Items in the latest hot list
    pub count: u64,
    /// Wall clock of the last successful hot-list load
    pub last_updated: Option<String>,
}

/// Everything the controller can show
pub trait DashboardView: ChartSurface {
    fn render_hot_board(&mut self, board: &HotBoard);

    fn render_rising(&mut self, entries: &[RisingEntry]);

    /// Workspace tags, in order, each removable
    fn render_tags(&mut self, words: &[String]);

    /// Show or hide the empty-chart drop target
    fn set_placeholder_visible(&mut self, visible: bool);

    fn render_status(&mut self, status: &StatusLine);

    fn render_settings(&mut self, settings: &Settings);

    fn notify(&mut self, notification: Notification);
}

// ============================================
// Text rendering
// ============================================

/// Ranked and new-entry lists as printable lines
pub fn hot_board_lines(board: &HotBoard) -> Vec<String> {
    let mut lines = Vec::new();

    if board.is_empty() {
        lines.push("No data".to_string());
        return lines;
    }

    lines.push(format!("{:<5} {:<30} {:>10}", "Rank", "Word", "Hot"));
    lines.push("-".repeat(47));
    for entry in &board.ranked {
        lines.push(format!(
            "{:<5} {:<30} {:>10}{}",
            entry.rank,
            entry.word,
            entry.hot_label,
            if entry.elevated { "  HOT" } else { "" }
        ));
    }

    if board.shows_new_entries() {
        lines.push(String::new());
        lines.push(format!("New entries ({})", board.new_entries.len()));
        for entry in &board.new_entries {
            lines.push(format!(
                "  {}{}",
                entry.word,
                if entry.elevated { "  HOT" } else { "" }
            ));
        }
    }

    lines
}

/// Rising list as printable lines
pub fn rising_lines(entries: &[RisingEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No rising words".to_string()];
    }
    entries
        .iter()
        .map(|e| format!("{} {:<30} {}", e.icon, e.word, e.label))
        .collect()
}

/// Settings as a single line
pub fn settings_line(settings: &Settings) -> String {
    format!(
        "Scrape every {} min, refresh every {} s, keep {} days",
        settings.scrape_interval_minutes, settings.auto_refresh_seconds, settings.max_history_days
    )
}

// ============================================
// Terminal view
// ============================================

/// Prints the dashboard to `out` and writes the chart page to disk
pub struct TerminalView<W: Write> {
    out: W,
    chart: HtmlChartSurface,
    toasts: Toasts,
    placeholder_visible: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, chart: HtmlChartSurface) -> Self {
        Self {
            out,
            chart,
            toasts: Toasts::new(),
            placeholder_visible: true,
        }
    }

    pub fn chart(&self) -> &HtmlChartSurface {
        &self.chart
    }

    pub fn placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    /// Reprint notifications that have not yet expired
    pub fn render_toasts(&mut self) {
        self.toasts.prune();
        let lines: Vec<String> = self.toasts.visible().map(|n| n.to_string()).collect();
        self.emit(&lines);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, lines: &[String]) {
        for line in lines {
            if let Err(e) = writeln!(self.out, "{}", line) {
                tracing::warn!(error = %e, "Failed to write dashboard output");
                return;
            }
        }
        let _ = self.out.flush();
    }
}

impl<W: Write> ChartSurface for TerminalView<W> {
    fn clear(&mut self) -> Result<(), ChartError> {
        self.chart.clear()
    }

    fn set_option(&mut self, option: &ChartOption) -> Result<(), ChartError> {
        self.chart.set_option(option)?;
        let line = format!(
            "Chart: {} series -> {}",
            option.series.len(),
            self.chart.path().display()
        );
        self.emit(&[line]);
        Ok(())
    }
}

impl<W: Write> DashboardView for TerminalView<W> {
    fn render_hot_board(&mut self, board: &HotBoard) {
        let mut lines = vec![String::new(), "== Hot list ==".to_string()];
        lines.extend(hot_board_lines(board));
        self.emit(&lines);
    }

    fn render_rising(&mut self, entries: &[RisingEntry]) {
        let mut lines = vec![String::new(), "== Rising ==".to_string()];
        lines.extend(rising_lines(entries));
        self.emit(&lines);
    }

    fn render_tags(&mut self, words: &[String]) {
        let line = if words.is_empty() {
            "Workspace: (empty)".to_string()
        } else {
            let tags: Vec<String> = words.iter().map(|w| format!("[{} x]", w)).collect();
            format!("Workspace: {}", tags.join(" "))
        };
        self.emit(&[line]);
    }

    fn set_placeholder_visible(&mut self, visible: bool) {
        if visible && !self.placeholder_visible {
            self.emit(&["Add words to the workspace to compare their trends".to_string()]);
        }
        self.placeholder_visible = visible;
    }

    fn render_status(&mut self, status: &StatusLine) {
        let line = format!(
            "Snapshots: {} | Items: {} | Updated: {}",
            status.total_snapshots,
            status.count,
            status.last_updated.as_deref().unwrap_or("-")
        );
        self.emit(&[line]);
    }

    fn render_settings(&mut self, settings: &Settings) {
        self.emit(&[settings_line(settings)]);
    }

    fn notify(&mut self, notification: Notification) {
        self.emit(&[notification.to_string()]);
        self.toasts.push(notification);
    }
}
