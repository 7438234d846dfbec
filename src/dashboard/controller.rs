//! Dashboard Controller
//!
//! Owns the session and drives every fetch and render: the periodic and
//! manual full refresh, settings, workspace edits and trend passes.

use chrono::{FixedOffset, Offset, Utc};
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::session::SessionState;
use super::timer::RefreshTimer;
use crate::api::{ApiResult, HotApi, HotList, StatusReport};
use crate::board::{partition, rising_entries, ItemInteraction, WorkspaceCommand};
use crate::chart::render;
use crate::format::format_clock;
use crate::notify::{Notification, Severity};
use crate::trend::{GenerationCounter, PassTicket, SeriesSet, TimeWindow, TrendAggregator};
use crate::types::{RisingItem, Settings};
use crate::view::DashboardView;
use crate::workspace::Removal;

/// Controller tuning
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Pause between triggering a backend refresh and reloading
    pub refresh_settle: Duration,
    /// How long notifications stay visible
    pub notification_ttl: Duration,
    /// Offset for offset-less timestamps and displayed clock times
    pub offset: FixedOffset,
    /// Window selected at startup
    pub initial_window: TimeWindow,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            refresh_settle: Duration::from_millis(1000),
            notification_ttl: crate::notify::DEFAULT_TTL,
            offset: Utc.fix(),
            initial_window: TimeWindow::default(),
        }
    }
}

/// Result of a trend pass run outside the controller
#[derive(Debug)]
pub struct TrendOutcome {
    pub generation: u64,
    /// `None` when the pass was superseded before finishing
    pub series: Option<SeriesSet>,
}

/// A trend pass ready to run
pub struct TrendPass {
    aggregator: TrendAggregator,
    words: Vec<String>,
    window: TimeWindow,
    now_ms: i64,
    ticket: PassTicket,
}

impl TrendPass {
    pub fn generation(&self) -> u64 {
        self.ticket.generation()
    }

    pub async fn run(self) -> TrendOutcome {
        let series = self
            .aggregator
            .aggregate(&self.words, self.window, self.now_ms, &self.ticket)
            .await;
        TrendOutcome {
            generation: self.ticket.generation(),
            series,
        }
    }
}

enum Loaded {
    Hot(ApiResult<HotList>),
    Rising(ApiResult<Vec<RisingItem>>),
    Status(ApiResult<StatusReport>),
}

pub struct DashboardController<V: DashboardView> {
    api: Arc<dyn HotApi>,
    aggregator: TrendAggregator,
    view: V,
    session: SessionState,
    generations: GenerationCounter,
    timer: RefreshTimer,
    options: ControllerOptions,
    /// When set, trend passes run as spawned tasks reporting here
    trend_tx: Option<mpsc::UnboundedSender<TrendOutcome>>,
}

impl<V: DashboardView> DashboardController<V> {
    pub fn new(api: Arc<dyn HotApi>, view: V, options: ControllerOptions) -> Self {
        let session = SessionState::new(options.initial_window);
        let timer = RefreshTimer::new(session.settings.refresh_period());
        Self {
            aggregator: TrendAggregator::new(Arc::clone(&api), options.offset),
            api,
            view,
            session,
            generations: GenerationCounter::new(),
            timer,
            options,
            trend_tx: None,
        }
    }

    /// Builder method: run trend passes in the background.
    ///
    /// Outcomes must be fed back through [`Self::finish_trend_pass`].
    pub fn spawn_trend_passes(mut self, tx: mpsc::UnboundedSender<TrendOutcome>) -> Self {
        self.trend_tx = Some(tx);
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn timer(&self) -> &RefreshTimer {
        &self.timer
    }

    /// Wait for the next periodic refresh
    pub async fn next_tick(&mut self) {
        self.timer.tick().await;
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.view
            .notify(Notification::new(severity, message).ttl(self.options.notification_ttl));
    }

    // ============================================
    // Full refresh
    // ============================================

    /// Fetch hot list, rising list and status concurrently.
    ///
    /// Each result is rendered as soon as it arrives; one failing does not
    /// affect the others.
    pub async fn load_all(&mut self) {
        let api = Arc::clone(&self.api);
        let mut pending: FuturesUnordered<BoxFuture<'_, Loaded>> = FuturesUnordered::new();
        pending.push(api.hot_list().map(Loaded::Hot).boxed());
        pending.push(api.rising(None).map(Loaded::Rising).boxed());
        pending.push(api.status().map(Loaded::Status).boxed());

        while let Some(loaded) = pending.next().await {
            match loaded {
                Loaded::Hot(result) => self.apply_hot_list(result),
                Loaded::Rising(result) => self.apply_rising(result),
                Loaded::Status(result) => self.apply_status(result),
            }
        }
    }

    fn apply_hot_list(&mut self, result: ApiResult<HotList>) {
        match result {
            Ok(list) => {
                tracing::debug!(items = list.data.len(), "Hot list loaded");
                self.view.render_hot_board(&partition(&list.data));
                self.session.status.count = list.count();
                self.session.status.last_updated = Some(format_clock(
                    Utc::now().timestamp_millis(),
                    &self.options.offset,
                ));
                self.view.render_status(&self.session.status);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load hot list");
                self.notify(Severity::Error, "Failed to load hot list");
            }
        }
    }

    fn apply_rising(&mut self, result: ApiResult<Vec<RisingItem>>) {
        match result {
            Ok(items) => self.view.render_rising(&rising_entries(&items)),
            Err(e) => tracing::warn!(error = %e, "Failed to load rising list"),
        }
    }

    fn apply_status(&mut self, result: ApiResult<StatusReport>) {
        match result {
            Ok(report) => {
                self.session.status.total_snapshots = report.total_snapshots;
                self.view.render_status(&self.session.status);
                if let Some(settings) = report.settings {
                    self.apply_settings(settings);
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load status"),
        }
    }

    /// Trigger a backend scrape, wait for it to settle, then reload
    pub async fn manual_refresh(&mut self) {
        if let Err(e) = self.api.trigger_refresh().await {
            tracing::warn!(error = %e, "Manual refresh failed");
            self.notify(Severity::Error, "Refresh failed");
            return;
        }

        tokio::time::sleep(self.options.refresh_settle).await;
        self.load_all().await;
        self.notify(Severity::Success, "Data updated");
    }

    // ============================================
    // Settings
    // ============================================

    /// Post new settings and apply them locally once acknowledged
    pub async fn save_settings(&mut self, settings: Settings) {
        let submitted = settings.clamped();
        match self.api.save_settings(&submitted).await {
            Ok(stored) => {
                tracing::info!(
                    auto_refresh_seconds = submitted.auto_refresh_seconds,
                    "Settings saved"
                );
                self.notify(Severity::Success, "Settings saved");
                self.apply_settings(stored.unwrap_or(submitted));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save settings");
                self.notify(Severity::Error, "Save failed");
            }
        }
    }

    /// Mirror `settings` locally and re-arm the refresh timer if its period
    /// changed
    pub fn apply_settings(&mut self, settings: Settings) {
        let settings = settings.normalized();
        self.session.settings = settings;
        self.view.render_settings(&settings);

        let period = settings.refresh_period();
        if period != self.timer.period() {
            self.timer.rearm(period);
        }
    }

    // ============================================
    // Workspace
    // ============================================

    pub async fn add_word(&mut self, word: &str) {
        let added = match self.session.workspace.add(word) {
            Ok(added) => added.to_string(),
            Err(e) => {
                self.notify(Severity::Warning, e.to_string());
                return;
            }
        };

        tracing::debug!(word = %added, "Word added to workspace");
        self.workspace_changed().await;
    }

    pub async fn remove_word(&mut self, word: &str) {
        match self.session.workspace.remove(word) {
            Removal::Absent => {}
            Removal::Removed => self.workspace_changed().await,
            Removal::Emptied => self.workspace_emptied(),
        }
    }

    /// Replace the workspace with just `word`
    pub async fn quick_preview(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.session.workspace.quick_preview(word);
        self.notify(Severity::Info, format!("Viewing: {}", word));
        self.workspace_changed().await;
    }

    /// Remove every word
    pub fn clear(&mut self) {
        if self.session.workspace.is_empty() {
            return;
        }
        self.session.workspace.clear();
        self.workspace_emptied();
    }

    /// Route an item interaction to its workspace command
    pub async fn handle_interaction(&mut self, interaction: ItemInteraction) {
        match interaction.command() {
            Some(WorkspaceCommand::Add(word)) => self.add_word(&word).await,
            Some(WorkspaceCommand::QuickPreview(word)) => self.quick_preview(&word).await,
            None => {}
        }
    }

    async fn workspace_changed(&mut self) {
        self.view.render_tags(self.session.workspace.words());
        self.view.set_placeholder_visible(false);
        self.refresh_trend().await;
    }

    fn workspace_emptied(&mut self) {
        self.generations.invalidate();
        self.view.render_tags(&[]);
        if let Err(e) = self.view.clear() {
            tracing::warn!(error = %e, "Failed to clear chart");
        }
        self.view.set_placeholder_visible(true);
    }

    // ============================================
    // Trend
    // ============================================

    /// Select the trend window; redraws if anything is being compared
    pub async fn select_window(&mut self, window: TimeWindow) {
        self.session.window = window;
        if !self.session.workspace.is_empty() {
            self.refresh_trend().await;
        }
    }

    /// Start a pass for the current workspace, superseding any pass in flight
    pub fn begin_trend_pass(&mut self) -> Option<TrendPass> {
        if self.session.workspace.is_empty() {
            self.generations.invalidate();
            return None;
        }

        self.notify(Severity::System, "Loading trend data...");
        Some(TrendPass {
            aggregator: self.aggregator.clone(),
            words: self.session.workspace.words().to_vec(),
            window: self.session.window,
            now_ms: Utc::now().timestamp_millis(),
            ticket: self.generations.next(),
        })
    }

    /// Render a finished pass unless a newer one has started since
    pub fn finish_trend_pass(&mut self, outcome: TrendOutcome) {
        let Some(series) = outcome.series else {
            return;
        };
        if !self.generations.is_current(outcome.generation) {
            tracing::debug!(generation = outcome.generation, "Dropping stale trend result");
            return;
        }

        match render(&mut self.view, &series) {
            Ok(_) => self.view.set_placeholder_visible(false),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to render chart");
                self.notify(Severity::Error, "Failed to render chart");
            }
        }
    }

    /// Recompute the trend chart for the current workspace
    pub async fn refresh_trend(&mut self) {
        let Some(pass) = self.begin_trend_pass() else {
            return;
        };
        tracing::debug!(
            generation = pass.generation(),
            words = self.session.workspace.len(),
            window = %self.session.window,
            "Starting trend pass"
        );

        if let Some(tx) = self.trend_tx.clone() {
            tokio::spawn(async move {
                let _ = tx.send(pass.run().await);
            });
        } else {
            let outcome = pass.run().await;
            self.finish_trend_pass(outcome);
        }
    }
}
