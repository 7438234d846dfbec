//! In-memory [`HotApi`] double for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ApiError, ApiResult, HotApi, HotList, StatusReport};
use crate::types::{HotWordItem, RisingItem, Settings, SnapshotSummary, TrendPoint};

type Hook = Box<dyn Fn(&str) + Send + Sync>;

/// Scriptable backend. `None` entries answer with `ApiError::Unavailable`.
pub struct FakeApi {
    hot: Mutex<Option<HotList>>,
    rising: Mutex<Option<Vec<RisingItem>>>,
    status: Mutex<Option<StatusReport>>,
    refresh_ok: Mutex<bool>,
    trend: Mutex<HashMap<String, Option<Vec<TrendPoint>>>>,
    history: Mutex<HashMap<String, Option<Vec<TrendPoint>>>>,
    save_ack: Mutex<Option<Option<Settings>>>,
    on_trend: Mutex<Option<Hook>>,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            hot: Mutex::new(Some(HotList::default())),
            rising: Mutex::new(Some(Vec::new())),
            status: Mutex::new(Some(StatusReport::default())),
            refresh_ok: Mutex::new(true),
            trend: Mutex::default(),
            history: Mutex::default(),
            save_ack: Mutex::new(Some(None)),
            on_trend: Mutex::default(),
            calls: Mutex::default(),
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hot(self, items: Vec<HotWordItem>) -> Self {
        let count = items.len() as u64;
        *self.hot.lock().unwrap() = Some(HotList {
            data: items,
            count: Some(count),
        });
        self
    }

    pub fn failing_hot(self) -> Self {
        *self.hot.lock().unwrap() = None;
        self
    }

    pub fn with_rising(self, items: Vec<RisingItem>) -> Self {
        *self.rising.lock().unwrap() = Some(items);
        self
    }

    pub fn failing_rising(self) -> Self {
        *self.rising.lock().unwrap() = None;
        self
    }

    pub fn with_status(self, status: StatusReport) -> Self {
        *self.status.lock().unwrap() = Some(status);
        self
    }

    pub fn failing_refresh(self) -> Self {
        *self.refresh_ok.lock().unwrap() = false;
        self
    }

    pub fn with_trend(self, word: &str, points: Vec<TrendPoint>) -> Self {
        self.trend
            .lock()
            .unwrap()
            .insert(word.to_string(), Some(points));
        self
    }

    pub fn failing_trend(self, word: &str) -> Self {
        self.trend.lock().unwrap().insert(word.to_string(), None);
        self
    }

    pub fn with_history(self, word: &str, points: Vec<TrendPoint>) -> Self {
        self.history
            .lock()
            .unwrap()
            .insert(word.to_string(), Some(points));
        self
    }

    pub fn failing_history(self, word: &str) -> Self {
        self.history.lock().unwrap().insert(word.to_string(), None);
        self
    }

    pub fn with_save_ack(self, stored: Option<Settings>) -> Self {
        *self.save_ack.lock().unwrap() = Some(stored);
        self
    }

    pub fn failing_save(self) -> Self {
        *self.save_ack.lock().unwrap() = None;
        self
    }

    /// Run `hook` with the word on every trend request
    pub fn on_trend(self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        *self.on_trend.lock().unwrap() = Some(Box::new(hook));
        self
    }

    /// Requests seen so far, e.g. `"trend:word:6"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn answer<T>(value: Option<T>) -> ApiResult<T> {
    value.ok_or(ApiError::Unavailable)
}

#[async_trait]
impl HotApi for FakeApi {
    async fn hot_list(&self) -> ApiResult<HotList> {
        self.record("hot".into());
        answer(self.hot.lock().unwrap().clone())
    }

    async fn rising(&self, _limit: Option<u32>) -> ApiResult<Vec<RisingItem>> {
        self.record("rising".into());
        answer(self.rising.lock().unwrap().clone())
    }

    async fn status(&self) -> ApiResult<StatusReport> {
        self.record("status".into());
        answer(self.status.lock().unwrap().clone())
    }

    async fn trigger_refresh(&self) -> ApiResult<()> {
        self.record("refresh".into());
        if *self.refresh_ok.lock().unwrap() {
            Ok(())
        } else {
            Err(ApiError::Unavailable)
        }
    }

    async fn trend(&self, word: &str, hours: u32) -> ApiResult<Vec<TrendPoint>> {
        self.record(format!("trend:{}:{}", word, hours));
        if let Some(hook) = self.on_trend.lock().unwrap().as_ref() {
            hook(word);
        }
        match self.trend.lock().unwrap().get(word) {
            Some(entry) => answer(entry.clone()),
            None => Ok(Vec::new()),
        }
    }

    async fn history(&self, word: &str, days: u32) -> ApiResult<Vec<TrendPoint>> {
        self.record(format!("history:{}:{}", word, days));
        match self.history.lock().unwrap().get(word) {
            Some(entry) => answer(entry.clone()),
            None => Ok(Vec::new()),
        }
    }

    async fn settings(&self) -> ApiResult<Settings> {
        self.record("settings".into());
        Ok(self
            .status
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|s| s.settings)
            .unwrap_or_default())
    }

    async fn save_settings(&self, settings: &Settings) -> ApiResult<Option<Settings>> {
        self.record(format!(
            "save_settings:{}:{}:{}",
            settings.scrape_interval_minutes,
            settings.auto_refresh_seconds,
            settings.max_history_days
        ));
        answer(self.save_ack.lock().unwrap().clone())
    }

    async fn snapshots(&self, limit: u32) -> ApiResult<Vec<SnapshotSummary>> {
        self.record(format!("snapshots:{}", limit));
        Ok(Vec::new())
    }
}
