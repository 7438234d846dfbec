//! Backend REST Client
//!
//! HTTP client for the hot-word backend's REST API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{
    Acknowledgement, Envelope, HistoryBody, HotList, RisingList, SettingsBody, SnapshotList,
    StatusReport, TrendBody,
};
use super::error::{ApiError, ApiResult};
use super::HotApi;
use crate::types::{RisingItem, Settings, SnapshotSummary, TrendPoint};

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// reqwest-backed implementation of [`HotApi`]
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::Invalid(format!(
                "base URL must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL for a per-word endpoint, with the word percent-encoded
    fn word_url(&self, endpoint: &str, word: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url,
            endpoint,
            urlencoding::encode(word)
        )
    }

    /// Send a request and decode the enveloped payload
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();

        if status.is_success() {
            let envelope: Envelope<T> = response.json().await.map_err(ApiError::Request)?;
            return envelope.into_result();
        }

        let text = response.text().await.unwrap_or_default();
        // Failing routes still answer with an envelope carrying the reason
        let message = serde_json::from_str::<Envelope<Acknowledgement>>(&text)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or(text);

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl HotApi for BackendClient {
    async fn hot_list(&self) -> ApiResult<HotList> {
        self.fetch(self.client.get(self.url("/api/hot"))).await
    }

    async fn rising(&self, limit: Option<u32>) -> ApiResult<Vec<RisingItem>> {
        let mut request = self.client.get(self.url("/api/rising"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let list: RisingList = self.fetch(request).await?;
        Ok(list.data)
    }

    async fn status(&self) -> ApiResult<StatusReport> {
        self.fetch(self.client.get(self.url("/api/status"))).await
    }

    async fn trigger_refresh(&self) -> ApiResult<()> {
        let ack: Acknowledgement = self
            .fetch(self.client.post(self.url("/api/refresh")))
            .await?;
        if let Some(message) = ack.message {
            tracing::debug!(%message, "Refresh acknowledged");
        }
        Ok(())
    }

    async fn trend(&self, word: &str, hours: u32) -> ApiResult<Vec<TrendPoint>> {
        let request = self
            .client
            .get(self.word_url("trend", word))
            .query(&[("hours", hours)]);
        let body: TrendBody = self.fetch(request).await?;
        Ok(body.trend)
    }

    async fn history(&self, word: &str, days: u32) -> ApiResult<Vec<TrendPoint>> {
        let request = self
            .client
            .get(self.word_url("history", word))
            .query(&[("days", days)]);
        let body: HistoryBody = self.fetch(request).await?;
        Ok(body.history)
    }

    async fn settings(&self) -> ApiResult<Settings> {
        let body: SettingsBody = self.fetch(self.client.get(self.url("/api/settings"))).await?;
        Ok(body.settings.unwrap_or_default().normalized())
    }

    async fn save_settings(&self, settings: &Settings) -> ApiResult<Option<Settings>> {
        let request = self.client.post(self.url("/api/settings")).json(settings);
        let body: SettingsBody = self.fetch(request).await?;
        Ok(body.settings.map(Settings::normalized))
    }

    async fn snapshots(&self, limit: u32) -> ApiResult<Vec<SnapshotSummary>> {
        let request = self
            .client
            .get(self.url("/api/snapshots"))
            .query(&[("limit", limit)]);
        let list: SnapshotList = self.fetch(request).await?;
        Ok(list.data)
    }
}
