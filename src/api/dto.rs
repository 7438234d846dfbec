//! Data Transfer Objects
//!
//! Response bodies of the hot-word backend. Every endpoint wraps its
//! payload in a `{ "success": bool, "error"?: string, ... }` envelope.

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use crate::types::{HotWordItem, RisingItem, Settings, SnapshotSummary, TrendPoint};

/// Common response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning `success: false` into an error
    pub fn into_result(self) -> ApiResult<T> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(ApiError::Backend(
                self.error
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ))
        }
    }
}

// ============================================
// Payloads
// ============================================

/// GET /api/hot
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HotList {
    #[serde(default)]
    pub data: Vec<HotWordItem>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl HotList {
    /// Item count as reported by the backend, or the list length
    pub fn count(&self) -> u64 {
        self.count.unwrap_or(self.data.len() as u64)
    }
}

/// GET /api/rising
#[derive(Debug, Default, Deserialize)]
pub struct RisingList {
    #[serde(default)]
    pub data: Vec<RisingItem>,
}

/// GET /api/status
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatusReport {
    #[serde(default)]
    pub total_snapshots: u64,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// GET /api/trend/{word}
#[derive(Debug, Default, Deserialize)]
pub struct TrendBody {
    #[serde(default)]
    pub trend: Vec<TrendPoint>,
}

/// GET /api/history/{word}
#[derive(Debug, Default, Deserialize)]
pub struct HistoryBody {
    #[serde(default)]
    pub history: Vec<TrendPoint>,
}

/// GET /api/settings and the POST /api/settings acknowledgement
#[derive(Debug, Default, Deserialize)]
pub struct SettingsBody {
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub message: Option<String>,
}

/// GET /api/snapshots
#[derive(Debug, Default, Deserialize)]
pub struct SnapshotList {
    #[serde(default)]
    pub data: Vec<SnapshotSummary>,
}

/// POST /api/refresh
#[derive(Debug, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}
