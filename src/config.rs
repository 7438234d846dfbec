//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::{FixedOffset, Local, Offset};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ClientConfig;
use crate::dashboard::ControllerOptions;
use crate::trend::TimeWindow;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl BackendConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Dashboard behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Trend window selected at startup
    #[serde(default = "default_hours")]
    pub default_hours: u32,

    #[serde(default = "default_refresh_settle")]
    pub refresh_settle_ms: u64,

    #[serde(default = "default_notification_ttl")]
    pub notification_ttl_ms: u64,

    #[serde(default = "default_chart_output")]
    pub chart_output: String,

    /// Offset for timestamps without one; local offset when unset
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

fn default_hours() -> u32 {
    1
}

fn default_refresh_settle() -> u64 {
    1000
}

fn default_notification_ttl() -> u64 {
    3000
}

fn default_chart_output() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("hotboard").join("hotboard-chart.html").to_string_lossy().to_string())
        .unwrap_or_else(|| "./hotboard-chart.html".to_string())
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_hours: default_hours(),
            refresh_settle_ms: default_refresh_settle(),
            notification_ttl_ms: default_notification_ttl(),
            chart_output: default_chart_output(),
            utc_offset_minutes: None,
        }
    }
}

impl DashboardConfig {
    /// Display offset; out-of-range values fall back to the local offset
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes.saturating_mul(60)))
            .unwrap_or_else(|| Local::now().offset().fix())
    }

    /// Startup window; zero hours falls back to one
    pub fn window(&self) -> TimeWindow {
        TimeWindow::hours(self.default_hours).unwrap_or_default()
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            refresh_settle: Duration::from_millis(self.refresh_settle_ms),
            notification_ttl: Duration::from_millis(self.notification_ttl_ms),
            offset: self.offset(),
            initial_window: self.window(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// Nothing is logged here since logging is configured from the result;
    /// call [`DefaultLoad::log`] once a subscriber is installed.
    pub fn load_default() -> DefaultLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("hotboard").join("config.toml")),
            Some(PathBuf::from("./hotboard.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first of `paths` that exists and parses
    pub fn load_first(paths: &[PathBuf]) -> DefaultLoad {
        let mut skipped = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        return DefaultLoad {
                            config,
                            source: Some(path.clone()),
                            skipped,
                        }
                    }
                    Err(e) => skipped.push(e),
                }
            }
        }

        DefaultLoad {
            config: Self::from_env(),
            source: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("HOTBOARD_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Some(level) = lookup("HOTBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("HOTBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Outcome of searching the default config locations
#[derive(Debug)]
pub struct DefaultLoad {
    pub config: Config,
    /// File the config came from; `None` when defaults were used
    pub source: Option<PathBuf>,
    /// Files that exist but failed to load
    pub skipped: Vec<ConfigError>,
}

impl DefaultLoad {
    /// Report where the config came from
    pub fn log(&self) {
        for e in &self.skipped {
            tracing::warn!("Failed to load config: {}", e);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::debug!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Hotboard Configuration
#
# Environment variables override these settings:
# - HOTBOARD_BASE_URL
# - HOTBOARD_LOG_LEVEL
# - HOTBOARD_LOG_FORMAT

[backend]
# Hot-word monitor backend
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 10

[dashboard]
# Trend window selected at startup (hours)
default_hours = 1

# Wait after triggering a backend refresh before reloading (ms)
refresh_settle_ms = 1000

# How long notifications stay visible (ms)
notification_ttl_ms = 3000

# Where the trend chart page is written
# chart_output = "~/.local/share/hotboard/hotboard-chart.html"

# Offset (minutes east of UTC) for backend timestamps without one.
# Defaults to the local offset.
# utc_offset_minutes = 480

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.backend.request_timeout_secs, 10);
        assert_eq!(config.dashboard.default_hours, 1);
        assert_eq!(config.dashboard.refresh_settle_ms, 1000);
        assert_eq!(config.dashboard.notification_ttl_ms, 3000);
        assert!(config.dashboard.chart_output.ends_with("hotboard-chart.html"));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.dashboard.utc_offset_minutes, None);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hotboard.toml");
        std::fs::write(
            &path,
            r#"
[backend]
base_url = "http://monitor:8000"

[dashboard]
default_hours = 24
utc_offset_minutes = 480
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.backend.base_url, "http://monitor:8000");
        assert_eq!(config.backend.request_timeout_secs, 10);
        assert_eq!(config.dashboard.window().as_hours(), 24);
        assert_eq!(config.dashboard.offset().local_minus_utc(), 8 * 3600);

        let options = config.dashboard.controller_options();
        assert_eq!(options.refresh_settle, Duration::from_millis(1000));
        assert_eq!(options.initial_window.as_hours(), 24);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[backend\nbase_url = 1").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_first_skips_broken_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[dashboard\ndefault_hours = ").unwrap();
        std::fs::write(&good, "[dashboard]\ndefault_hours = 6\n").unwrap();

        let loaded = Config::load_first(&[missing, broken.clone(), good.clone()]);

        assert_eq!(loaded.source, Some(good));
        assert_eq!(loaded.config.dashboard.default_hours, 6);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(matches!(&loaded.skipped[0], ConfigError::Parse { path, .. } if *path == broken));
    }

    #[test]
    fn test_load_first_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let loaded = Config::load_first(&[dir.path().join("none.toml")]);

        assert_eq!(loaded.source, None);
        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.config.dashboard.default_hours, 1);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("HOTBOARD_BASE_URL", "http://other:5000"),
            ("HOTBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.base_url, "http://other:5000");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_zero_hours_falls_back() {
        let dashboard = DashboardConfig {
            default_hours: 0,
            ..Default::default()
        };
        assert_eq!(dashboard.window(), TimeWindow::default());
    }

    #[test]
    fn test_client_config() {
        let backend = BackendConfig {
            base_url: "http://x:1".to_string(),
            request_timeout_secs: 3,
        };
        let client = backend.client_config();
        assert_eq!(client.request_timeout_ms, 3000);
        assert_eq!(client.base_url, "http://x:1");
    }
}
