//! Notifications
//!
//! Transient messages shown to the user. Each carries a severity and a
//! time-to-live after which it is dismissed.

use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Default display time for a notification
pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

/// How a notification is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
    System,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✕",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
            Severity::System => "•",
        }
    }
}

/// A single message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Builder method: set the display time
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.icon(), self.message)
    }
}

/// Visible notifications, oldest first
#[derive(Debug, Default)]
pub struct Toasts {
    entries: Vec<(Instant, Notification)>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.entries.push((Instant::now(), notification));
    }

    /// Drop every notification whose time-to-live has passed
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(shown, n)| shown.elapsed() < n.ttl);
        before - self.entries.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|(_, n)| n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
