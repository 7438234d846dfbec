//! Polling Dashboard
//!
//! The controller ties the backend, the session and the view together.
//!
//! ## Refresh cycle
//!
//! - A [`RefreshTimer`] fires every `auto_refresh_seconds` and triggers
//!   [`DashboardController::load_all`]
//! - Applying settings re-arms the timer with the new period
//! - Workspace edits start a trend pass; only the newest pass may render

mod controller;
mod session;
mod timer;

pub use controller::{ControllerOptions, DashboardController, TrendOutcome, TrendPass};
pub use session::SessionState;
pub use timer::RefreshTimer;
