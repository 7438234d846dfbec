//! Session State
//!
//! Everything the dashboard remembers between renders. Owned by the
//! controller; nothing here is shared or global.

use crate::trend::TimeWindow;
use crate::types::Settings;
use crate::view::StatusLine;
use crate::workspace::Workspace;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Words being compared
    pub workspace: Workspace,
    /// Selected trend window
    pub window: TimeWindow,
    /// Local mirror of the server settings
    pub settings: Settings,
    /// Latest status-bar numbers
    pub status: StatusLine,
}

impl SessionState {
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            ..Default::default()
        }
    }
}
