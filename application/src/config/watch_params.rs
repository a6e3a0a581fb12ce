//! Watch loop parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polling intervals of the [`WatchLoop`](crate::use_cases::watch::WatchLoop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchParams {
    /// Sleep after a round that made progress.
    pub active_sleep: Duration,
    /// Sleep after a no-op round.
    pub idle_sleep: Duration,
}

impl Default for WatchParams {
    fn default() -> Self {
        Self {
            active_sleep: Duration::from_secs(5),
            idle_sleep: Duration::from_secs(30),
        }
    }
}

impl WatchParams {
    // ==================== Builder Methods ====================

    pub fn with_active_sleep(mut self, sleep: Duration) -> Self {
        self.active_sleep = sleep;
        self
    }

    pub fn with_idle_sleep(mut self, sleep: Duration) -> Self {
        self.idle_sleep = sleep;
        self
    }

    /// How long to wait before the next round.
    pub fn sleep_after(&self, made_progress: bool) -> Duration {
        if made_progress {
            self.active_sleep
        } else {
            self.idle_sleep
        }
    }
}
