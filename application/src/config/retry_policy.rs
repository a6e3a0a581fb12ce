//! Retry policy around participant invocations.

use std::time::Duration;
use swarm_domain::SwarmConfig;

/// Total attempts per turn, first try included.
pub const MAX_ATTEMPTS: u32 = 3;

/// Bounded exponential backoff.
///
/// The first delay is `initial`, each following delay doubles, and no delay
/// exceeds `max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial: Duration,
    pub max: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial: Duration, max: Duration) -> Self {
        Self {
            max_attempts,
            initial: initial.min(max),
            max,
        }
    }

    /// Policy described by the discussion configuration.
    pub fn from_config(config: &SwarmConfig) -> Self {
        Self::new(MAX_ATTEMPTS, config.initial_backoff(), config.max_backoff())
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let mut delay = self.initial;
        for _ in 1..attempt {
            delay = delay.saturating_mul(2).min(self.max);
        }
        delay
    }
}
