//! Progress notification port
//!
//! Defines the interface for reporting what the round engine is doing.

use std::time::Duration;
use swarm_domain::{IdleReason, ParticipantSpec, Reply};

/// Callback for progress updates during a round
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait RoundProgress: Send + Sync {
    /// Called when a speaker has been selected and is about to be invoked
    fn on_turn_start(&self, speaker: &ParticipantSpec, round: u64);

    /// Called when a turn has been appended to the transcripts
    fn on_turn_recorded(&self, speaker: &str, round: u64, failed: bool);

    /// Called after a failed attempt; `retry_in` is `None` when retries are exhausted
    fn on_attempt_failed(
        &self,
        _speaker: &str,
        _attempt: u32,
        _reply: &Reply,
        _retry_in: Option<Duration>,
    ) {
    }

    /// Called when a round records nothing
    fn on_idle(&self, _reason: IdleReason) {}

    /// Called when the closing summary has been written
    fn on_summary(&self, _spokesman: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RoundProgress for NoProgress {
    fn on_turn_start(&self, _speaker: &ParticipantSpec, _round: u64) {}
    fn on_turn_recorded(&self, _speaker: &str, _round: u64, _failed: bool) {}
}
