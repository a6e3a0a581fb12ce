//! Watch loop
//!
//! Keeps running rounds until cancelled, polling fast while the discussion
//! moves and slowly while it idles. Several watchers may share the same
//! files; the debounce in the round engine keeps them from talking over each
//! other.

use crate::config::WatchParams;
use crate::ports::invoker::ParticipantInvoker;
use crate::ports::progress::RoundProgress;
use crate::ports::store::SwarmStore;
use crate::use_cases::run_round::{RunRoundError, RunRoundUseCase};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// What a watch session did before it was stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchReport {
    /// Rounds that appended a turn-block
    pub rounds: u64,
    /// Rounds that recorded nothing
    pub idle_polls: u64,
}

pub struct WatchLoop<S: SwarmStore + 'static, I: ParticipantInvoker + 'static> {
    round: RunRoundUseCase<S, I>,
    params: WatchParams,
}

impl<S: SwarmStore + 'static, I: ParticipantInvoker + 'static> WatchLoop<S, I> {
    pub fn new(store: Arc<S>, invoker: Arc<I>, params: WatchParams) -> Self {
        Self {
            round: RunRoundUseCase::new(store, invoker),
            params,
        }
    }

    /// Run rounds until `cancel` fires.
    ///
    /// Cancellation interrupts both the sleep and an in-flight round. A round
    /// dropped mid-invocation records nothing and its child process is killed.
    pub async fn run(
        &self,
        cancel: CancellationToken,
        progress: &dyn RoundProgress,
    ) -> Result<WatchReport, RunRoundError> {
        let mut report = WatchReport::default();
        info!(
            "Watching (active sleep {:?}, idle sleep {:?})",
            self.params.active_sleep, self.params.idle_sleep
        );

        loop {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                outcome = self.round.execute_with_progress(progress) => outcome?,
            };

            if outcome.recorded_turn() {
                report.rounds += 1;
            } else {
                report.idle_polls += 1;
            }

            let pause = self.params.sleep_after(outcome.made_progress());
            debug!("Sleeping {:?}", pause);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        info!(
            "Watch stopped after {} rounds ({} idle polls)",
            report.rounds, report.idle_polls
        );
        Ok(report)
    }
}
