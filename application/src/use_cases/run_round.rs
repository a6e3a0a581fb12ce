//! Run Round use case
//!
//! One step of the turn-taking state machine:
//!
//! ```text
//! Debounce-check → Selecting → Prompting → Invoking ⇄ Retrying
//!     → Recording → Cooldown-update → Terminating?
//! ```
//!
//! Config and state are reloaded from the store on every call and written back
//! before returning. The store is the only coordination medium between engine
//! processes, so nothing here is cached across rounds.

use crate::config::RetryPolicy;
use crate::ports::invoker::ParticipantInvoker;
use crate::ports::progress::{NoProgress, RoundProgress};
use crate::ports::store::{StoreError, SwarmStore};
use crate::use_cases::shared::utc_now;
use crate::use_cases::summarize::SummarizeUseCase;
use std::sync::Arc;
use swarm_domain::{
    ENGINE_TRUNCATION_MARKER, IdleReason, ParticipantSpec, PromptTemplate, Reply, RoundOutcome,
    TurnContext, TurnRecord, clamp_chars, turn_block,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a round. Participant failures are never errors here.
#[derive(Error, Debug)]
pub enum RunRoundError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for running one round of the discussion
pub struct RunRoundUseCase<S: SwarmStore + 'static, I: ParticipantInvoker + 'static> {
    store: Arc<S>,
    invoker: Arc<I>,
    summarize: SummarizeUseCase<S, I>,
}

impl<S: SwarmStore + 'static, I: ParticipantInvoker + 'static> RunRoundUseCase<S, I> {
    pub fn new(store: Arc<S>, invoker: Arc<I>) -> Self {
        let summarize = SummarizeUseCase::new(Arc::clone(&store), Arc::clone(&invoker));
        Self {
            store,
            invoker,
            summarize,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self) -> Result<RoundOutcome, RunRoundError> {
        self.execute_with_progress(&NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        progress: &dyn RoundProgress,
    ) -> Result<RoundOutcome, RunRoundError> {
        let config = self.store.load_config()?;
        let mut state = self.store.load_state()?;

        // Round 0 always runs, so max_rounds = 0 still yields one turn and a summary
        if state.round > 0 && state.round >= config.max_rounds {
            debug!(
                "Round {} already reached max_rounds ({})",
                state.round, config.max_rounds
            );
            return Ok(idle(IdleReason::Complete, progress));
        }

        // Debounce-check
        let current_hash = self.store.transcript_hash()?;
        if state.is_unchanged(&current_hash) {
            debug!("No new content since last round; idling");
            return Ok(idle(IdleReason::Debounced, progress));
        }

        // Selecting
        let eligible = config.eligible(&state);
        let speaker = {
            let mut rng = rand::rng();
            config
                .mode
                .strategy()
                .select(&eligible, &state, &mut rng)
                .cloned()
        };
        let Some(speaker) = speaker else {
            warn!("No active participants available (or all cooling down)");
            return Ok(idle(IdleReason::NoEligibleParticipants, progress));
        };

        info!("Round {}: {}'s turn", state.round, speaker.name);
        progress.on_turn_start(&speaker, state.round);

        // Prompting
        let recent = self.store.transcript_tail(config.context_bytes)?;
        let prompt = PromptTemplate::turn_prompt(&TurnContext {
            participant: &speaker,
            topic: &config.topic,
            mode: config.mode,
            round: state.round,
            recent: &recent,
        });

        // Invoking / Retrying
        let policy = RetryPolicy::from_config(&config);
        let reply = self
            .invoke_with_retry(&speaker, &prompt, &policy, progress)
            .await;
        let failed = reply.is_failure();

        // Recording
        let content = clamp_chars(
            &reply.render(),
            config.output_max_chars,
            ENGINE_TRUNCATION_MARKER,
        );
        let timestamp = utc_now();
        self.store.append_transcript(&turn_block(
            &timestamp,
            &speaker.name,
            &speaker.role,
            &content,
        ))?;
        self.store.append_record(&TurnRecord {
            timestamp,
            name: speaker.name.clone(),
            role: speaker.role.clone(),
            round: state.round,
            mode: config.mode,
            topic: config.topic.clone(),
            content,
        })?;

        let taken = state.round;
        state.advance(&speaker.name, self.store.transcript_hash()?);

        // Cooldown-update
        let penalty = failed.then_some(speaker.cooldown_after_error);
        if let Some(rounds) = penalty {
            warn!("{} cooling down for {} rounds", speaker.name, rounds);
        }
        state.apply_cooldowns(&speaker.name, penalty);
        if config.mode.is_consensus() {
            state.mark_spoken(&speaker.name, eligible.iter().map(|p| p.name.as_str()));
        }

        self.store.save_state(&state)?;
        progress.on_turn_recorded(&speaker.name, taken, failed);

        // Terminating?
        if state.round >= config.max_rounds {
            info!("Reached maximum rounds ({})", config.max_rounds);
            let spokesman = self.summarize.summarize(&config, &state, progress).await?;
            return Ok(RoundOutcome::Finished {
                speaker: speaker.name,
                round: state.round,
                spokesman,
            });
        }

        Ok(RoundOutcome::Progressed {
            speaker: speaker.name,
            round: state.round,
        })
    }

    /// Invoke with bounded exponential backoff while the reply is a failure.
    async fn invoke_with_retry(
        &self,
        speaker: &ParticipantSpec,
        prompt: &str,
        policy: &RetryPolicy,
        progress: &dyn RoundProgress,
    ) -> Reply {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let reply = self.invoker.respond(speaker, prompt).await;
            if !reply.is_failure() {
                return reply;
            }

            warn!("{} error on try {}: {}", speaker.name, attempt, reply);
            let retry_in = (attempt < policy.max_attempts).then(|| policy.delay_after(attempt));
            progress.on_attempt_failed(&speaker.name, attempt, &reply, retry_in);

            match retry_in {
                None => return reply,
                Some(delay) if !delay.is_zero() => tokio::time::sleep(delay).await,
                Some(_) => {}
            }
        }
    }
}

fn idle(reason: IdleReason, progress: &dyn RoundProgress) -> RoundOutcome {
    progress.on_idle(reason);
    RoundOutcome::Idle(reason)
}
