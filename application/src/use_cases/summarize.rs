//! Summary protocol
//!
//! Once a discussion reaches `max_rounds`, one participant (the spokesman)
//! is asked for a closing synthesis. The reply is appended to the human
//! transcript inside a banner and written alone to the summary artifact.

use crate::ports::invoker::ParticipantInvoker;
use crate::ports::progress::{NoProgress, RoundProgress};
use crate::ports::store::{StoreError, SwarmStore};
use std::sync::Arc;
use swarm_domain::{
    ENGINE_TRUNCATION_MARKER, ParticipantSpec, PromptTemplate, RunState, SwarmConfig, clamp_chars,
    summary_block,
};
use tracing::{info, warn};

/// Pick the spokesman: the configured name when that participant is active,
/// otherwise the first eligible participant.
pub fn choose_spokesman(config: &SwarmConfig, state: &RunState) -> Option<ParticipantSpec> {
    match config.participant(&config.spokesman).filter(|p| p.active) {
        Some(spec) => Some(spec.clone()),
        None => config.eligible(state).into_iter().next(),
    }
}

/// Use case producing the closing summary
pub struct SummarizeUseCase<S: SwarmStore + 'static, I: ParticipantInvoker + 'static> {
    store: Arc<S>,
    invoker: Arc<I>,
}

impl<S: SwarmStore + 'static, I: ParticipantInvoker + 'static> SummarizeUseCase<S, I> {
    pub fn new(store: Arc<S>, invoker: Arc<I>) -> Self {
        Self { store, invoker }
    }

    /// Summarize the discussion as currently stored.
    pub async fn execute(&self) -> Result<Option<String>, StoreError> {
        let config = self.store.load_config()?;
        let state = self.store.load_state()?;
        self.summarize(&config, &state, &NoProgress).await
    }

    /// Ask the spokesman for a synthesis and record it.
    ///
    /// Returns the spokesman's name, or `None` when nobody could speak.
    /// The spokesman gets a single attempt; a failure reply is recorded as is.
    pub async fn summarize(
        &self,
        config: &SwarmConfig,
        state: &RunState,
        progress: &dyn RoundProgress,
    ) -> Result<Option<String>, StoreError> {
        let Some(spokesman) = choose_spokesman(config, state) else {
            warn!("No spokesman available for summary");
            return Ok(None);
        };

        let prompt = PromptTemplate::summary_prompt(config.mode, &config.topic);
        let reply = self.invoker.respond(&spokesman, &prompt).await;
        if reply.is_failure() {
            warn!("Spokesman {} failed: {}", spokesman.name, reply);
        }
        let content = clamp_chars(
            &reply.render(),
            config.output_max_chars,
            ENGINE_TRUNCATION_MARKER,
        );

        self.store
            .append_transcript(&summary_block(&spokesman.name, &content))?;
        self.store.write_summary(&content)?;

        info!("Summary created by {}", spokesman.name);
        progress.on_summary(&spokesman.name);
        Ok(Some(spokesman.name))
    }
}
