//! Reset use case

use crate::ports::store::{StoreError, SwarmStore};
use crate::use_cases::shared::utc_now;
use std::sync::Arc;
use swarm_domain::RunState;
use tracing::info;

/// Start the discussion over: banner-only transcript, empty structured
/// transcript, fresh run state. The configuration is kept.
pub struct ResetDiscussionUseCase<S: SwarmStore + 'static> {
    store: Arc<S>,
}

impl<S: SwarmStore + 'static> ResetDiscussionUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn execute(&self) -> Result<RunState, StoreError> {
        self.store.reset_transcripts()?;
        let state = RunState::started_at(utc_now());
        self.store.save_state(&state)?;
        info!("Discussion reset");
        Ok(state)
    }
}
