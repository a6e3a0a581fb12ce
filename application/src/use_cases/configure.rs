//! Configure use case
//!
//! Applies typed edits to the shared configuration and announces them in the
//! human transcript so every reader sees the change.

use crate::ports::store::{StoreError, SwarmStore};
use crate::use_cases::shared::utc_now;
use std::sync::Arc;
use swarm_domain::{ConfigOption, DomainError, SwarmConfig, config_change_notice};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigureError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

pub struct ConfigureSwarmUseCase<S: SwarmStore + 'static> {
    store: Arc<S>,
}

impl<S: SwarmStore + 'static> ConfigureSwarmUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current configuration.
    pub fn current(&self) -> Result<SwarmConfig, StoreError> {
        self.store.load_config()
    }

    /// Apply `options` in order, validate, save and append a change notice.
    ///
    /// Nothing is written when `options` is empty or any edit is rejected.
    pub fn apply(&self, options: &[ConfigOption]) -> Result<SwarmConfig, ConfigureError> {
        let mut config = self.store.load_config()?;
        if options.is_empty() {
            return Ok(config);
        }

        for option in options {
            option.apply(&mut config)?;
        }
        config.validate()?;

        self.store.save_config(&config)?;
        self.store
            .append_transcript(&config_change_notice(&utc_now(), &config))?;

        let keys: Vec<String> = options.iter().map(ConfigOption::key).collect();
        info!("Configuration updated: {}", keys.join(", "));
        Ok(config)
    }
}
