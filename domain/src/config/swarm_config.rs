//! Shared discussion configuration entity

use crate::config::mode::Mode;
use crate::core::error::DomainError;
use crate::participant::entities::ParticipantSpec;
use crate::state::RunState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Process-wide discussion settings, persisted as the single source of truth.
///
/// Participant order matters: discussion, debate and consensus modes walk the
/// list in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmConfig {
    pub participants: Vec<ParticipantSpec>,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u64,
    #[serde(default)]
    pub mode: Mode,
    /// Participant producing the closing summary (empty = first eligible)
    #[serde(default)]
    pub spokesman: String,
    /// Size of the transcript tail fed into prompts, in bytes
    #[serde(default = "default_context_bytes")]
    pub context_bytes: usize,
    /// Engine-level output cap, in characters
    #[serde(default = "default_output_max_chars")]
    pub output_max_chars: usize,
    #[serde(default = "default_backoff_initial_sec")]
    pub backoff_initial_sec: f64,
    #[serde(default = "default_backoff_max_sec")]
    pub backoff_max_sec: f64,
}

fn default_topic() -> String {
    "What is consciousness?".to_string()
}

fn default_max_rounds() -> u64 {
    10
}

fn default_context_bytes() -> usize {
    8192
}

fn default_output_max_chars() -> usize {
    2000
}

fn default_backoff_initial_sec() -> f64 {
    1.0
}

fn default_backoff_max_sec() -> f64 {
    8.0
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self::with_participants(vec![
            ParticipantSpec::new("Local_LLM", ["ollama", "run", "llama3"], "The Fast One")
                .with_system("Be terse. Build on prior points."),
        ])
    }
}

impl SwarmConfig {
    /// Default settings around an explicit participant list.
    pub fn with_participants(participants: Vec<ParticipantSpec>) -> Self {
        Self {
            participants,
            topic: default_topic(),
            max_rounds: default_max_rounds(),
            mode: Mode::default(),
            spokesman: String::new(),
            context_bytes: default_context_bytes(),
            output_max_chars: default_output_max_chars(),
            backoff_initial_sec: default_backoff_initial_sec(),
            backoff_max_sec: default_backoff_max_sec(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_backoff(mut self, initial_sec: f64, max_sec: f64) -> Self {
        self.backoff_initial_sec = initial_sec;
        self.backoff_max_sec = max_sec;
        self
    }

    /// Structural validation, run whenever the config is loaded or edited.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for participant in &self.participants {
            if participant.name.trim().is_empty() {
                return Err(DomainError::EmptyParticipantName);
            }
            if !seen.insert(participant.name.as_str()) {
                return Err(DomainError::DuplicateParticipant(participant.name.clone()));
            }
            if participant.argv.is_empty() || participant.argv[0].is_empty() {
                return Err(DomainError::EmptyCommand(participant.name.clone()));
            }
        }
        for (field, value) in [
            ("backoff_initial_sec", self.backoff_initial_sec),
            ("backoff_max_sec", self.backoff_max_sec),
        ] {
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(DomainError::InvalidBackoff { field });
            }
        }
        Ok(())
    }

    pub fn participant(&self, name: &str) -> Option<&ParticipantSpec> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// Participants that are active and not cooling down, in configured order.
    pub fn eligible(&self, state: &RunState) -> Vec<ParticipantSpec> {
        self.participants
            .iter()
            .filter(|p| p.active && state.cooldown_of(&p.name) == 0)
            .cloned()
            .collect()
    }

    /// First retry delay, clamped into `[0, backoff_max_sec]`.
    pub fn initial_backoff(&self) -> Duration {
        seconds(self.backoff_initial_sec.min(self.backoff_max_sec))
    }

    /// Upper bound for retry delays.
    pub fn max_backoff(&self) -> Duration {
        seconds(self.backoff_max_sec)
    }
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
