//! Participant entity

use serde::{Deserialize, Serialize};

/// One configured responder (Entity, identified by `name`).
///
/// The command is an explicit argument vector and is never passed through a
/// shell. Every name in `env` must be present and non-empty in the engine's
/// environment, otherwise the invocation fails before spawning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSpec {
    pub name: String,
    pub argv: Vec<String>,
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Preamble injected into every prompt for this participant
    #[serde(default)]
    pub system: String,
    /// Required environment variable names
    #[serde(default)]
    pub env: Vec<String>,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
    /// Participant-level output cap, in characters
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Rounds to skip after exhausting retries
    #[serde(default = "default_cooldown_after_error")]
    pub cooldown_after_error: u32,
}

fn default_active() -> bool {
    true
}

fn default_timeout_sec() -> u64 {
    60
}

fn default_max_chars() -> usize {
    1600
}

fn default_cooldown_after_error() -> u32 {
    2
}

impl ParticipantSpec {
    pub fn new(
        name: impl Into<String>,
        argv: impl IntoIterator<Item = impl Into<String>>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            argv: argv.into_iter().map(Into::into).collect(),
            role: role.into(),
            active: default_active(),
            system: String::new(),
            env: Vec::new(),
            timeout_sec: default_timeout_sec(),
            max_chars: default_max_chars(),
            cooldown_after_error: default_cooldown_after_error(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn with_required_env(mut self, name: impl Into<String>) -> Self {
        self.env.push(name.into());
        self
    }

    pub fn with_timeout_sec(mut self, timeout_sec: u64) -> Self {
        self.timeout_sec = timeout_sec;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn with_cooldown_after_error(mut self, rounds: u32) -> Self {
        self.cooldown_after_error = rounds;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}
