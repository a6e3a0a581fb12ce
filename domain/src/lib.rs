//! Domain layer for swarm
//!
//! This crate contains the core business logic, entities, and value objects
//! of a file-coordinated, multi-participant discussion. It has no dependencies
//! on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Participant**: an external responder with a command, role and limits
//! - **Mode / Strategy**: the pure policy choosing the next speaker
//! - **Run state**: round counter, cooldowns and debounce hash shared on disk
//! - **Transcripts**: a human-readable log of turn-blocks and a JSONL record stream

pub mod config;
pub mod core;
pub mod orchestration;
pub mod participant;
pub mod prompt;
pub mod state;
pub mod transcript;

// Re-export commonly used types
pub use config::{ConfigKeyInfo, ConfigOption, Mode, SwarmConfig, known_keys, lookup_key};
pub use core::{
    error::DomainError,
    string::{ENGINE_TRUNCATION_MARKER, PARTICIPANT_TRUNCATION_MARKER, clamp_chars},
};
pub use orchestration::outcome::{IdleReason, RoundOutcome};
pub use orchestration::strategy::{
    Alternating, ConsensusCycle, RandomPick, RoundRobin, SpeakerStrategy,
};
pub use participant::{
    entities::ParticipantSpec,
    reply::{ERROR_TAG, FailureKind, Reply, is_error_tagged},
};
pub use prompt::{PromptTemplate, TurnContext};
pub use state::RunState;
pub use transcript::{
    INIT_BANNER, SEPARATOR_WIDTH, SUMMARY_BANNER_WIDTH, TurnRecord, config_change_notice,
    summary_block, turn_block,
};
