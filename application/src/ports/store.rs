//! Persistence port
//!
//! Defines how use cases read and write the shared discussion artifacts:
//! configuration, run state, the human transcript, the structured transcript
//! and the summary artifact.
//!
//! Several engine processes may use the same artifacts at once. Implementations
//! must make each individual append atomic with respect to other appenders, but
//! nothing more: a read-compute-write span across a round is not protected.

use std::path::PathBuf;
use swarm_domain::{DomainError, RunState, SwarmConfig, TurnRecord};
use thiserror::Error;

/// Errors from the persistence layer. All of them are fatal to the engine.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {}: {}", .path.display(), .source)]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration in {}: {}", .path.display(), .source)]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Shared discussion storage
pub trait SwarmStore: Send + Sync {
    fn load_config(&self) -> Result<SwarmConfig, StoreError>;

    fn save_config(&self, config: &SwarmConfig) -> Result<(), StoreError>;

    fn load_state(&self) -> Result<RunState, StoreError>;

    fn save_state(&self, state: &RunState) -> Result<(), StoreError>;

    /// Append raw text to the human transcript.
    fn append_transcript(&self, text: &str) -> Result<(), StoreError>;

    /// Append one record to the structured transcript.
    fn append_record(&self, record: &TurnRecord) -> Result<(), StoreError>;

    /// Last `limit` bytes of the human transcript.
    fn transcript_tail(&self, limit: usize) -> Result<String, StoreError>;

    /// Content hash of the human transcript.
    fn transcript_hash(&self) -> Result<String, StoreError>;

    /// Replace the standalone summary artifact.
    fn write_summary(&self, content: &str) -> Result<(), StoreError>;

    /// Truncate the human transcript to its banner and empty the structured one.
    fn reset_transcripts(&self) -> Result<(), StoreError>;
}
