//! Discussion mode definitions.
//!
//! Defines [`Mode`], which determines how the next speaker is chosen:
//! - Discussion: round-robin over eligible participants
//! - Debate: the first two eligible participants alternate by round parity
//! - Brainstorm: uniformly random speaker
//! - Consensus: everyone speaks once per cycle, in configured order

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker-selection mode of a discussion.
///
/// Each mode maps to exactly one
/// [`SpeakerStrategy`](crate::orchestration::strategy::SpeakerStrategy);
/// adding a mode means adding a variant here and a strategy there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Discussion,
    Debate,
    Brainstorm,
    Consensus,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Discussion,
        Mode::Debate,
        Mode::Brainstorm,
        Mode::Consensus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Discussion => "discussion",
            Mode::Debate => "debate",
            Mode::Brainstorm => "brainstorm",
            Mode::Consensus => "consensus",
        }
    }

    /// Get a human-readable description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            Mode::Discussion => "Discussion: round-robin in configured order",
            Mode::Debate => "Debate: first two participants alternate",
            Mode::Brainstorm => "Brainstorm: random speaker each round",
            Mode::Consensus => "Consensus: everyone speaks once per cycle",
        }
    }

    /// Check if this mode tracks per-cycle speakers
    pub fn is_consensus(&self) -> bool {
        matches!(self, Mode::Consensus)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discussion" => Ok(Mode::Discussion),
            "debate" => Ok(Mode::Debate),
            "brainstorm" => Ok(Mode::Brainstorm),
            "consensus" => Ok(Mode::Consensus),
            _ => Err(format!(
                "Invalid mode: {} (expected discussion, debate, brainstorm or consensus)",
                s
            )),
        }
    }
}
