//! Round outcome value objects

use std::fmt;

/// Why a round did not record a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    /// Transcript unchanged since the last recorded round
    Debounced,
    /// Every participant is inactive or cooling down
    NoEligibleParticipants,
    /// `max_rounds` already reached
    Complete,
}

impl IdleReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdleReason::Debounced => "no new content since last round",
            IdleReason::NoEligibleParticipants => "no eligible participants",
            IdleReason::Complete => "discussion complete",
        }
    }
}

impl fmt::Display for IdleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one round step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A turn was recorded and the discussion continues
    Progressed { speaker: String, round: u64 },
    /// A turn was recorded and `max_rounds` was reached
    Finished {
        speaker: String,
        round: u64,
        spokesman: Option<String>,
    },
    /// Nothing was recorded
    Idle(IdleReason),
}

impl RoundOutcome {
    /// Whether the caller should poll again soon.
    pub fn made_progress(&self) -> bool {
        matches!(self, RoundOutcome::Progressed { .. })
    }

    /// Whether this step appended a turn-block.
    pub fn recorded_turn(&self) -> bool {
        !matches!(self, RoundOutcome::Idle(_))
    }
}
