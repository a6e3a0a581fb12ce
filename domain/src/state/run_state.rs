//! Run state entity
//!
//! The state file is shared by every engine process working on the same
//! discussion. It is reloaded at the start of a round and written back at the
//! end, so an in-memory [`RunState`] is only valid for one round.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mutable, persisted progress of a discussion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Turn-blocks appended since the last reset
    #[serde(default)]
    pub round: u64,
    #[serde(default)]
    pub last_speaker: Option<String>,
    /// Transcript hash after the last recorded round (debounce)
    #[serde(default)]
    pub last_hash: Option<String>,
    /// UTC timestamp of the last reset
    #[serde(default)]
    pub started: String,
    /// Participant name → remaining cooldown rounds (never zero)
    #[serde(default)]
    pub cooldowns: BTreeMap<String, u32>,
    /// Consensus mode: who already spoke in the current cycle
    #[serde(default)]
    pub speakers_this_round: BTreeSet<String>,
}

impl RunState {
    /// Fresh state stamped with `started`.
    pub fn started_at(started: impl Into<String>) -> Self {
        Self {
            started: started.into(),
            ..Default::default()
        }
    }

    pub fn cooldown_of(&self, name: &str) -> u32 {
        self.cooldowns.get(name).copied().unwrap_or(0)
    }

    /// Post-turn cooldown bookkeeping.
    ///
    /// When `penalty` is set the speaker starts a cooldown of that many rounds.
    /// Every other cooling participant counts down by one; entries that reach
    /// zero are removed.
    pub fn apply_cooldowns(&mut self, speaker: &str, penalty: Option<u32>) {
        self.cooldowns.retain(|name, left| {
            if name != speaker {
                *left = left.saturating_sub(1);
            }
            *left > 0
        });
        match penalty {
            Some(rounds) if rounds > 0 => {
                self.cooldowns.insert(speaker.to_string(), rounds);
            }
            _ => {
                self.cooldowns.remove(speaker);
            }
        }
    }

    /// Consensus bookkeeping: mark `speaker` as heard this cycle and start a
    /// new cycle once every name in `eligible` has spoken.
    pub fn mark_spoken<'a>(&mut self, speaker: &str, eligible: impl IntoIterator<Item = &'a str>) {
        self.speakers_this_round.insert(speaker.to_string());
        let mut eligible = eligible.into_iter().peekable();
        if eligible.peek().is_none() {
            return;
        }
        if eligible.all(|name| self.speakers_this_round.contains(name)) {
            self.speakers_this_round.clear();
        }
    }

    /// Record a completed turn.
    pub fn advance(&mut self, speaker: &str, transcript_hash: String) {
        self.round += 1;
        self.last_speaker = Some(speaker.to_string());
        self.last_hash = Some(transcript_hash);
    }

    /// Debounce check: nothing changed since the last recorded round.
    ///
    /// Round zero always proceeds, whatever the hash says.
    pub fn is_unchanged(&self, current_hash: &str) -> bool {
        self.round > 0 && self.last_hash.as_deref() == Some(current_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let state = RunState::started_at("2026-01-01T00:00:00Z");
        let json = serde_json::to_value(&state).unwrap();
        for key in [
            "round",
            "last_speaker",
            "last_hash",
            "started",
            "cooldowns",
            "speakers_this_round",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json["last_speaker"].is_null());
        assert!(json["speakers_this_round"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_penalty_then_countdown() {
        let mut state = RunState::default();
        state.apply_cooldowns("A", Some(2));
        assert_eq!(state.cooldown_of("A"), 2);

        state.apply_cooldowns("B", None);
        assert_eq!(state.cooldown_of("A"), 1);

        state.apply_cooldowns("B", None);
        assert_eq!(state.cooldown_of("A"), 0);
        assert!(state.cooldowns.is_empty());
    }

    #[test]
    fn test_zero_penalty_is_no_cooldown() {
        let mut state = RunState::default();
        state.apply_cooldowns("A", Some(0));
        assert!(state.cooldowns.is_empty());
    }

    #[test]
    fn test_success_clears_own_stale_cooldown() {
        let mut state = RunState::default();
        state.cooldowns.insert("A".to_string(), 3);
        state.apply_cooldowns("A", None);
        assert_eq!(state.cooldown_of("A"), 0);
    }

    #[test]
    fn test_mark_spoken_cycles() {
        let mut state = RunState::default();
        state.mark_spoken("A", ["A", "B"]);
        assert!(state.speakers_this_round.contains("A"));
        state.mark_spoken("B", ["A", "B"]);
        assert!(state.speakers_this_round.is_empty());
    }

    #[test]
    fn test_mark_spoken_with_empty_eligible_keeps_set() {
        let mut state = RunState::default();
        state.mark_spoken("A", std::iter::empty());
        assert_eq!(state.speakers_this_round.len(), 1);
    }

    #[test]
    fn test_debounce_round_zero_always_runs() {
        let mut state = RunState::default();
        state.last_hash = Some("abc".to_string());
        assert!(!state.is_unchanged("abc"));

        state.advance("A", "abc".to_string());
        assert_eq!(state.round, 1);
        assert_eq!(state.last_speaker.as_deref(), Some("A"));
        assert!(state.is_unchanged("abc"));
        assert!(!state.is_unchanged("def"));
    }
}
