//! Speaker-selection strategies
//!
//! Each [`Mode`] is backed by one [`SpeakerStrategy`]. Strategies are pure:
//! they look at the eligible participants (active and not cooling down, in
//! configured order) and the run state, and never mutate anything. An empty
//! eligible list always yields `None`, which tells the round engine to skip
//! the round.

use crate::config::Mode;
use crate::participant::entities::ParticipantSpec;
use crate::state::RunState;
use rand::RngCore;
use rand::seq::IndexedRandom;

/// A pure policy choosing the next speaker.
pub trait SpeakerStrategy: Send + Sync {
    /// Get the name of this strategy
    fn name(&self) -> &'static str;

    /// Choose the next speaker among `eligible`.
    fn select<'a>(
        &self,
        eligible: &'a [ParticipantSpec],
        state: &RunState,
        rng: &mut dyn RngCore,
    ) -> Option<&'a ParticipantSpec>;
}

/// Discussion: cycle through participants in order.
pub struct RoundRobin;

/// Debate: the first two participants alternate by round parity.
pub struct Alternating;

/// Brainstorm: uniformly random speaker.
pub struct RandomPick;

/// Consensus: everyone speaks once per cycle, in order.
pub struct ConsensusCycle;

impl Mode {
    /// The strategy implementing this mode.
    pub fn strategy(&self) -> &'static dyn SpeakerStrategy {
        match self {
            Mode::Discussion => &RoundRobin,
            Mode::Debate => &Alternating,
            Mode::Brainstorm => &RandomPick,
            Mode::Consensus => &ConsensusCycle,
        }
    }
}

impl SpeakerStrategy for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn select<'a>(
        &self,
        eligible: &'a [ParticipantSpec],
        state: &RunState,
        _rng: &mut dyn RngCore,
    ) -> Option<&'a ParticipantSpec> {
        let position = state
            .last_speaker
            .as_deref()
            .and_then(|last| eligible.iter().position(|p| p.name == last));
        match position {
            Some(idx) => eligible.get((idx + 1) % eligible.len()),
            None => eligible.first(),
        }
    }
}

impl SpeakerStrategy for Alternating {
    fn name(&self) -> &'static str {
        "alternating"
    }

    fn select<'a>(
        &self,
        eligible: &'a [ParticipantSpec],
        state: &RunState,
        _rng: &mut dyn RngCore,
    ) -> Option<&'a ParticipantSpec> {
        if eligible.len() < 2 {
            return eligible.first();
        }
        eligible.get((state.round % 2) as usize)
    }
}

impl SpeakerStrategy for RandomPick {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select<'a>(
        &self,
        eligible: &'a [ParticipantSpec],
        _state: &RunState,
        rng: &mut dyn RngCore,
    ) -> Option<&'a ParticipantSpec> {
        eligible.choose(rng)
    }
}

impl SpeakerStrategy for ConsensusCycle {
    fn name(&self) -> &'static str {
        "consensus-cycle"
    }

    fn select<'a>(
        &self,
        eligible: &'a [ParticipantSpec],
        state: &RunState,
        _rng: &mut dyn RngCore,
    ) -> Option<&'a ParticipantSpec> {
        eligible
            .iter()
            .find(|p| !state.speakers_this_round.contains(&p.name))
            .or_else(|| eligible.first())
    }
}
