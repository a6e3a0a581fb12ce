//! Persisted run state of a discussion.

mod run_state;

pub use run_state::RunState;
