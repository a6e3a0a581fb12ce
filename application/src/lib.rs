//! Application layer for swarm
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{RetryPolicy, WatchParams};
pub use ports::{
    invoker::ParticipantInvoker,
    progress::{NoProgress, RoundProgress},
    store::{StoreError, SwarmStore},
};
pub use use_cases::configure::{ConfigureError, ConfigureSwarmUseCase};
pub use use_cases::reset::ResetDiscussionUseCase;
pub use use_cases::run_round::{RunRoundError, RunRoundUseCase};
pub use use_cases::summarize::{SummarizeUseCase, choose_spokesman};
pub use use_cases::watch::{WatchLoop, WatchReport};
