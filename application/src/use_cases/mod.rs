//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod configure;
pub mod reset;
pub mod run_round;
pub(crate) mod shared;
pub mod summarize;
pub mod watch;
