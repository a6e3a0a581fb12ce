//! Turn-taking orchestration
//!
//! This module contains the pure speaker-selection policies that decide who
//! talks next, and the value objects describing what a round step did.

pub mod outcome;
pub mod strategy;
