//! File persistence
//!
//! Shared artifacts on disk, guarded by [`crate::lock`] for appends and
//! replaced atomically for whole-file writes.

mod files;
mod store;

pub use files::{append_text, hash_of, tail_bytes, write_atomic};
pub use store::{FileSwarmStore, SwarmPaths};
