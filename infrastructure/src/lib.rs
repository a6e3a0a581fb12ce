//! Infrastructure layer for swarm
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: file persistence under cross-process locks,
//! participant processes, and engine settings loading.

pub mod config;
pub mod invoker;
pub mod lock;
pub mod persistence;

// Re-export commonly used types
pub use config::{EngineSettings, FileSettings, SettingsError, SettingsLoader, WatchSettings};
pub use invoker::ProcessInvoker;
pub use lock::{ScopedFileLock, with_lock};
pub use persistence::{FileSwarmStore, SwarmPaths};
