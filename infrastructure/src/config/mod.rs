//! Engine settings loading for swarm
//!
//! This module handles file I/O and merging of settings from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SWARM_*` environment variables (`__` separates sections)
//! 2. `--settings <path>` specified file
//! 3. Project root: `./swarm.toml`
//! 4. Global: `~/.config/swarm/settings.toml`
//! 5. Default values

mod loader;
mod settings;

pub use loader::SettingsLoader;
pub use settings::{EngineSettings, FileSettings, SettingsError, WatchSettings};
