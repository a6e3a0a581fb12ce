//! Discussion configuration
//!
//! [`SwarmConfig`] is the shared, on-disk configuration that every engine
//! process reloads at the start of each round. It is edited through the
//! closed set of [`ConfigOption`]s rather than by arbitrary field injection.

mod config_option;
mod mode;
mod swarm_config;

pub use config_option::{ConfigKeyInfo, ConfigOption, known_keys, lookup_key};
pub use mode::Mode;
pub use swarm_config::SwarmConfig;
