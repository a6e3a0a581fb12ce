//! Engine settings (`swarm.toml`)
//!
//! Per-process settings: where the shared artifacts live and how fast the
//! watch loop polls. The discussion itself is configured through the shared
//! JSON config artifact, not here.

use crate::persistence::SwarmPaths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use swarm_application::WatchParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid settings: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid settings: {key} must be a non-negative number of seconds")]
    InvalidDuration { key: &'static str },
}

/// Complete settings file (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub files: FileSettings,
    pub watch: WatchSettings,
}

/// `[files]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Human transcript
    pub transcript: PathBuf,
    /// Structured transcript (JSONL)
    pub structured: PathBuf,
    pub config: PathBuf,
    pub state: PathBuf,
    pub summary: PathBuf,
    /// Operations log
    pub log: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        let SwarmPaths {
            transcript,
            structured,
            config,
            state,
            summary,
        } = SwarmPaths::default();
        Self {
            transcript,
            structured,
            config,
            state,
            summary,
            log: PathBuf::from("swarm.log"),
        }
    }
}

impl FileSettings {
    pub fn paths(&self) -> SwarmPaths {
        SwarmPaths {
            transcript: self.transcript.clone(),
            structured: self.structured.clone(),
            config: self.config.clone(),
            state: self.state.clone(),
            summary: self.summary.clone(),
        }
    }
}

/// `[watch]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    pub active_sleep_sec: f64,
    pub idle_sleep_sec: f64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            active_sleep_sec: 5.0,
            idle_sleep_sec: 30.0,
        }
    }
}

impl WatchSettings {
    pub fn to_params(&self) -> Result<WatchParams, SettingsError> {
        Ok(WatchParams::default()
            .with_active_sleep(seconds("watch.active_sleep_sec", self.active_sleep_sec)?)
            .with_idle_sleep(seconds("watch.idle_sleep_sec", self.idle_sleep_sec)?))
    }
}

fn seconds(key: &'static str, value: f64) -> Result<Duration, SettingsError> {
    Duration::try_from_secs_f64(value).map_err(|_| SettingsError::InvalidDuration { key })
}
