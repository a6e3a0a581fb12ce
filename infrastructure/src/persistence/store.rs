//! File-backed [`SwarmStore`]
//!
//! The five artifacts live side by side (by default in the working
//! directory) and are shared with every other engine process pointed at the
//! same paths:
//!
//! | Artifact | Format | Written by |
//! |---|---|---|
//! | human transcript | text, append-only | [`append_text`] |
//! | structured transcript | JSONL, append-only | [`append_text`] |
//! | config | pretty JSON | [`write_atomic`] |
//! | run state | pretty JSON | [`write_atomic`] |
//! | summary | text | [`write_atomic`] |

use super::files::{append_text, hash_of, tail_bytes, write_atomic};
use crate::lock::with_lock;
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use swarm_application::ports::store::{StoreError, SwarmStore};
use swarm_domain::{INIT_BANNER, RunState, SwarmConfig, TurnRecord};
use tracing::info;

/// Locations of the shared artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmPaths {
    pub transcript: PathBuf,
    pub structured: PathBuf,
    pub config: PathBuf,
    pub state: PathBuf,
    pub summary: PathBuf,
}

impl Default for SwarmPaths {
    fn default() -> Self {
        Self::in_dir(Path::new(""))
    }
}

impl SwarmPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            transcript: dir.join("swarm_discussion.txt"),
            structured: dir.join("swarm_discussion.jsonl"),
            config: dir.join("swarm_config.json"),
            state: dir.join("swarm_state.json"),
            summary: dir.join("swarm_summary.txt"),
        }
    }
}

/// Store over the shared files.
pub struct FileSwarmStore {
    paths: SwarmPaths,
}

impl FileSwarmStore {
    /// Open the store, creating any missing artifact with its initial content:
    /// the banner-only transcript, the default config and a fresh run state.
    pub fn open(paths: SwarmPaths) -> Result<Self, StoreError> {
        let store = Self { paths };

        let transcript = &store.paths.transcript;
        with_lock(transcript, || {
            if !transcript.exists() {
                fs::write(transcript, INIT_BANNER)?;
                info!("Created {}", transcript.display());
            }
            Ok(())
        })
        .map_err(|e| StoreError::io(transcript, e))?;

        if !store.paths.config.exists() {
            store.save_config(&SwarmConfig::default())?;
            info!("Wrote default config to {}", store.paths.config.display());
        }
        if !store.paths.state.exists() {
            store.save_state(&RunState::started_at(utc_now()))?;
        }

        Ok(store)
    }

    pub fn paths(&self) -> &SwarmPaths {
        &self.paths
    }
}

impl SwarmStore for FileSwarmStore {
    fn load_config(&self) -> Result<SwarmConfig, StoreError> {
        let path = &self.paths.config;
        let config: SwarmConfig = read_json(path)?.unwrap_or_default();
        config
            .validate()
            .map_err(|source| StoreError::InvalidConfig {
                path: path.clone(),
                source,
            })?;
        Ok(config)
    }

    fn save_config(&self, config: &SwarmConfig) -> Result<(), StoreError> {
        write_json(&self.paths.config, config)
    }

    fn load_state(&self) -> Result<RunState, StoreError> {
        Ok(read_json(&self.paths.state)?.unwrap_or_default())
    }

    fn save_state(&self, state: &RunState) -> Result<(), StoreError> {
        write_json(&self.paths.state, state)
    }

    fn append_transcript(&self, text: &str) -> Result<(), StoreError> {
        let path = &self.paths.transcript;
        append_text(path, text).map_err(|e| StoreError::io(path, e))
    }

    fn append_record(&self, record: &TurnRecord) -> Result<(), StoreError> {
        let path = &self.paths.structured;
        let line = record.to_line().map_err(|source| StoreError::Malformed {
            path: path.clone(),
            source,
        })?;
        append_text(path, &line).map_err(|e| StoreError::io(path, e))
    }

    fn transcript_tail(&self, limit: usize) -> Result<String, StoreError> {
        let path = &self.paths.transcript;
        tail_bytes(path, limit).map_err(|e| StoreError::io(path, e))
    }

    fn transcript_hash(&self) -> Result<String, StoreError> {
        let path = &self.paths.transcript;
        hash_of(path).map_err(|e| StoreError::io(path, e))
    }

    fn write_summary(&self, content: &str) -> Result<(), StoreError> {
        let path = &self.paths.summary;
        write_atomic(path, content).map_err(|e| StoreError::io(path, e))
    }

    fn reset_transcripts(&self) -> Result<(), StoreError> {
        for (path, content) in [
            (&self.paths.transcript, INIT_BANNER),
            (&self.paths.structured, ""),
        ] {
            with_lock(path, || fs::write(path, content)).map_err(|e| StoreError::io(path, e))?;
        }
        Ok(())
    }
}

fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `None` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    write_atomic(path, &text).map_err(|e| StoreError::io(path, e))
}
