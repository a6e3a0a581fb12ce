//! Inline config edits (`--set key=value`).
//!
//! Only the keys in [`known_keys`] can be edited. Each accepted edit becomes a
//! typed [`ConfigOption`]; anything else is rejected instead of being written
//! into the configuration.

use crate::config::mode::Mode;
use crate::config::swarm_config::SwarmConfig;
use crate::core::error::DomainError;
use crate::participant::entities::ParticipantSpec;
use serde_json::Value;

/// Prefix of the per-participant `active.<name>` toggle.
const ACTIVE_PREFIX: &str = "active.";

/// Metadata for a single editable key.
#[derive(Debug, Clone)]
pub struct ConfigKeyInfo {
    /// Key as written on the command line (`active.` is a prefix).
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

/// All editable keys with their metadata.
pub fn known_keys() -> &'static [ConfigKeyInfo] {
    &KNOWN_KEYS
}

/// Look up an editable key.
pub fn lookup_key(key: &str) -> Option<&'static ConfigKeyInfo> {
    if key.starts_with(ACTIVE_PREFIX) {
        return KNOWN_KEYS.iter().find(|k| k.key == ACTIVE_PREFIX);
    }
    KNOWN_KEYS.iter().find(|k| k.key == key)
}

static KNOWN_KEYS: [ConfigKeyInfo; 10] = [
    ConfigKeyInfo {
        key: "topic",
        description: "Discussion topic",
    },
    ConfigKeyInfo {
        key: "mode",
        description: "Speaker selection: discussion, debate, brainstorm or consensus",
    },
    ConfigKeyInfo {
        key: "max_rounds",
        description: "Rounds before the closing summary",
    },
    ConfigKeyInfo {
        key: "spokesman",
        description: "Participant producing the closing summary",
    },
    ConfigKeyInfo {
        key: "context_bytes",
        description: "Transcript tail fed into prompts, in bytes",
    },
    ConfigKeyInfo {
        key: "output_max_chars",
        description: "Engine-level cap on recorded turns, in characters",
    },
    ConfigKeyInfo {
        key: "backoff_initial_sec",
        description: "First retry delay, in seconds",
    },
    ConfigKeyInfo {
        key: "backoff_max_sec",
        description: "Longest retry delay, in seconds",
    },
    ConfigKeyInfo {
        key: "participants",
        description: "Full participant list as a JSON array",
    },
    ConfigKeyInfo {
        key: ACTIVE_PREFIX,
        description: "active.<name>=true|false toggles one participant",
    },
];

/// One typed configuration edit.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOption {
    Topic(String),
    Mode(Mode),
    MaxRounds(u64),
    Spokesman(String),
    ContextBytes(usize),
    OutputMaxChars(usize),
    BackoffInitialSec(f64),
    BackoffMaxSec(f64),
    Participants(Vec<ParticipantSpec>),
    Active { name: String, active: bool },
}

impl ConfigOption {
    /// Parse `key=value`. The value is read as JSON when it parses, otherwise
    /// as literal text.
    pub fn parse_assignment(item: &str) -> Result<Self, DomainError> {
        let (key, raw) = item
            .split_once('=')
            .ok_or_else(|| DomainError::MalformedAssignment(item.to_string()))?;
        Self::parse(key.trim(), raw)
    }

    /// Parse a value for a known key.
    pub fn parse(key: &str, raw: &str) -> Result<Self, DomainError> {
        if lookup_key(key).is_none() {
            return Err(DomainError::UnknownConfigKey(key.to_string()));
        }
        let value =
            serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

        if let Some(name) = key.strip_prefix(ACTIVE_PREFIX) {
            if name.is_empty() {
                return Err(DomainError::UnknownConfigKey(key.to_string()));
            }
            let active = as_bool(key, &value)?;
            return Ok(ConfigOption::Active {
                name: name.to_string(),
                active,
            });
        }

        match key {
            "topic" => Ok(ConfigOption::Topic(as_text(&value, raw))),
            "spokesman" => Ok(ConfigOption::Spokesman(as_text(&value, raw))),
            "mode" => as_text(&value, raw)
                .parse::<Mode>()
                .map(ConfigOption::Mode)
                .map_err(|e| DomainError::invalid_value(key, e)),
            "max_rounds" => as_u64(key, &value).map(ConfigOption::MaxRounds),
            "context_bytes" => as_usize(key, &value).map(ConfigOption::ContextBytes),
            "output_max_chars" => as_usize(key, &value).map(ConfigOption::OutputMaxChars),
            "backoff_initial_sec" => as_seconds(key, &value).map(ConfigOption::BackoffInitialSec),
            "backoff_max_sec" => as_seconds(key, &value).map(ConfigOption::BackoffMaxSec),
            "participants" => serde_json::from_value::<Vec<ParticipantSpec>>(value)
                .map(ConfigOption::Participants)
                .map_err(|e| DomainError::invalid_value(key, e.to_string())),
            _ => Err(DomainError::UnknownConfigKey(key.to_string())),
        }
    }

    /// The key this edit targets.
    pub fn key(&self) -> String {
        match self {
            ConfigOption::Topic(_) => "topic".to_string(),
            ConfigOption::Mode(_) => "mode".to_string(),
            ConfigOption::MaxRounds(_) => "max_rounds".to_string(),
            ConfigOption::Spokesman(_) => "spokesman".to_string(),
            ConfigOption::ContextBytes(_) => "context_bytes".to_string(),
            ConfigOption::OutputMaxChars(_) => "output_max_chars".to_string(),
            ConfigOption::BackoffInitialSec(_) => "backoff_initial_sec".to_string(),
            ConfigOption::BackoffMaxSec(_) => "backoff_max_sec".to_string(),
            ConfigOption::Participants(_) => "participants".to_string(),
            ConfigOption::Active { name, .. } => format!("{}{}", ACTIVE_PREFIX, name),
        }
    }

    /// Apply this edit. Validation of the resulting config is left to
    /// [`SwarmConfig::validate`].
    pub fn apply(&self, config: &mut SwarmConfig) -> Result<(), DomainError> {
        match self {
            ConfigOption::Topic(topic) => config.topic = topic.clone(),
            ConfigOption::Mode(mode) => config.mode = *mode,
            ConfigOption::MaxRounds(n) => config.max_rounds = *n,
            ConfigOption::Spokesman(name) => config.spokesman = name.clone(),
            ConfigOption::ContextBytes(n) => config.context_bytes = *n,
            ConfigOption::OutputMaxChars(n) => config.output_max_chars = *n,
            ConfigOption::BackoffInitialSec(s) => config.backoff_initial_sec = *s,
            ConfigOption::BackoffMaxSec(s) => config.backoff_max_sec = *s,
            ConfigOption::Participants(list) => config.participants = list.clone(),
            ConfigOption::Active { name, active } => {
                let participant = config
                    .participants
                    .iter_mut()
                    .find(|p| &p.name == name)
                    .ok_or_else(|| DomainError::UnknownParticipant(name.clone()))?;
                participant.active = *active;
            }
        }
        Ok(())
    }
}

fn as_text(value: &Value, raw: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => raw.to_string(),
    }
}

fn as_u64(key: &str, value: &Value) -> Result<u64, DomainError> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| DomainError::invalid_value(key, "expected a non-negative integer"))
}

fn as_usize(key: &str, value: &Value) -> Result<usize, DomainError> {
    let n = as_u64(key, value)?;
    usize::try_from(n).map_err(|_| DomainError::invalid_value(key, "value is too large"))
}

fn as_seconds(key: &str, value: &Value) -> Result<f64, DomainError> {
    let secs = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| DomainError::invalid_value(key, "expected a number of seconds"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(DomainError::invalid_value(
            key,
            "expected a non-negative number of seconds",
        ));
    }
    Ok(secs)
}

fn as_bool(key: &str, value: &Value) -> Result<bool, DomainError> {
    match value {
        Value::Bool(b) => Ok(*b),
        _ => Err(DomainError::invalid_value(key, "expected true or false")),
    }
}
