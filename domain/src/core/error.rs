//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Everything here is structural: a configuration that cannot be used as-is,
/// or an inline `key=value` edit that does not name a known setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown config key: {0}")]
    UnknownConfigKey(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    #[error("expected KEY=VALUE, got '{0}'")]
    MalformedAssignment(String),

    #[error("duplicate participant name: {0}")]
    DuplicateParticipant(String),

    #[error("participant name cannot be empty")]
    EmptyParticipantName,

    #[error("participant '{0}' has an empty command")]
    EmptyCommand(String),

    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("{field} must be a finite, non-negative number of seconds")]
    InvalidBackoff { field: &'static str },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidConfigValue`].
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::InvalidConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
