//! Reply value object: the never-failing result of invoking a participant.
//!
//! The invoker port returns a [`Reply`] instead of a `Result`: a failed
//! invocation is still content that gets recorded in the transcript, so the
//! round engine treats every outcome uniformly. Failures render as
//! `(error: <Kind>: <message>)`.

use std::fmt;

/// Prefix shared by every rendered failure.
pub const ERROR_TAG: &str = "(error:";

/// Why an invocation produced no usable content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A required environment variable was missing or empty
    MissingEnv,
    /// The process could not be started
    Spawn,
    /// Writing the prompt or reading the output failed
    Io,
    /// The process did not finish within its timeout
    Timeout,
    /// The process exited with a nonzero status
    NonZeroExit,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::MissingEnv => "MissingEnv",
            FailureKind::Spawn => "Spawn",
            FailureKind::Io => "Io",
            FailureKind::Timeout => "Timeout",
            FailureKind::NonZeroExit => "NonZeroExit",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Content(String),
    Failed { kind: FailureKind, message: String },
}

impl Reply {
    pub fn content(text: impl Into<String>) -> Self {
        Reply::Content(text.into())
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Reply::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Reply::Failed { .. })
    }

    /// Text as it is recorded in the transcript.
    pub fn render(&self) -> String {
        match self {
            Reply::Content(text) => text.clone(),
            Reply::Failed { kind, message } => format!("{} {}: {})", ERROR_TAG, kind, message),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Whether recorded text is an error-tagged failure.
pub fn is_error_tagged(text: &str) -> bool {
    text.starts_with(ERROR_TAG)
}
