//! Structured transcript record

use crate::config::Mode;
use serde::{Deserialize, Serialize};

/// One self-describing line of the structured transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub timestamp: String,
    pub name: String,
    pub role: String,
    /// Round number at the time the turn was taken (before increment)
    pub round: u64,
    pub mode: Mode,
    pub topic: String,
    pub content: String,
}

impl TurnRecord {
    /// Serialize as a single JSONL line (with trailing newline).
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
