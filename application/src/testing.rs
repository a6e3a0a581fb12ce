//! In-memory fakes of the ports, shared by the use case tests.

use crate::ports::invoker::ParticipantInvoker;
use crate::ports::store::{StoreError, SwarmStore};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use swarm_domain::{INIT_BANNER, ParticipantSpec, Reply, RunState, SwarmConfig, TurnRecord};

/// Store keeping every artifact in memory.
pub struct MemoryStore {
    pub config: Mutex<SwarmConfig>,
    pub state: Mutex<RunState>,
    pub transcript: Mutex<String>,
    pub records: Mutex<Vec<TurnRecord>>,
    pub summary: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new(config: SwarmConfig) -> Self {
        Self {
            config: Mutex::new(config),
            state: Mutex::new(RunState::default()),
            transcript: Mutex::new(INIT_BANNER.to_string()),
            records: Mutex::new(Vec::new()),
            summary: Mutex::new(None),
        }
    }

    pub fn state(&self) -> RunState {
        self.state.lock().unwrap().clone()
    }

    pub fn transcript(&self) -> String {
        self.transcript.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<TurnRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Simulate another process or a human writing to the transcript.
    pub fn touch(&self, note: &str) {
        self.transcript.lock().unwrap().push_str(note);
    }

    pub fn turn_blocks(&self) -> usize {
        self.transcript().matches(&"-".repeat(40)).count()
    }
}

impl SwarmStore for MemoryStore {
    fn load_config(&self) -> Result<SwarmConfig, StoreError> {
        Ok(self.config.lock().unwrap().clone())
    }

    fn save_config(&self, config: &SwarmConfig) -> Result<(), StoreError> {
        *self.config.lock().unwrap() = config.clone();
        Ok(())
    }

    fn load_state(&self) -> Result<RunState, StoreError> {
        Ok(self.state())
    }

    fn save_state(&self, state: &RunState) -> Result<(), StoreError> {
        *self.state.lock().unwrap() = state.clone();
        Ok(())
    }

    fn append_transcript(&self, text: &str) -> Result<(), StoreError> {
        self.transcript.lock().unwrap().push_str(text);
        Ok(())
    }

    fn append_record(&self, record: &TurnRecord) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn transcript_tail(&self, limit: usize) -> Result<String, StoreError> {
        let transcript = self.transcript();
        let mut start = transcript.len().saturating_sub(limit);
        while !transcript.is_char_boundary(start) {
            start += 1;
        }
        Ok(transcript[start..].to_string())
    }

    fn transcript_hash(&self) -> Result<String, StoreError> {
        let transcript = self.transcript();
        Ok(format!("{}:{}", transcript.len(), transcript))
    }

    fn write_summary(&self, content: &str) -> Result<(), StoreError> {
        *self.summary.lock().unwrap() = Some(content.to_string());
        Ok(())
    }

    fn reset_transcripts(&self) -> Result<(), StoreError> {
        *self.transcript.lock().unwrap() = INIT_BANNER.to_string();
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

/// Invoker replaying scripted replies per participant.
///
/// Participants without a script answer `"<name> says hi"`. Every call is
/// logged with the prompt it received.
#[derive(Default)]
pub struct ScriptedInvoker {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    failing: Mutex<Vec<String>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, name: &str, replies: impl IntoIterator<Item = Reply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(name.to_string(), replies.into_iter().collect());
        self
    }

    /// Make `name` fail on every call.
    pub fn always_fail(self, name: &str) -> Self {
        self.failing.lock().unwrap().push(name.to_string());
        self
    }

    pub fn calls_for(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == name)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|(_, p)| p.clone())
    }
}

#[async_trait]
impl ParticipantInvoker for ScriptedInvoker {
    async fn respond(&self, participant: &ParticipantSpec, prompt: &str) -> Reply {
        self.calls
            .lock()
            .unwrap()
            .push((participant.name.clone(), prompt.to_string()));
        if self.failing.lock().unwrap().contains(&participant.name) {
            return Reply::failed(
                swarm_domain::FailureKind::Spawn,
                "No such file or directory (os error 2)",
            );
        }
        self.scripts
            .lock()
            .unwrap()
            .get_mut(&participant.name)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Reply::content(format!("{} says hi", participant.name)))
    }
}

/// Participants A, B, C running harmless commands.
pub fn people(names: &[&str]) -> Vec<ParticipantSpec> {
    names
        .iter()
        .map(|n| ParticipantSpec::new(*n, ["true"], format!("role-{}", n)))
        .collect()
}

/// Config with zero backoff so retry tests do not sleep.
pub fn quick_config(names: &[&str]) -> SwarmConfig {
    SwarmConfig::with_participants(people(names))
        .with_backoff(0.0, 0.0)
        .with_max_rounds(100)
}
