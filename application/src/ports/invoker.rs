//! Participant invoker port
//!
//! Defines how the round engine obtains a participant's contribution.

use async_trait::async_trait;
use swarm_domain::{ParticipantSpec, Reply};

/// Invokes one participant with a prompt.
///
/// Never fails: environment, spawn, timeout and exit failures come back as
/// [`Reply::Failed`] and are recorded like any other content. Implementations
/// clamp the reply to the participant's `max_chars`.
#[async_trait]
pub trait ParticipantInvoker: Send + Sync {
    async fn respond(&self, participant: &ParticipantSpec, prompt: &str) -> Reply;
}
