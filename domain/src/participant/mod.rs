//! Participants, the external responders taking turns in a discussion.
//!
//! - [`entities::ParticipantSpec`]: one configured responder
//! - [`reply::Reply`]: what an invocation produced, including failures

pub mod entities;
pub mod reply;
