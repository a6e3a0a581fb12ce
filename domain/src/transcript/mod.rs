//! Transcript formats
//!
//! A discussion is recorded twice: a human-readable text transcript made of
//! banners and turn-blocks, and a structured JSONL transcript with one
//! [`TurnRecord`] per turn.

mod format;
mod record;

pub use format::{
    INIT_BANNER, SEPARATOR_WIDTH, SUMMARY_BANNER_WIDTH, config_change_notice, summary_block,
    turn_block,
};
pub use record::TurnRecord;
