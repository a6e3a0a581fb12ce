//! Prompt domain
//!
//! Templates for the per-turn prompt and the closing synthesis prompt.

mod template;

pub use template::{PromptTemplate, TurnContext};
