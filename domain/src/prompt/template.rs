//! Prompt templates for discussion turns

use crate::config::Mode;
use crate::participant::entities::ParticipantSpec;

/// Everything a participant needs to know to take its turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub participant: &'a ParticipantSpec,
    pub topic: &'a str,
    pub mode: Mode,
    pub round: u64,
    /// Tail of the human transcript
    pub recent: &'a str,
}

/// Templates for generating prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for one turn of the discussion
    pub fn turn_prompt(ctx: &TurnContext<'_>) -> String {
        format!(
            r#"You are {name}, {role} in a swarm intelligence discussion.

System guidance: {system}

Current topic: {topic}
Discussion mode: {mode}
Round: {round}

Recent discussion (tail):
{recent}

Please provide your perspective. Be concise but insightful.
Build on what others have said.
If summarizing, provide a clear synthesis of key points.
"#,
            name = ctx.participant.name,
            role = ctx.participant.role,
            system = ctx.participant.system,
            topic = ctx.topic,
            mode = ctx.mode,
            round = ctx.round,
            recent = ctx.recent,
        )
    }

    /// Prompt asking the spokesman for the closing synthesis
    pub fn summary_prompt(mode: Mode, topic: &str) -> String {
        format!(
            "As the spokesman, summarize the key insights from this {} about: {}. \
             Provide a clear synthesis and next-steps.",
            mode, topic
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_prompt_contains_context() {
        let participant =
            ParticipantSpec::new("Local_LLM", ["ollama"], "The Fast One").with_system("Be terse.");
        let prompt = PromptTemplate::turn_prompt(&TurnContext {
            participant: &participant,
            topic: "What is consciousness?",
            mode: Mode::Debate,
            round: 4,
            recent: "[ts] B (Skeptic):\nNo.",
        });
        assert!(prompt.starts_with("You are Local_LLM, The Fast One"));
        assert!(prompt.contains("System guidance: Be terse."));
        assert!(prompt.contains("Current topic: What is consciousness?"));
        assert!(prompt.contains("Discussion mode: debate"));
        assert!(prompt.contains("Round: 4"));
        assert!(prompt.contains("B (Skeptic):\nNo."));
    }

    #[test]
    fn test_summary_prompt() {
        let prompt = PromptTemplate::summary_prompt(Mode::Consensus, "Rust vs Go");
        assert!(prompt.contains("this consensus about: Rust vs Go"));
        assert!(prompt.contains("next-steps"));
    }
}
