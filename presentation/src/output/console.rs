//! Console output formatter for swarm

use colored::Colorize;
use std::path::Path;
use swarm_application::WatchReport;
use swarm_domain::{RoundOutcome, RunState, SwarmConfig, known_keys};

/// Formats engine results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Pretty JSON of the configuration, followed by an edit hint.
    pub fn format_config(config: &SwarmConfig, config_path: &Path) -> String {
        let json = serde_json::to_string_pretty(config).unwrap_or_else(|_| "{}".to_string());
        let mut output = format!(
            "{}\n\n{} {} to configure, or use --set KEY=VALUE:\n",
            json,
            "Edit".dimmed(),
            config_path.display()
        );
        for info in known_keys() {
            output.push_str(&format!(
                "  {:<22} {}\n",
                info.key.cyan(),
                info.description.dimmed()
            ));
        }
        output
    }

    /// Banner printed when a watch session starts
    pub fn watch_header(transcript: &Path, state: &RunState, config: &SwarmConfig) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Swarm Watch"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Watching:".cyan().bold(),
            transcript.display()
        ));
        output.push_str(&format!(
            "{} {}/{}\n",
            "Round:".cyan().bold(),
            state.round,
            config.max_rounds
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Mode:".cyan().bold(),
            config.mode.description()
        ));
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), config.topic));
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            Self::participant_summary(config, state)
        ));
        output.push_str(&format!("\n{}\n", "Ctrl+C to stop".dimmed()));
        output
    }

    /// One line per round step
    pub fn format_outcome(outcome: &RoundOutcome) -> String {
        match outcome {
            RoundOutcome::Progressed { speaker, round } => {
                format!("{} {} spoke (round {})", "v".green(), speaker.bold(), round)
            }
            RoundOutcome::Finished {
                speaker,
                round,
                spokesman,
            } => {
                let summary = match spokesman {
                    Some(name) => format!("summary by {}", name.bold()),
                    None => "no spokesman available".yellow().to_string(),
                };
                format!(
                    "{} {} spoke (round {}), discussion complete: {}",
                    "v".green(),
                    speaker.bold(),
                    round,
                    summary
                )
            }
            RoundOutcome::Idle(reason) => format!("{} {}", "-".dimmed(), reason.as_str().dimmed()),
        }
    }

    pub fn format_watch_report(report: &WatchReport) -> String {
        format!(
            "\n{} ({} rounds, {} idle polls)\n",
            "Swarm discussion paused".yellow().bold(),
            report.rounds,
            report.idle_polls
        )
    }

    pub fn format_reset(state: &RunState) -> String {
        format!("{} Discussion reset at {}", "v".green(), state.started)
    }

    /// `A, B (inactive), C (cooling 2)`
    fn participant_summary(config: &SwarmConfig, state: &RunState) -> String {
        config
            .participants
            .iter()
            .map(|p| {
                let cooldown = state.cooldown_of(&p.name);
                if !p.active {
                    format!("{} {}", p.name, "(inactive)".dimmed())
                } else if cooldown > 0 {
                    format!("{} {}", p.name, format!("(cooling {})", cooldown).yellow())
                } else {
                    p.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}
