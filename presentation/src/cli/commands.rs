//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;
use swarm_domain::{ConfigOption, Mode};

/// CLI arguments for swarm
#[derive(Parser, Debug)]
#[command(name = "swarm")]
#[command(author, version, about = "Swarm - Several responders discuss a topic turn by turn")]
#[command(long_about = r#"
Swarm runs a turn-based discussion between external responder programs.
Each round one participant is chosen, receives the recent transcript on stdin
and its answer is appended to the shared transcript files.

Several swarm processes may work on the same files at once. The shared
discussion configuration lives in swarm_config.json; engine settings are
loaded from (in priority order):
1. SWARM_* environment variables
2. --settings <path>   Explicit settings file
3. ./swarm.toml        Project-level settings
4. ~/.config/swarm/settings.toml   Global settings

Example:
  swarm --reset --topic "Is a hot dog a sandwich?" --mode debate
  swarm --once
  swarm --watch
  swarm --set max_rounds=20 --set active.Local_LLM=false
  swarm --config
"#)]
pub struct Cli {
    /// Keep running rounds until interrupted
    #[arg(long, conflicts_with = "once")]
    pub watch: bool,

    /// Run exactly one round
    #[arg(long)]
    pub once: bool,

    /// Start the discussion over (transcripts and run state)
    #[arg(long)]
    pub reset: bool,

    /// Set the discussion topic
    #[arg(long, value_name = "TEXT")]
    pub topic: Option<String>,

    /// Set the speaker selection mode (discussion, debate, brainstorm, consensus)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// Set maximum rounds before summary
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<u64>,

    /// Print the effective discussion configuration
    #[arg(long)]
    pub config: bool,

    /// Edit one configuration key (can be specified multiple times)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = ConfigOption::parse_assignment)]
    pub set: Vec<ConfigOption>,

    /// Path to engine settings file
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Configuration edits requested on the command line, in apply order.
    pub fn config_options(&self) -> Vec<ConfigOption> {
        let mut options = Vec::new();
        if let Some(topic) = &self.topic {
            options.push(ConfigOption::Topic(topic.clone()));
        }
        if let Some(mode) = self.mode {
            options.push(ConfigOption::Mode(mode));
        }
        if let Some(max_rounds) = self.max_rounds {
            options.push(ConfigOption::MaxRounds(max_rounds));
        }
        options.extend(self.set.iter().cloned());
        options
    }
}
