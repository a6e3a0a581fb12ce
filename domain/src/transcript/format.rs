//! Human transcript layout

use crate::config::SwarmConfig;
use serde_json::json;

/// First line of every fresh human transcript.
pub const INIT_BANNER: &str = "=== SWARM DISCUSSION INITIATED ===\n";

/// Width of the `-` line closing each turn-block.
pub const SEPARATOR_WIDTH: usize = 40;

/// Width of the `=` lines around the final summary.
pub const SUMMARY_BANNER_WIDTH: usize = 50;

/// One turn-block: blank line, header, content, separator.
pub fn turn_block(timestamp: &str, name: &str, role: &str, content: &str) -> String {
    format!(
        "\n[{}] {} ({}):\n{}\n{}\n",
        timestamp,
        name,
        role,
        content,
        "-".repeat(SEPARATOR_WIDTH)
    )
}

/// Notice appended whenever the configuration is edited from the command line.
pub fn config_change_notice(timestamp: &str, config: &SwarmConfig) -> String {
    let summary = json!({
        "topic": config.topic,
        "mode": config.mode,
        "max_rounds": config.max_rounds,
    });
    let body = serde_json::to_string_pretty(&summary).unwrap_or_else(|_| summary.to_string());
    format!("\n### CONFIG CHANGE {}\n{}\n", timestamp, body)
}

/// Closing block holding the spokesman's synthesis.
pub fn summary_block(name: &str, content: &str) -> String {
    let banner = "=".repeat(SUMMARY_BANNER_WIDTH);
    format!(
        "\n{}\nFINAL SUMMARY by {}:\n{}\n{}\n",
        banner, name, content, banner
    )
}
