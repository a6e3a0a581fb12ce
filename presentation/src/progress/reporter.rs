//! Progress reporting for discussion rounds

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use swarm_application::RoundProgress;
use swarm_domain::{IdleReason, ParticipantSpec, Reply};

/// Reports progress with a spinner while a participant is thinking
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundProgress for ProgressReporter {
    fn on_turn_start(&self, speaker: &ParticipantSpec, round: u64) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Round {}", round));
        pb.set_message(format!("{} ({}) is thinking...", speaker.name, speaker.role));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock()
            && let Some(previous) = guard.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_attempt_failed(
        &self,
        speaker: &str,
        attempt: u32,
        _reply: &Reply,
        retry_in: Option<Duration>,
    ) {
        self.with_spinner(|pb| {
            let msg = match retry_in {
                Some(delay) => format!(
                    "{} {} attempt {} failed, retrying in {:.1}s",
                    "x".red(),
                    speaker,
                    attempt,
                    delay.as_secs_f64()
                ),
                None => format!("{} {} gave up after {} attempts", "x".red(), speaker, attempt),
            };
            pb.set_message(msg);
        });
    }

    fn on_turn_recorded(&self, speaker: &str, round: u64, failed: bool) {
        if let Some(pb) = self.take_spinner() {
            let status = if failed {
                format!("{} {} (error recorded, cooling down)", "x".red(), speaker)
            } else {
                format!("{} {}", "v".green(), speaker)
            };
            pb.set_prefix(format!("Round {}", round));
            pb.finish_with_message(status);
        }
    }

    fn on_idle(&self, reason: IdleReason) {
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
        }
        eprintln!("{} {}", "-".dimmed(), reason.as_str().dimmed());
    }

    fn on_summary(&self, spokesman: &str) {
        eprintln!("{} Summary written by {}", "*".cyan(), spokesman.bold());
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RoundProgress for SimpleProgress {
    fn on_turn_start(&self, speaker: &ParticipantSpec, round: u64) {
        eprintln!(
            "{} Round {}: {} ({})",
            "->".cyan(),
            round,
            speaker.name.bold(),
            speaker.role
        );
    }

    fn on_attempt_failed(
        &self,
        speaker: &str,
        attempt: u32,
        reply: &Reply,
        retry_in: Option<Duration>,
    ) {
        let next = match retry_in {
            Some(delay) => format!("retrying in {:.1}s", delay.as_secs_f64()),
            None => "giving up".to_string(),
        };
        eprintln!(
            "  {} {} attempt {}: {} ({})",
            "x".red(),
            speaker,
            attempt,
            reply,
            next
        );
    }

    fn on_turn_recorded(&self, speaker: &str, _round: u64, failed: bool) {
        if failed {
            eprintln!("  {} {} (failed)", "x".red(), speaker);
        } else {
            eprintln!("  {} {}", "v".green(), speaker);
        }
    }

    fn on_idle(&self, reason: IdleReason) {
        eprintln!("{} {}", "-".dimmed(), reason.as_str());
    }

    fn on_summary(&self, spokesman: &str) {
        eprintln!("{} Summary written by {}", "*".cyan(), spokesman.bold());
    }
}
