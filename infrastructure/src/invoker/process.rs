//! Process-backed participant invoker
//!
//! Each turn spawns the participant's argument vector directly (no shell),
//! feeds the prompt on stdin and reads the answer from stdout. Every failure
//! comes back as a [`Reply::Failed`]; this invoker never returns an error.

use async_trait::async_trait;
use std::io;
use std::process::{Output, Stdio};
use std::time::Duration;
use swarm_application::ports::invoker::ParticipantInvoker;
use swarm_domain::{FailureKind, PARTICIPANT_TRUNCATION_MARKER, ParticipantSpec, Reply, clamp_chars};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

const NO_OUTPUT: &str = "(no output)";

/// Runs participants as child processes.
#[derive(Debug, Default, Clone)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ParticipantInvoker for ProcessInvoker {
    async fn respond(&self, participant: &ParticipantSpec, prompt: &str) -> Reply {
        let reply = run(participant, prompt).await;
        clamp_reply(reply, participant.max_chars)
    }
}

async fn run(participant: &ParticipantSpec, prompt: &str) -> Reply {
    let missing = missing_env(participant);
    if !missing.is_empty() {
        return Reply::failed(
            FailureKind::MissingEnv,
            format!("missing environment: {}", missing.join(", ")),
        );
    }

    let Some((program, args)) = participant.argv.split_first() else {
        return Reply::failed(FailureKind::Spawn, "empty command");
    };

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Linux: request kernel to send SIGTERM to child when the engine dies.
    #[cfg(target_os = "linux")]
    unsafe {
        cmd.pre_exec(|| {
            libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
            Ok(())
        });
    }

    debug!("Spawning {} for {}", program, participant.name);
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return Reply::failed(FailureKind::Spawn, format!("{}: {}", program, e)),
    };

    let stdin = child.stdin.take();
    let feed = async move {
        if let Some(mut stdin) = stdin {
            stdin.write_all(prompt.as_bytes()).await?;
            stdin.shutdown().await?;
        }
        Ok::<(), io::Error>(())
    };

    let limit = Duration::from_secs(participant.timeout_sec);
    // Dropping the child on timeout kills it.
    let exchange = async { tokio::join!(feed, child.wait_with_output()) };
    match tokio::time::timeout(limit, exchange).await {
        Err(_) => Reply::failed(
            FailureKind::Timeout,
            format!("timed out after {}s", participant.timeout_sec),
        ),
        Ok((_, Err(e))) => Reply::failed(FailureKind::Io, e.to_string()),
        // A child that exits without reading its stdin is not an error.
        Ok((Err(e), _)) if e.kind() != io::ErrorKind::BrokenPipe => {
            Reply::failed(FailureKind::Io, format!("writing prompt: {}", e))
        }
        Ok((_, Ok(output))) => interpret(output),
    }
}

/// Names of required variables that are unset or empty.
fn missing_env(participant: &ParticipantSpec) -> Vec<&str> {
    participant
        .env
        .iter()
        .filter(|name| std::env::var_os(name).is_none_or(|value| value.is_empty()))
        .map(String::as_str)
        .collect()
}

fn interpret(output: Output) -> Reply {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = [stdout.trim(), stderr.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(NO_OUTPUT);

    if output.status.success() {
        Reply::content(text)
    } else {
        Reply::failed(
            FailureKind::NonZeroExit,
            format!("{}: {}", output.status, text),
        )
    }
}

fn clamp_reply(reply: Reply, max_chars: usize) -> Reply {
    match reply {
        Reply::Content(text) => Reply::Content(clamp_chars(
            &text,
            max_chars,
            PARTICIPANT_TRUNCATION_MARKER,
        )),
        Reply::Failed { kind, message } => Reply::Failed {
            kind,
            message: clamp_chars(&message, max_chars, PARTICIPANT_TRUNCATION_MARKER),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(name: &str, script: &str) -> ParticipantSpec {
        ParticipantSpec::new(name, ["sh", "-c", script], "shell")
    }

    fn failure_kind(reply: &Reply) -> Option<FailureKind> {
        match reply {
            Reply::Failed { kind, .. } => Some(*kind),
            Reply::Content(_) => None,
        }
    }

    #[tokio::test]
    async fn test_cat_echoes_prompt() {
        let cat = ParticipantSpec::new("Echo", ["cat"], "Parrot");
        let reply = ProcessInvoker::new().respond(&cat, "  hello swarm \n").await;
        assert_eq!(reply, Reply::content("hello swarm"));
    }

    #[tokio::test]
    async fn test_stderr_used_when_stdout_empty() {
        let reply = ProcessInvoker::new()
            .respond(&sh("S", "echo from-stderr >&2"), "")
            .await;
        assert_eq!(reply, Reply::content("from-stderr"));
    }

    #[tokio::test]
    async fn test_no_output_placeholder() {
        let quiet = ParticipantSpec::new("Q", ["true"], "Silent");
        let reply = ProcessInvoker::new().respond(&quiet, "ignored").await;
        assert_eq!(reply, Reply::content(NO_OUTPUT));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let reply = ProcessInvoker::new()
            .respond(&sh("S", "echo broken >&2; exit 3"), "")
            .await;
        assert_eq!(failure_kind(&reply), Some(FailureKind::NonZeroExit));
        let rendered = reply.render();
        assert!(rendered.starts_with("(error:"));
        assert!(rendered.contains("broken"));
        assert!(rendered.contains('3'));
    }

    #[tokio::test]
    async fn test_missing_executable_is_spawn_failure() {
        let ghost = ParticipantSpec::new("Ghost", ["/nonexistent/swarm-ghost-binary"], "None");
        let reply = ProcessInvoker::new().respond(&ghost, "hi").await;
        assert_eq!(failure_kind(&reply), Some(FailureKind::Spawn));
    }

    #[tokio::test]
    async fn test_missing_env_fails_before_spawn() {
        let picky = ParticipantSpec::new("Picky", ["/nonexistent/never-spawned"], "Needs keys")
            .with_required_env("SWARM_TEST_VARIABLE_THAT_IS_NEVER_SET");
        let reply = ProcessInvoker::new().respond(&picky, "hi").await;
        assert_eq!(failure_kind(&reply), Some(FailureKind::MissingEnv));
        assert!(
            reply
                .render()
                .contains("SWARM_TEST_VARIABLE_THAT_IS_NEVER_SET")
        );
    }

    #[tokio::test]
    async fn test_present_env_passes_check() {
        let spec = sh("S", "echo ok").with_required_env("PATH");
        let reply = ProcessInvoker::new().respond(&spec, "").await;
        assert_eq!(reply, Reply::content("ok"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let slow = ParticipantSpec::new("Slow", ["sleep", "5"], "Sleeper").with_timeout_sec(1);
        let reply = ProcessInvoker::new().respond(&slow, "").await;
        assert_eq!(failure_kind(&reply), Some(FailureKind::Timeout));
    }

    #[tokio::test]
    async fn test_child_ignoring_stdin() {
        let prompt = "x".repeat(1 << 20);
        let reply = ProcessInvoker::new()
            .respond(&sh("S", "echo done"), &prompt)
            .await;
        assert_eq!(reply, Reply::content("done"));
    }

    #[tokio::test]
    async fn test_output_clamped_to_max_chars() {
        let chatty = sh("S", "printf 'abcdefghijklmnop'").with_max_chars(5);
        let reply = ProcessInvoker::new().respond(&chatty, "").await;
        assert_eq!(
            reply,
            Reply::content(format!("abcde{}", PARTICIPANT_TRUNCATION_MARKER))
        );
    }

    #[test]
    fn test_failure_message_clamped() {
        let reply = clamp_reply(Reply::failed(FailureKind::Io, "0123456789"), 4);
        assert_eq!(
            reply,
            Reply::failed(
                FailureKind::Io,
                format!("0123{}", PARTICIPANT_TRUNCATION_MARKER)
            )
        );
    }

    mod with_engine {
        use super::*;
        use crate::persistence::{FileSwarmStore, SwarmPaths, append_text};
        use std::sync::Arc;
        use std::sync::atomic::{AtomicU32, Ordering};
        use swarm_application::{RunRoundUseCase, SwarmStore};
        use swarm_domain::{RoundOutcome, SwarmConfig, TurnRecord, is_error_tagged};

        /// Counts invocations on top of the real invoker.
        #[derive(Default)]
        struct Counting {
            inner: ProcessInvoker,
            calls: AtomicU32,
        }

        #[async_trait]
        impl ParticipantInvoker for Counting {
            async fn respond(&self, participant: &ParticipantSpec, prompt: &str) -> Reply {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.inner.respond(participant, prompt).await
            }
        }

        fn records(store: &FileSwarmStore) -> Vec<TurnRecord> {
            std::fs::read_to_string(&store.paths().structured)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }

        #[tokio::test]
        async fn test_rounds_with_real_processes() {
            let dir = tempfile::tempdir().unwrap();
            let store = Arc::new(FileSwarmStore::open(SwarmPaths::in_dir(dir.path())).unwrap());
            let config = SwarmConfig::with_participants(vec![
                ParticipantSpec::new("Echo", ["cat"], "Parrot").with_max_chars(100),
                sh("Shout", "tr a-z A-Z | tail -c 20"),
            ])
            .with_backoff(0.0, 0.0);
            store.save_config(&config).unwrap();

            let engine = RunRoundUseCase::new(Arc::clone(&store), Arc::new(ProcessInvoker::new()));
            for i in 0..3 {
                append_text(&store.paths().transcript, &format!("\n(note {i})\n")).unwrap();
                assert!(engine.execute().await.unwrap().made_progress());
            }

            let records = records(&store);
            let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["Echo", "Shout", "Echo"]);
            assert!(records[0].content.starts_with("You are Echo, Parrot"));
            assert!(records[0].content.ends_with(PARTICIPANT_TRUNCATION_MARKER));
            assert_eq!(store.load_state().unwrap().round, 3);

            let transcript = std::fs::read_to_string(&store.paths().transcript).unwrap();
            assert_eq!(transcript.matches(&"-".repeat(40)).count(), 3);
        }

        #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
        async fn test_twenty_concurrent_rounds_share_one_transcript() {
            let dir = tempfile::tempdir().unwrap();
            let paths = SwarmPaths::in_dir(dir.path());
            let setup = FileSwarmStore::open(paths.clone()).unwrap();
            let config = SwarmConfig::with_participants(vec![
                ParticipantSpec::new("Echo", ["sh", "-c", "cat >/dev/null; echo said"], "Parrot"),
            ])
            .with_max_rounds(100)
            .with_backoff(0.0, 0.0);
            setup.save_config(&config).unwrap();

            // One store per task, like separate engine processes on the same files
            let mut handles = Vec::new();
            for i in 0..20 {
                let paths = paths.clone();
                handles.push(tokio::spawn(async move {
                    let store = Arc::new(FileSwarmStore::open(paths).unwrap());
                    append_text(&store.paths().transcript, &format!("\n(note {i})\n")).unwrap();
                    let engine = RunRoundUseCase::new(store, Arc::new(ProcessInvoker::new()));
                    engine.execute().await.unwrap()
                }));
            }
            let mut progressed = 0;
            for handle in handles {
                if handle.await.unwrap().made_progress() {
                    progressed += 1;
                }
            }
            assert!(progressed >= 1);

            let records = records(&setup);
            assert_eq!(records.len(), progressed);
            assert!(records.iter().all(|r| r.name == "Echo" && r.content == "said"));

            let transcript = std::fs::read_to_string(&paths.transcript).unwrap();
            assert_eq!(transcript.matches("] Echo (Parrot):\nsaid\n").count(), progressed);
            assert_eq!(transcript.matches(&"-".repeat(40)).count(), progressed);
            for i in 0..20 {
                assert!(transcript.contains(&format!("\n(note {i})\n")));
            }
        }

        #[tokio::test]
        async fn test_nonexistent_executable_is_retried_then_cooled_down() {
            let dir = tempfile::tempdir().unwrap();
            let store = Arc::new(FileSwarmStore::open(SwarmPaths::in_dir(dir.path())).unwrap());
            let config = SwarmConfig::with_participants(vec![
                ParticipantSpec::new("Ghost", ["/nonexistent/swarm-ghost-binary"], "None")
                    .with_cooldown_after_error(2),
                ParticipantSpec::new("Echo", ["sh", "-c", "echo present"], "Witness"),
            ])
            .with_backoff(0.0, 0.0);
            store.save_config(&config).unwrap();

            let invoker = Arc::new(Counting::default());
            let engine = RunRoundUseCase::new(Arc::clone(&store), Arc::clone(&invoker));

            let first = engine.execute().await.unwrap();
            assert_eq!(
                first,
                RoundOutcome::Progressed {
                    speaker: "Ghost".to_string(),
                    round: 1
                }
            );
            assert_eq!(invoker.calls.load(Ordering::SeqCst), 3);
            assert!(is_error_tagged(&records(&store)[0].content));
            assert_eq!(store.load_state().unwrap().cooldown_of("Ghost"), 2);

            let mut speakers = Vec::new();
            for i in 0..3 {
                append_text(&store.paths().transcript, &format!("\n(note {i})\n")).unwrap();
                if let RoundOutcome::Progressed { speaker, .. } = engine.execute().await.unwrap() {
                    speakers.push(speaker);
                }
            }
            assert_eq!(speakers, vec!["Echo", "Echo", "Ghost"]);
        }
    }
}
