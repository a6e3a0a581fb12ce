//! CLI entrypoint for swarm
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use swarm_application::{
    ConfigureSwarmUseCase, NoProgress, ResetDiscussionUseCase, RoundProgress, RunRoundUseCase,
    SwarmStore, WatchLoop,
};
use swarm_infrastructure::{FileSwarmStore, ProcessInvoker, SettingsLoader};
use swarm_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings =
        SettingsLoader::load(cli.settings.as_deref()).context("Failed to load engine settings")?;
    let _log_guard = init_tracing(cli.verbose, &settings.files.log)?;

    info!("Starting swarm");

    // === Dependency Injection ===
    let store = Arc::new(
        FileSwarmStore::open(settings.files.paths()).context("Failed to open discussion files")?,
    );

    let configure = ConfigureSwarmUseCase::new(Arc::clone(&store));
    if cli.config {
        let config = configure.current()?;
        print!(
            "{}",
            ConsoleFormatter::format_config(&config, &settings.files.config)
        );
        return Ok(());
    }

    let options = cli.config_options();
    if !options.is_empty() {
        configure.apply(&options).context("Failed to update configuration")?;
    }

    if cli.reset {
        let state = ResetDiscussionUseCase::new(Arc::clone(&store)).execute()?;
        if !cli.quiet {
            println!("{}", ConsoleFormatter::format_reset(&state));
        }
        return Ok(());
    }

    let invoker = Arc::new(ProcessInvoker::new());
    // Spinners only make sense on a terminal; redirected stderr gets plain lines
    let progress: Box<dyn RoundProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    if cli.watch {
        let params = settings.watch.to_params()?;
        if !cli.quiet {
            let config = store.load_config()?;
            let state = store.load_state()?;
            println!(
                "{}",
                ConsoleFormatter::watch_header(&settings.files.transcript, &state, &config)
            );
        }

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });

        let report = WatchLoop::new(store, invoker, params)
            .run(cancel, progress.as_ref())
            .await?;
        if !cli.quiet {
            println!("{}", ConsoleFormatter::format_watch_report(&report));
        }
        return Ok(());
    }

    // --once, and the default without an action flag
    let outcome = RunRoundUseCase::new(store, invoker)
        .execute_with_progress(progress.as_ref())
        .await?;
    if !cli.quiet {
        println!("{}", ConsoleFormatter::format_outcome(&outcome));
    }

    Ok(())
}

/// Console logging by verbosity plus the operations log file.
///
/// `RUST_LOG` overrides the console level when set. The returned guard must
/// live until exit so buffered log lines reach the file.
fn init_tracing(verbose: u8, log_path: &Path) -> Result<WorkerGuard> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));
    let file_filter = EnvFilter::new(level_for(verbose.max(1)));

    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", log_path.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(file_filter),
        )
        .init();

    Ok(guard)
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}
