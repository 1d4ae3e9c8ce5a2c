//! `Dayplan` — submits a day's tasks to a [`ScheduleManager`] and prints
//! what the subscribers hear.
//!
//! ```bash
//! # Sample day with the UserA and Logger subscribers
//! cargo run --bin dayplan
//!
//! # Custom tasks and subscribers
//! cargo run --bin dayplan -- --subscriber alice \
//!     --task "Standup@09:00-09:15" --task "Review@09:10-10:00"
//!
//! # Verbose logs to a file
//! DAYPLAN_LOG=debug cargo run --bin dayplan -- --log-file /tmp/dayplan.log
//! ```

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use dayplan::config::{AppConfig, CliArgs};
use dayplan::observer::{ConsoleSubscriber, TracingSubscriber};
use dayplan::schedule::ScheduleManager;

fn main() {
    let cli = CliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let _log_guard = init_logging(&config.log_level, config.log_file.as_deref());

    tracing::info!(
        tasks = config.tasks.len(),
        subscribers = config.subscribers.len(),
        "dayplan starting"
    );

    let mut manager = ScheduleManager::new();

    // The manager only holds weak references; keep the subscribers alive here.
    let consoles: Vec<Arc<ConsoleSubscriber>> = config
        .subscribers
        .iter()
        .map(|id| Arc::new(ConsoleSubscriber::new(id.as_str())))
        .collect();
    for console in &consoles {
        manager.register(console);
    }
    let tracer = config
        .trace_events
        .then(|| Arc::new(TracingSubscriber::new("events")));
    if let Some(tracer) = &tracer {
        manager.register(tracer);
    }

    let mut rejected = 0usize;
    for task in config.tasks {
        if !manager.add_task(task) {
            rejected += 1;
        }
    }

    println!("Current tasks:");
    for task in manager.list_tasks() {
        println!("  {task}");
    }

    tracing::info!(admitted = manager.len(), rejected, "dayplan finished");
}

/// Initializes tracing to stderr, or to a file when `file_path` is set.
///
/// Stdout is left to the console subscribers. A path without a usable file
/// name falls back to stderr.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let Some((log_dir, file_name)) = file_path.and_then(split_log_path) else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();
        if let Some(path) = file_path {
            tracing::warn!(path = %path.display(), "unusable log file path, logging to stderr");
        }
        return None;
    };

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Splits a log path into the directory and UTF-8 file name the appender needs.
///
/// A bare file name resolves against the current directory.
fn split_log_path(path: &Path) -> Option<(&Path, &str)> {
    let file_name = path.file_name()?.to_str()?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Some((dir, file_name))
}
