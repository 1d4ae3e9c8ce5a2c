//! Configuration for the `dayplan` driver.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/dayplan/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::str::FromStr;

use dayplan_proto::{MinuteOfDay, Task, TaskError};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A configured task is not a valid task.
    #[error("invalid task: {0}")]
    InvalidTask(#[from] TaskError),

    /// A `--task` argument did not match `NAME@HH:MM-HH:MM`.
    #[error("expected NAME@HH:MM-HH:MM, got {0:?}")]
    TaskSyntax(String),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    logging: LoggingFileConfig,
    schedule: ScheduleFileConfig,
    tasks: Vec<TaskSpec>,
}

/// `[logging]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LoggingFileConfig {
    level: Option<String>,
    file: Option<PathBuf>,
}

/// `[schedule]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ScheduleFileConfig {
    subscribers: Option<Vec<String>>,
    trace_events: Option<bool>,
}

/// One task as written in `[[tasks]]` or on the command line.
///
/// Times are checked when parsed; the interval itself is checked when the
/// spec becomes a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct TaskSpec {
    /// Task name.
    pub name: String,
    /// Start time (`HH:MM`).
    pub start: MinuteOfDay,
    /// End time (`HH:MM`).
    pub end: MinuteOfDay,
}

impl TaskSpec {
    /// Validates the spec into a [`Task`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] if the name is empty or `start >= end`.
    pub fn to_task(&self) -> Result<Task, TaskError> {
        Task::from_minutes(self.name.clone(), self.start, self.end)
    }
}

impl FromStr for TaskSpec {
    type Err = ConfigError;

    /// Parses `NAME@HH:MM-HH:MM`. The name may itself contain `@`; the last
    /// one separates it from the time range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, range) = s
            .rsplit_once('@')
            .ok_or_else(|| ConfigError::TaskSyntax(s.to_string()))?;
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| ConfigError::TaskSyntax(s.to_string()))?;
        Ok(Self {
            name: name.trim().to_string(),
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved driver configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Console subscriber ids, in registration order.
    pub subscribers: Vec<String>,
    /// Also forward notifications into the log.
    pub trace_events: bool,
    /// Tasks to submit, in submission order.
    pub tasks: Vec<Task>,
    /// Log level filter string.
    pub log_level: String,
    /// Log file; `None` logs to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subscribers: vec!["UserA".to_string(), "Logger".to_string()],
            trace_events: false,
            tasks: Vec::new(),
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed, or if any configured task is invalid.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Resolve an `AppConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. A non-empty task or subscriber list
    /// on the command line replaces the file's list entirely. With no tasks
    /// anywhere, the demo day is used.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let specs = if cli.tasks.is_empty() {
            &file.tasks
        } else {
            &cli.tasks
        };
        let tasks = if specs.is_empty() {
            demo_tasks()?
        } else {
            specs
                .iter()
                .map(TaskSpec::to_task)
                .collect::<Result<Vec<_>, _>>()?
        };

        let subscribers = if cli.subscribers.is_empty() {
            file.schedule
                .subscribers
                .clone()
                .unwrap_or(defaults.subscribers)
        } else {
            cli.subscribers.clone()
        };

        Ok(Self {
            subscribers,
            trace_events: cli.trace_events
                || file.schedule.trace_events.unwrap_or(defaults.trace_events),
            tasks,
            log_level: cli
                .log_level
                .clone()
                .or_else(|| file.logging.level.clone())
                .unwrap_or(defaults.log_level),
            log_file: cli.log_file.clone().or_else(|| file.logging.file.clone()),
        })
    }
}

/// The exercise's sample day: two compatible tasks and one that clashes.
///
/// # Errors
///
/// Never fails in practice; the bounds are constants.
pub fn demo_tasks() -> Result<Vec<Task>, TaskError> {
    Ok(vec![
        Task::new("Morning Exercise", 7 * 60, 8 * 60)?,
        Task::new("Team Meeting", 9 * 60, 10 * 60)?,
        Task::new("Training Session", 9 * 60 + 30, 10 * 60 + 30)?,
    ])
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Conflict-checked day planner")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/dayplan/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Console subscriber id; repeat to add several.
    #[arg(short, long = "subscriber", value_name = "NAME")]
    pub subscribers: Vec<String>,

    /// Task to submit as `NAME@HH:MM-HH:MM`; repeat to add several.
    #[arg(short, long = "task", value_name = "TASK")]
    pub tasks: Vec<TaskSpec>,

    /// Also forward every notification into the log.
    #[arg(long)]
    pub trace_events: bool,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, env = "DAYPLAN_LOG")]
    pub log_level: Option<String>,

    /// Path to log file (default: stderr).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("dayplan").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
