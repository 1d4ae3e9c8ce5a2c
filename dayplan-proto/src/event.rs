//! Schedule lifecycle events.
//!
//! Observers receive these as plain text; the [`Display`](std::fmt::Display)
//! form is the stable message grammar.

use std::fmt;

use crate::task::Task;

/// Something that happened to the schedule, rendered as one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEvent<'a> {
    /// A task was admitted.
    Added {
        /// The admitted task.
        task: &'a Task,
    },
    /// A candidate was rejected because it overlaps an admitted task.
    Conflict {
        /// The rejected candidate.
        candidate: &'a Task,
        /// The earliest-admitted task it overlaps.
        existing: &'a Task,
    },
}

impl ScheduleEvent<'_> {
    /// Short label for structured logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Conflict { .. } => "conflict",
        }
    }
}

impl fmt::Display for ScheduleEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { task } => write!(f, "Task added: {}", task.name()),
            Self::Conflict {
                candidate,
                existing,
            } => write!(
                f,
                "Conflict: {} overlaps with {}",
                candidate.name(),
                existing.name()
            ),
        }
    }
}
