//! Named half-open time intervals.
//!
//! A [`Task`] covers `[start, end)` on a single day. Two tasks where one ends
//! exactly when the other starts do not overlap.

use std::fmt;

use thiserror::Error;

use crate::time::MinuteOfDay;

/// Errors raised when constructing tasks or times.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task name cannot be empty.
    #[error("task name cannot be empty")]
    EmptyName,
    /// Start must come strictly before end.
    #[error("task start {start} must be before end {end}")]
    EmptyInterval {
        /// Requested start.
        start: MinuteOfDay,
        /// Requested end.
        end: MinuteOfDay,
    },
    /// Minute offset past the end of the day.
    #[error("minute {0} is outside the day (max 1440)")]
    MinuteOutOfRange(u16),
    /// Text that is not a valid `HH:MM` time.
    #[error("malformed time of day: {0:?}")]
    MalformedTime(String),
}

/// An immutable named interval `[start, end)` in minutes of day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    name: String,
    start: MinuteOfDay,
    end: MinuteOfDay,
}

impl Task {
    /// Creates a task from raw minute offsets.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyName`] for an empty name,
    /// [`TaskError::MinuteOutOfRange`] if either bound exceeds 1440, or
    /// [`TaskError::EmptyInterval`] if `start >= end`.
    pub fn new(name: impl Into<String>, start: u16, end: u16) -> Result<Self, TaskError> {
        Self::from_minutes(name, MinuteOfDay::new(start)?, MinuteOfDay::new(end)?)
    }

    /// Creates a task from already validated times.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::EmptyName`] for an empty name or
    /// [`TaskError::EmptyInterval`] if `start >= end`.
    pub fn from_minutes(
        name: impl Into<String>,
        start: MinuteOfDay,
        end: MinuteOfDay,
    ) -> Result<Self, TaskError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TaskError::EmptyName);
        }
        if start >= end {
            return Err(TaskError::EmptyInterval { start, end });
        }
        Ok(Self { name, start, end })
    }

    /// Display name of the task.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive start of the interval.
    #[must_use]
    pub const fn start(&self) -> MinuteOfDay {
        self.start
    }

    /// Exclusive end of the interval.
    #[must_use]
    pub const fn end(&self) -> MinuteOfDay {
        self.end
    }

    /// Length of the interval in minutes; always at least 1.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.end.get() - self.start.get()
    }

    /// Returns `true` if the two tasks share at least one minute.
    #[must_use]
    pub fn overlaps_with(&self, other: &Self) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.start, self.end, self.name)
    }
}
