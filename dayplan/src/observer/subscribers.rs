//! Ready-made observers.

use std::io::{self, Write};

use parking_lot::Mutex;

use super::{Observer, ObserverError};

/// Prints each notification as `[<id>] <message>`.
///
/// Writes to stdout unless built with [`ConsoleSubscriber::with_writer`].
pub struct ConsoleSubscriber {
    id: String,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSubscriber {
    /// Creates a subscriber that prints to stdout.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_writer(id, Box::new(io::stdout()))
    }

    /// Creates a subscriber that prints to an arbitrary writer.
    #[must_use]
    pub fn with_writer(id: impl Into<String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            id: id.into(),
            out: Mutex::new(out),
        }
    }

    /// Identifier printed in front of every message.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Observer for ConsoleSubscriber {
    fn update(&self, message: &str) -> Result<(), ObserverError> {
        let mut out = self.out.lock();
        writeln!(out, "[{}] {message}", self.id)?;
        out.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for ConsoleSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSubscriber")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Forwards notifications into the `tracing` pipeline at `info` level.
#[derive(Debug, Clone)]
pub struct TracingSubscriber {
    label: String,
}

impl TracingSubscriber {
    /// Creates a subscriber that tags its events with `label`.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Observer for TracingSubscriber {
    fn update(&self, message: &str) -> Result<(), ObserverError> {
        tracing::info!(subscriber = %self.label, notification = message, "schedule notification");
        Ok(())
    }
}

/// Keeps every notification it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingSubscriber {
    inbox: Mutex<Vec<String>>,
}

impl RecordingSubscriber {
    /// Creates a subscriber with an empty inbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages received so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.inbox.lock().clone()
    }

    /// Number of messages received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inbox.lock().len()
    }

    /// Returns `true` if nothing has been received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inbox.lock().is_empty()
    }

    /// Empties the inbox.
    pub fn clear(&self) {
        self.inbox.lock().clear();
    }
}

impl Observer for RecordingSubscriber {
    fn update(&self, message: &str) -> Result<(), ObserverError> {
        self.inbox.lock().push(message.to_string());
        Ok(())
    }
}
