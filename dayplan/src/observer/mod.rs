//! Schedule notification fan-out.
//!
//! Observers are owned by the caller. The [`ObserverChannel`] only keeps
//! weak references, so dropping the last `Arc` silently retires an observer
//! even if it was never unregistered.

pub mod channel;
pub mod subscribers;

pub use channel::{Delivery, ObserverChannel};
pub use subscribers::{ConsoleSubscriber, RecordingSubscriber, TracingSubscriber};

use thiserror::Error;

/// Errors an observer can report from [`Observer::update`].
///
/// The channel logs these and moves on to the next subscriber; they never
/// reach whoever triggered the notification.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// Writing the notification somewhere failed.
    #[error("observer i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The observer refused the notification.
    #[error("observer rejected notification: {0}")]
    Rejected(String),
}

/// Receives schedule notifications as opaque human-readable text.
///
/// Implementations must not parse `message` for control flow and should
/// return promptly; the manager blocks until every observer has been called.
pub trait Observer: Send + Sync {
    /// Handles one notification.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError`] if the notification could not be handled.
    fn update(&self, message: &str) -> Result<(), ObserverError>;
}
