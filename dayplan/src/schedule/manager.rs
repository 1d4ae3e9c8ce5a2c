//! Schedule manager: admission, notification and ordered listing.

use std::sync::Arc;

use dayplan_proto::{ScheduleEvent, Task};

use crate::observer::{Delivery, Observer, ObserverChannel};

/// Holds a day's admitted tasks and notifies observers about changes.
///
/// No two admitted tasks overlap. Tasks are stored in admission order; that
/// order decides which existing task is named in a conflict message.
#[derive(Debug, Default)]
pub struct ScheduleManager {
    tasks: Vec<Task>,
    channel: ObserverChannel,
}

impl ScheduleManager {
    /// Creates an empty manager with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `observer` to schedule notifications.
    ///
    /// Only a weak reference is kept; the caller owns the observer.
    pub fn register<O: Observer + 'static>(&mut self, observer: &Arc<O>) {
        self.channel.register(observer);
    }

    /// Removes the first registration of `observer`.
    ///
    /// Returns `false` if it was not registered.
    pub fn unregister<O: Observer + 'static>(&mut self, observer: &Arc<O>) -> bool {
        self.channel.unregister(observer)
    }

    /// Tries to admit `candidate`.
    ///
    /// Returns `true` and broadcasts `Task added: <name>` if it fits. If it
    /// overlaps an admitted task, broadcasts
    /// `Conflict: <candidate> overlaps with <existing>` naming the earliest
    /// admitted offender, leaves the schedule untouched, and returns `false`.
    pub fn add_task(&mut self, candidate: Task) -> bool {
        if let Some(existing) = self.first_conflict(&candidate) {
            let event = ScheduleEvent::Conflict {
                candidate: &candidate,
                existing,
            };
            tracing::info!(
                task = %candidate,
                conflicts_with = %existing,
                "task rejected"
            );
            self.broadcast(&event);
            return false;
        }

        tracing::debug!(task = %candidate, "task admitted");
        self.tasks.push(candidate);
        if let Some(admitted) = self.tasks.last() {
            self.broadcast(&ScheduleEvent::Added { task: admitted });
        }
        true
    }

    /// Returns the earliest-admitted task that overlaps `candidate`, if any.
    #[must_use]
    pub fn first_conflict(&self, candidate: &Task) -> Option<&Task> {
        self.tasks.iter().find(|t| t.overlaps_with(candidate))
    }

    /// Returns the admitted tasks sorted by start time.
    ///
    /// The sort is stable, so equal starts keep admission order. The
    /// snapshot borrows the manager and cannot be used to modify it.
    #[must_use]
    pub fn list_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by_key(|t| t.start());
        tasks
    }

    /// Number of admitted tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if no task has been admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of observer registrations.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.channel.len()
    }

    fn broadcast(&self, event: &ScheduleEvent<'_>) -> Delivery {
        let delivery = self.channel.notify(&event.to_string());
        tracing::trace!(
            kind = event.kind(),
            delivered = delivery.delivered,
            failed = delivery.failed,
            "notification broadcast"
        );
        delivery
    }
}
