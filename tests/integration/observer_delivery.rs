//! Delivery guarantees between the schedule manager and its observers.
//!
//! Covers failure isolation, duplicate registrations, observers released
//! by their owner, and message ordering across calls.
//!
//! Verification command: `cargo test --test observer_delivery`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dayplan::observer::{Delivery, ObserverChannel, RecordingSubscriber};
use dayplan::{Observer, ObserverError, ScheduleManager, Task};

/// Observer that fails every call but counts how often it was asked.
#[derive(Default)]
struct Flaky {
    calls: AtomicUsize,
}

impl Observer for Flaky {
    fn update(&self, _message: &str) -> Result<(), ObserverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ObserverError::Rejected("flaky".to_string()))
    }
}

/// Observer with a bug: every call panics.
struct Panicking;

impl Observer for Panicking {
    fn update(&self, _message: &str) -> Result<(), ObserverError> {
        panic!("observer bug");
    }
}

fn task(name: &str, start: u16, end: u16) -> Task {
    Task::new(name, start, end).expect("valid task")
}

#[test]
fn failing_observer_does_not_block_others() {
    let mut mgr = ScheduleManager::new();
    let flaky = Arc::new(Flaky::default());
    let good = Arc::new(RecordingSubscriber::new());
    mgr.register(&flaky);
    mgr.register(&good);

    assert!(mgr.add_task(task("A", 0, 60)));
    assert!(!mgr.add_task(task("B", 30, 90)));

    assert_eq!(flaky.calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        good.messages(),
        vec!["Task added: A", "Conflict: B overlaps with A"]
    );
}

#[test]
fn panicking_observer_is_contained() {
    let mut mgr = ScheduleManager::new();
    let panicking = Arc::new(Panicking);
    let good = Arc::new(RecordingSubscriber::new());
    mgr.register(&panicking);
    mgr.register(&good);

    let admitted = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        mgr.add_task(task("A", 0, 60))
    }));
    assert!(matches!(admitted, Ok(true)), "panic escaped add_task");
    assert_eq!(good.messages(), vec!["Task added: A"]);
    assert_eq!(mgr.len(), 1);

    assert!(!mgr.add_task(task("B", 30, 90)));
    assert_eq!(
        good.messages(),
        vec!["Task added: A", "Conflict: B overlaps with A"]
    );
}

#[test]
fn failing_observer_does_not_change_result() {
    let mut mgr = ScheduleManager::new();
    let flaky = Arc::new(Flaky::default());
    mgr.register(&flaky);
    assert!(mgr.add_task(task("A", 0, 60)));
    assert_eq!(mgr.len(), 1);
}

#[test]
fn duplicate_registration_receives_once_per_registration() {
    let mut mgr = ScheduleManager::new();
    let sub = Arc::new(RecordingSubscriber::new());
    mgr.register(&sub);
    mgr.register(&sub);
    assert_eq!(mgr.observer_count(), 2);

    mgr.add_task(task("A", 0, 60));
    assert_eq!(sub.messages(), vec!["Task added: A", "Task added: A"]);

    mgr.unregister(&sub);
    mgr.add_task(task("B", 60, 120));
    assert_eq!(sub.len(), 3);
}

#[test]
fn released_observer_is_not_kept_alive() {
    let mut mgr = ScheduleManager::new();
    let released = Arc::new(RecordingSubscriber::new());
    let kept = Arc::new(RecordingSubscriber::new());
    mgr.register(&released);
    mgr.register(&kept);

    let weak = Arc::downgrade(&released);
    drop(released);
    assert!(weak.upgrade().is_none());

    assert!(mgr.add_task(task("A", 0, 60)));
    assert_eq!(kept.messages(), vec!["Task added: A"]);
}

#[test]
fn messages_arrive_in_emission_order() {
    let mut mgr = ScheduleManager::new();
    let sub = Arc::new(RecordingSubscriber::new());
    mgr.register(&sub);

    let attempts = [("A", 0, 60), ("B", 30, 90), ("C", 60, 120), ("D", 100, 110)];
    for (name, start, end) in attempts {
        mgr.add_task(task(name, start, end));
    }

    assert_eq!(
        sub.messages(),
        vec![
            "Task added: A",
            "Conflict: B overlaps with A",
            "Task added: C",
            "Conflict: D overlaps with C",
        ]
    );
}

#[test]
fn channel_reports_delivery_counts() {
    let mut channel = ObserverChannel::new();
    let flaky = Arc::new(Flaky::default());
    let good = Arc::new(RecordingSubscriber::new());
    let gone = Arc::new(RecordingSubscriber::new());
    channel.register(&good);
    channel.register(&flaky);
    channel.register(&gone);
    drop(gone);

    assert_eq!(
        channel.notify("hello"),
        Delivery {
            delivered: 1,
            failed: 1,
            dropped: 1,
        }
    );
}
