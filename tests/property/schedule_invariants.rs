//! Property-based tests for schedule admission.
//!
//! Uses proptest to verify, for arbitrary sequences of candidate tasks:
//! 1. No two listed tasks overlap.
//! 2. A rejected candidate leaves the listing untouched.
//! 3. An admitted candidate joins every previously listed task.
//! 4. The listing is sorted by start time.
//! 5. Adjacent intervals are admitted in either order.
//! 6. Every call produces exactly one notification per observer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use dayplan::observer::RecordingSubscriber;
use dayplan::{ScheduleManager, Task};
use proptest::prelude::*;

/// Strategy for generating well-formed tasks anywhere in the day.
fn arb_task() -> impl Strategy<Value = Task> {
    (0u16..1440, 1u16..=240, "[A-Za-z][A-Za-z ]{0,15}").prop_map(|(start, len, name)| {
        let end = start.saturating_add(len).min(1440);
        Task::new(name, start, end).expect("strategy yields valid bounds")
    })
}

/// Strategy for generating a sequence of candidate tasks.
fn arb_candidates() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(arb_task(), 0..40)
}

fn snapshot(mgr: &ScheduleManager) -> Vec<Task> {
    mgr.list_tasks().into_iter().cloned().collect()
}

proptest! {
    #[test]
    fn listed_tasks_never_overlap(candidates in arb_candidates()) {
        let mut mgr = ScheduleManager::new();
        for c in candidates {
            mgr.add_task(c);
        }
        let listed = mgr.list_tasks();
        for (i, a) in listed.iter().enumerate() {
            for b in &listed[i + 1..] {
                prop_assert!(!a.overlaps_with(b), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn rejection_is_side_effect_free(candidates in arb_candidates()) {
        let mut mgr = ScheduleManager::new();
        for c in candidates {
            let before = snapshot(&mgr);
            if !mgr.add_task(c) {
                prop_assert_eq!(snapshot(&mgr), before);
            }
        }
    }

    #[test]
    fn admission_is_monotone(candidates in arb_candidates()) {
        let mut mgr = ScheduleManager::new();
        for c in candidates {
            let before = snapshot(&mgr);
            if mgr.add_task(c.clone()) {
                let after = snapshot(&mgr);
                prop_assert_eq!(after.len(), before.len() + 1);
                prop_assert!(after.contains(&c));
                for t in &before {
                    prop_assert!(after.contains(t));
                }
            }
        }
    }

    #[test]
    fn listing_sorted_by_start(candidates in arb_candidates()) {
        let mut mgr = ScheduleManager::new();
        for c in candidates {
            mgr.add_task(c);
        }
        let listed = mgr.list_tasks();
        prop_assert!(listed.windows(2).all(|w| w[0].start() <= w[1].start()));
    }

    #[test]
    fn admission_matches_overlap_predicate(candidates in arb_candidates()) {
        let mut mgr = ScheduleManager::new();
        for c in candidates {
            let clashes = mgr.list_tasks().iter().any(|t| t.overlaps_with(&c));
            prop_assert_eq!(mgr.add_task(c), !clashes);
        }
    }

    #[test]
    fn adjacent_intervals_admit_in_either_order(
        start in 0u16..1438,
        first_len in 1u16..=60,
        second_len in 1u16..=60,
        reversed in any::<bool>(),
    ) {
        let mid = (start + first_len).min(1439);
        let end = (mid + second_len).min(1440);
        let a = Task::new("a", start, mid).unwrap();
        let b = Task::new("b", mid, end).unwrap();
        let (first, second) = if reversed { (b, a) } else { (a, b) };

        let mut mgr = ScheduleManager::new();
        prop_assert!(mgr.add_task(first));
        prop_assert!(mgr.add_task(second));
        prop_assert_eq!(mgr.len(), 2);
    }

    #[test]
    fn one_notification_per_call_per_observer(
        candidates in arb_candidates(),
        observers in 1usize..5,
    ) {
        let mut mgr = ScheduleManager::new();
        let subs: Vec<Arc<RecordingSubscriber>> =
            (0..observers).map(|_| Arc::new(RecordingSubscriber::new())).collect();
        for s in &subs {
            mgr.register(s);
        }
        let calls = candidates.len();
        for c in candidates {
            mgr.add_task(c);
        }
        for s in &subs {
            prop_assert_eq!(s.len(), calls);
        }
        let first = subs[0].messages();
        for s in &subs[1..] {
            prop_assert_eq!(s.messages(), first.clone());
        }
    }
}
