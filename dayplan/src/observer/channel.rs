//! Subscriber registry with synchronous broadcast.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use super::Observer;

/// Outcome counts for a single [`ObserverChannel::notify`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Subscribers whose `update` returned `Ok`.
    pub delivered: usize,
    /// Subscribers whose `update` returned an error.
    pub failed: usize,
    /// Registrations whose observer had already been dropped by its owner.
    pub dropped: usize,
}

/// Ordered list of non-owning observer registrations.
///
/// Registration order is notification order. The same observer may be
/// registered more than once and then receives each message once per
/// registration.
#[derive(Default)]
pub struct ObserverChannel {
    observers: Vec<Weak<dyn Observer>>,
}

impl ObserverChannel {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `observer` to the subscriber list. No deduplication.
    ///
    /// Registrations whose observer has since been dropped by its owner are
    /// discarded first, so the list does not grow without bound.
    pub fn register<O: Observer + 'static>(&mut self, observer: &Arc<O>) {
        self.observers.retain(|w| w.strong_count() > 0);
        let weak: Weak<O> = Arc::downgrade(observer);
        self.observers.push(weak);
        tracing::debug!(subscribers = self.observers.len(), "observer registered");
    }

    /// Removes the first registration of `observer`, matched by identity.
    ///
    /// Returns `true` if a registration was removed, `false` if `observer`
    /// was not registered.
    pub fn unregister<O: Observer + 'static>(&mut self, observer: &Arc<O>) -> bool {
        let target = Arc::as_ptr(observer);
        let Some(pos) = self
            .observers
            .iter()
            .position(|w| std::ptr::addr_eq(w.as_ptr(), target))
        else {
            return false;
        };
        self.observers.remove(pos);
        tracing::debug!(subscribers = self.observers.len(), "observer unregistered");
        true
    }

    /// Delivers `message` to every live subscriber in registration order.
    ///
    /// The subscriber set is captured before the first `update` call. A
    /// subscriber that returns an error or panics is logged and skipped; the
    /// broadcast always runs to the end and nothing propagates to the caller.
    pub fn notify(&self, message: &str) -> Delivery {
        let mut delivery = Delivery::default();
        let live: Vec<Arc<dyn Observer>> = self
            .observers
            .iter()
            .filter_map(|w| {
                let upgraded = w.upgrade();
                if upgraded.is_none() {
                    delivery.dropped += 1;
                }
                upgraded
            })
            .collect();

        for (index, observer) in live.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| observer.update(message))) {
                Ok(Ok(())) => delivery.delivered += 1,
                Ok(Err(e)) => {
                    delivery.failed += 1;
                    tracing::warn!(index, error = %e, "observer failed to handle notification");
                }
                Err(payload) => {
                    delivery.failed += 1;
                    tracing::warn!(
                        index,
                        panic = panic_message(payload.as_ref()),
                        "observer panicked while handling notification"
                    );
                }
            }
        }

        if delivery.dropped > 0 {
            tracing::debug!(
                dropped = delivery.dropped,
                "skipped observers released by their owner"
            );
        }
        delivery
    }

    /// Number of registrations, including ones whose observer was dropped
    /// since the last [`register`](Self::register).
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

impl std::fmt::Debug for ObserverChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverChannel")
            .field("registrations", &self.observers.len())
            .finish()
    }
}
