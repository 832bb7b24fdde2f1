//! Subscription manager for publishing state to field selectors.

use crate::middleware::panic_message;
use crate::state::State;
use crate::types::SubscriptionId;
use crossbeam_channel::{bounded, unbounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use super::types::{Field, Selection};

/// Result of offering a value to one subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delivery {
    Sent,
    Full,
    Disconnected,
}

/// Internal subscription state.
struct Subscription<S> {
    field: String,
    /// Projects the field and sends it down the subscriber's channel.
    publish: Box<dyn Fn(&S) -> Delivery + Send + Sync>,
}

fn try_deliver<V>(sender: &Sender<V>, value: V) -> Delivery {
    match sender.try_send(value) {
        Ok(()) => Delivery::Sent,
        Err(TrySendError::Full(_)) => Delivery::Full,
        Err(TrySendError::Disconnected(_)) => Delivery::Disconnected,
    }
}

/// Registry of field selectors for one store.
///
/// Every publish sends the projected field value to every subscriber,
/// whether or not that field changed.
pub struct SubscriptionManager<S> {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription<S>>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
    /// Channel capacity per subscriber (None = unbounded).
    buffer_size: Option<usize>,
}

impl<S: State> SubscriptionManager<S> {
    /// Create a manager with unbounded subscriber buffers.
    pub fn new() -> Self {
        Self::with_buffer_size(None)
    }

    /// Create a manager with a per-subscriber buffer bound.
    ///
    /// A subscriber whose buffer is full at publish time is dropped.
    pub fn with_buffer_size(buffer_size: Option<usize>) -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            buffer_size,
        }
    }

    /// Register a selector and replay `current` to it.
    ///
    /// Callers must hold whatever lock serializes publishes, so the replayed
    /// value and the first published value cannot be reordered.
    pub fn subscribe<V>(&self, field: Field<S, V>, current: &S) -> Selection<V>
    where
        V: Send + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = match self.buffer_size {
            // The replayed value always needs one slot
            Some(size) => bounded(size.max(1)),
            None => unbounded(),
        };

        let name = field.name().to_string();
        // Fresh channel with at least one free slot
        let replayed = sender.try_send(field.get(current));
        debug_assert!(replayed.is_ok(), "replay into a fresh channel failed");

        let subscription = Subscription {
            field: name.clone(),
            publish: Box::new(move |state: &S| try_deliver(&sender, field.get(state))),
        };

        self.subscriptions.write().insert(id, subscription);
        debug!(subscription = %id, field = %name, "selector subscribed");

        Selection::new(id, name, receiver)
    }

    /// Remove a subscription. Returns false if it was not registered.
    ///
    /// Dropping the subscription drops its sender, so the receiver sees a
    /// disconnect once it has drained buffered values.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscriptions.write().remove(&id);
        if let Some(sub) = &removed {
            debug!(subscription = %id, field = %sub.field, "selector unsubscribed");
        }
        removed.is_some()
    }

    /// Remove every subscription.
    pub fn clear(&self) -> usize {
        let mut subs = self.subscriptions.write();
        let count = subs.len();
        subs.clear();
        count
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Get the number of subscriptions on a given field.
    #[cfg(test)]
    fn field_count(&self, field: &str) -> usize {
        self.subscriptions
            .read()
            .values()
            .filter(|sub| sub.field == field)
            .count()
    }

    /// Publish a state to every subscriber. Drops subscribers that fail to receive.
    ///
    /// A projection that panics only drops its own subscriber; the others
    /// still receive the state.
    pub fn publish(&self, state: &S) {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                match panic::catch_unwind(AssertUnwindSafe(|| (sub.publish)(state))) {
                    Ok(Delivery::Sent) => {}
                    Ok(Delivery::Full) => {
                        warn!(
                            subscription = %id,
                            field = %sub.field,
                            "selector buffer full, dropping subscriber"
                        );
                        to_remove.push(*id);
                    }
                    Ok(Delivery::Disconnected) => to_remove.push(*id),
                    Err(panic) => {
                        warn!(
                            subscription = %id,
                            field = %sub.field,
                            panic = %panic_message(panic.as_ref()),
                            "selector projection panicked, dropping subscriber"
                        );
                        to_remove.push(*id);
                    }
                }
            }
        }

        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    debug!(subscription = %id, field = %sub.field, "selector removed");
                }
            }
        }
    }
}

impl<S: State> Default for SubscriptionManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
