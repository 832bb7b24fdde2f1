//! Selector types for field-level observation.

use crate::types::SubscriptionId;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A named projection of one field of a state.
///
/// Selecting a field on a store yields a [`Selection`] that receives the
/// projected value on subscription and after every dispatch.
pub struct Field<S, V> {
    name: String,
    project: Arc<dyn Fn(&S) -> V + Send + Sync>,
}

impl<S, V> Field<S, V> {
    /// Create a field from a name and a projection.
    pub fn new(name: impl Into<String>, project: impl Fn(&S) -> V + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            project: Arc::new(project),
        }
    }

    /// Field name (used for logging and introspection).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project the field out of a state value.
    pub fn get(&self, state: &S) -> V {
        (self.project)(state)
    }
}

impl Field<Map<String, Value>, Option<Value>> {
    /// Select a top-level key of a JSON object state.
    ///
    /// Emits `None` while the key is absent.
    pub fn key(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = name.clone();
        Self::new(name, move |state: &Map<String, Value>| state.get(&key).cloned())
    }
}

impl<S, V> Clone for Field<S, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            project: Arc::clone(&self.project),
        }
    }
}

impl<S, V> fmt::Debug for Field<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// Handle to a live field selection.
///
/// The first value received is the field's value at subscription time.
/// After that, one value arrives per dispatch. The channel disconnects when
/// the subscription is removed or the store is closed or dropped.
pub struct Selection<V> {
    pub id: SubscriptionId,
    field: String,
    /// Channel to receive field values.
    pub receiver: crossbeam_channel::Receiver<V>,
}

impl<V> Selection<V> {
    pub(crate) fn new(
        id: SubscriptionId,
        field: String,
        receiver: crossbeam_channel::Receiver<V>,
    ) -> Self {
        Self { id, field, receiver }
    }

    /// Name of the selected field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Receive the next value (blocking).
    pub fn recv(&self) -> Result<V, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a value (non-blocking).
    pub fn try_recv(&self) -> Result<V, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<V, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every buffered value, oldest first.
    pub fn drain(&self) -> Vec<V> {
        self.receiver.try_iter().collect()
    }

    /// Drain the buffer and keep only the most recent value.
    pub fn latest(&self) -> Option<V> {
        self.receiver.try_iter().last()
    }
}

impl<V> fmt::Debug for Selection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("pending", &self.receiver.len())
            .finish()
    }
}
