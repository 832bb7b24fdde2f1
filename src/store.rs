//! The state container tying state, versioning, and selectors together.

use crate::error::{BoxError, Result, StoreError};
use crate::state::State;
use crate::subscriptions::{Field, Selection, SubscriptionManager};
use crate::types::{SubscriptionId, Version};
use parking_lot::Mutex;
use tracing::debug;

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Name used in log output.
    pub name: String,

    /// Max buffered values per selector before the selector is dropped.
    /// Default: None (unbounded)
    pub buffer_size: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            buffer_size: None,
        }
    }
}

/// Current value and how many dispatches produced it.
struct Current<S> {
    state: S,
    version: Version,
}

/// A single mutable state value with field-level observation.
///
/// Reads return snapshots; writes replace the whole value by merging a patch
/// computed from the current one. Read, patch, merge, and publish run as one
/// unit under a lock, so concurrent dispatches never lose updates.
///
/// Mutators run while that lock is held and must not call back into the
/// same store.
pub struct Store<S: State> {
    /// Store configuration.
    config: StoreConfig,

    /// Current state, guarded for the whole dispatch.
    current: Mutex<Current<S>>,

    /// Field selectors.
    subscriptions: SubscriptionManager<S>,
}

impl<S: State> Store<S> {
    /// Create a store holding `initial`.
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, StoreConfig::default())
    }

    /// Create a store with custom configuration.
    pub fn with_config(initial: S, config: StoreConfig) -> Self {
        let subscriptions = SubscriptionManager::with_buffer_size(config.buffer_size);

        Self {
            config,
            current: Mutex::new(Current {
                state: initial,
                version: Version::default(),
            }),
            subscriptions,
        }
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Snapshot of the current state.
    pub fn snapshot(&self) -> S {
        self.current.lock().state.clone()
    }

    /// Number of dispatches applied so far.
    pub fn version(&self) -> Version {
        self.current.lock().version
    }

    // --- Selectors ---

    /// Observe one field.
    ///
    /// The returned selection receives the current value immediately, then the
    /// field's value after every dispatch (even when that dispatch left the
    /// field unchanged).
    pub fn select<V>(&self, field: Field<S, V>) -> Selection<V>
    where
        V: Send + 'static,
    {
        // Hold the state lock so no dispatch slips between replay and registration
        let current = self.current.lock();
        self.subscriptions.subscribe(field, &current.state)
    }

    /// Stop a selection. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    /// Number of live selections.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.subscription_count()
    }

    /// Tear down every selection. Their receivers see a disconnect after
    /// draining buffered values. The store itself stays usable.
    pub fn close(&self) {
        let removed = self.subscriptions.clear();
        debug!(store = %self.config.name, removed, "store closed");
    }

    // --- Dispatch ---

    /// Apply a mutator to the current state.
    ///
    /// The patch returned by `mutator` is shallow-merged over the current state,
    /// the result is stored, and every selector is notified. If the mutator
    /// panics the panic reaches the caller and the state is left untouched.
    pub fn dispatch<F>(&self, mutator: F) -> Version
    where
        F: FnOnce(&S) -> S::Patch,
    {
        let mut current = self.current.lock();
        let patch = mutator(&current.state);
        self.commit(&mut current, patch)
    }

    /// Apply a fallible mutator.
    ///
    /// On failure nothing is merged, the version does not move, and no
    /// selector is notified.
    pub fn try_dispatch<F, E>(&self, mutator: F) -> Result<Version>
    where
        F: FnOnce(&S) -> std::result::Result<S::Patch, E>,
        E: Into<BoxError>,
    {
        let mut current = self.current.lock();
        let patch = mutator(&current.state).map_err(StoreError::mutator)?;
        Ok(self.commit(&mut current, patch))
    }

    /// Merge, store, and publish. Caller holds the state lock.
    fn commit(&self, current: &mut Current<S>, patch: S::Patch) -> Version {
        // Merge into a copy so a panicking merge cannot leave a half-applied state
        let mut next = current.state.clone();
        next.merge(patch);
        current.state = next;
        current.version = current.version.next();

        debug!(store = %self.config.name, version = %current.version, "state dispatched");

        self.subscriptions.publish(&current.state);
        current.version
    }
}
