//! State values and shallow patch merging.
//!
//! A [`State`] is the single value held by a [`Store`](crate::Store). Every
//! write goes through a patch: a partial update whose present fields overwrite
//! the current ones and whose absent fields leave the current ones untouched.
//! Merging is shallow: nested values are replaced, never combined.

mod operations;

pub use operations::{merge_json, overwrite};

/// A value that can be held by a store and updated by shallow patches.
pub trait State: Clone + Send + Sync + 'static {
    /// Partial update for this state.
    type Patch: Send + 'static;

    /// Merge a patch over `self`.
    ///
    /// Fields present in the patch overwrite unconditionally; fields absent from
    /// the patch keep their current value.
    fn merge(&mut self, patch: Self::Patch);
}

/// Dynamic state: a JSON object merged key by key.
impl State for serde_json::Map<String, serde_json::Value> {
    type Patch = serde_json::Map<String, serde_json::Value>;

    fn merge(&mut self, patch: Self::Patch) {
        merge_json(self, patch);
    }
}
