//! Patch application helpers.

use serde_json::{Map, Value};

/// Overwrite `slot` when the patch carries a value for it.
///
/// Building block for hand-written `State::merge` implementations:
///
/// ```
/// use state_guardian::state::overwrite;
///
/// let mut count = 1;
/// overwrite(&mut count, None);
/// assert_eq!(count, 1);
/// overwrite(&mut count, Some(5));
/// assert_eq!(count, 5);
/// ```
pub fn overwrite<V>(slot: &mut V, value: Option<V>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Shallow-merge a JSON object patch into `state`.
///
/// Keys in the patch replace keys in the state, including explicit `null`s.
/// Nested objects and arrays are replaced wholesale.
pub fn merge_json(state: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        state.insert(key, value);
    }
}
