//! Turning ordered collections into keyed maps.
//!
//! Maps are rebuilt from scratch on every call. When two entities share a
//! key, the later one wins.

use crate::error::{Result, StoreError};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Key each entity by the string form of `key_of(entity)`.
pub fn normalize<E, K, F>(collection: &[E], key_of: F) -> HashMap<String, E>
where
    E: Clone,
    K: ToString,
    F: Fn(&E) -> K,
{
    collection
        .iter()
        .map(|e| (key_of(e).to_string(), e.clone()))
        .collect()
}

/// Key each entity by a named field of its serialized form.
///
/// String fields are used verbatim; any other value is keyed by its JSON
/// text (`1`, `true`, `null`). Fails if an entity does not serialize to an
/// object or lacks the field.
pub fn normalize_by_field<E>(collection: &[E], field: &str) -> Result<HashMap<String, E>>
where
    E: Clone + Serialize,
{
    let mut map = HashMap::with_capacity(collection.len());

    for (index, entity) in collection.iter().enumerate() {
        let value = serde_json::to_value(entity)?;
        let key = value
            .get(field)
            .map(key_string)
            .ok_or_else(|| StoreError::MissingKey {
                field: field.to_string(),
                index,
            })?;
        map.insert(key, entity.clone());
    }

    Ok(map)
}

fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
