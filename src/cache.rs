//! Plain keyed cache.
//!
//! No eviction, expiry or capacity bound: entries live until removed or
//! cleared. Shared by reference; all methods take `&self`.

use parking_lot::RwLock;
use std::collections::HashMap;

/// String-keyed value cache.
pub struct Cache<V> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V: Clone> Cache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace an entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries.write().insert(key.into(), value);
    }

    /// Get a copy of an entry.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.read().get(key).cloned()
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Remove an entry, returning it if present.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.entries.write().remove(key)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Return the cached entry, computing and storing it on a miss.
    ///
    /// `compute` runs without the lock held, so two racing misses may both
    /// compute; the first insert wins.
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = compute();
        self.entries
            .write()
            .entry(key.to_string())
            .or_insert(value)
            .clone()
    }
}

impl<V: Clone> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_has() {
        let cache = Cache::new();
        assert!(!cache.has("a"));
        assert_eq!(cache.get("a"), None::<u32>);

        cache.set("a", 1);
        cache.set("a", 2);
        assert!(cache.has("a"));
        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = Cache::new();
        cache.set("a", "x".to_string());
        cache.set("b", "y".to_string());

        assert_eq!(cache.remove("a"), Some("x".to_string()));
        assert_eq!(cache.remove("a"), None);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_insert_with() {
        let cache = Cache::new();
        let mut calls = 0;

        let first = cache.get_or_insert_with("k", || {
            calls += 1;
            vec![1, 2]
        });
        let second = cache.get_or_insert_with("k", || {
            calls += 1;
            vec![3]
        });

        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![1, 2]);
        assert_eq!(calls, 1);
    }
}
