//! Keyed store of individually locked aggregates.
//!
//! The map lock is held only long enough to clone an aggregate handle, so
//! operations on different aggregates never contend on it.

use parking_lot::{Mutex, RwLock};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Shared, individually lockable aggregate.
pub(crate) type Handle<V> = Arc<Mutex<V>>;

pub(crate) struct Registry<K, V> {
    entries: RwLock<HashMap<K, Handle<V>>>,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Clone + Ord,
{
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new aggregate. Returns false if the key is taken.
    pub(crate) fn insert_new(&self, key: K, value: V) -> bool {
        match self.entries.write().entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(value)));
                true
            }
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<Handle<V>> {
        self.entries.read().get(key).cloned()
    }

    /// All handles, ordered by key.
    pub(crate) fn handles(&self) -> Vec<Handle<V>> {
        let entries = self.entries.read();
        let mut keys: Vec<&K> = entries.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|k| entries.get(k).cloned())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_new_rejects_duplicate_keys() {
        let registry: Registry<String, u32> = Registry::new();

        assert!(registry.insert_new("a".to_string(), 1));
        assert!(!registry.insert_new("a".to_string(), 2));

        let handle = registry.get(&"a".to_string()).unwrap();
        assert_eq!(*handle.lock(), 1);
    }

    #[test]
    fn handles_are_ordered_by_key() {
        let registry: Registry<String, u32> = Registry::new();
        for (k, v) in [("c", 3), ("a", 1), ("b", 2)] {
            registry.insert_new(k.to_string(), v);
        }

        let values: Vec<u32> = registry.handles().iter().map(|h| *h.lock()).collect();

        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn handles_share_the_same_aggregate() {
        let registry: Registry<String, u32> = Registry::new();
        registry.insert_new("a".to_string(), 1);

        *registry.get(&"a".to_string()).unwrap().lock() += 10;

        assert_eq!(*registry.get(&"a".to_string()).unwrap().lock(), 11);
    }
}
