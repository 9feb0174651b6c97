//! # Keyed Cache
//!
//! An insertion-ordered map from entity id to entity. Each manager owns
//! exactly one of these and never shares it.
//!
//! Lookups by id are hashed. Lookups by anything else go through
//! [`KeyedCache::find`], a linear scan in insertion order; caches hold
//! hundreds of entities, not millions, so there are no secondary indices.

use std::collections::HashMap;

/// Ordered, unique-key container keyed by numeric id.
///
/// # Example
///
/// ```
/// use ptero_core::KeyedCache;
///
/// let mut cache = KeyedCache::new();
/// cache.set(2, "b");
/// cache.set(1, "a");
/// cache.set(2, "B"); // overwrite keeps position
///
/// assert_eq!(cache.keys().collect::<Vec<_>>(), vec![2, 1]);
/// assert_eq!(cache.get(2), Some(&"B"));
/// assert_eq!(cache.find(|v| v.starts_with('a')), Some(&"a"));
/// ```
#[derive(Debug, Clone)]
pub struct KeyedCache<V> {
    entries: HashMap<u64, V>,
    order: Vec<u64>,
}

impl<V> Default for KeyedCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<V> KeyedCache<V> {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: u64) -> Option<&V> {
        self.entries.get(&key)
    }

    /// Get a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        self.entries.get_mut(&key)
    }

    /// Check if `key` is present.
    pub fn has(&self, key: u64) -> bool {
        self.entries.contains_key(&key)
    }

    /// Insert or overwrite a value.
    ///
    /// New keys go to the end; existing keys keep their position.
    ///
    /// # Returns
    ///
    /// The previous value, if any.
    pub fn set(&mut self, key: u64, value: V) -> Option<V> {
        let previous = self.entries.insert(key, value);
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    /// Remove a value. Removing an absent key is a no-op.
    ///
    /// # Returns
    ///
    /// The removed value, if any.
    pub fn delete(&mut self, key: u64) -> Option<V> {
        let removed = self.entries.remove(&key);
        if removed.is_some() {
            self.order.retain(|k| *k != key);
        }
        removed
    }

    /// Get the first value, in insertion order, matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&V>
    where
        P: FnMut(&V) -> bool,
    {
        self.values().find(|v| predicate(*v))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().copied()
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().filter_map(|k| self.entries.get(k))
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> + '_ {
        self.order
            .iter()
            .filter_map(|k| self.entries.get(k).map(|v| (*k, v)))
    }

    /// Get the first value in insertion order.
    pub fn first(&self) -> Option<&V> {
        self.order.first().and_then(|k| self.entries.get(k))
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl<V: Clone> KeyedCache<V> {
    /// Merge another cache into this one.
    ///
    /// Every key of `other` ends up holding `other`'s value. Keys only
    /// present here are left alone.
    pub fn update(&mut self, other: &KeyedCache<V>) {
        for (key, value) in other.iter() {
            self.set(key, value.clone());
        }
    }
}

impl<V: PartialEq> PartialEq for KeyedCache<V> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.entries == other.entries
    }
}

impl<V> Extend<(u64, V)> for KeyedCache<V> {
    fn extend<T: IntoIterator<Item = (u64, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<V> FromIterator<(u64, V)> for KeyedCache<V> {
    fn from_iter<T: IntoIterator<Item = (u64, V)>>(iter: T) -> Self {
        let mut cache = KeyedCache::new();
        cache.extend(iter);
        cache
    }
}

impl<V> IntoIterator for KeyedCache<V> {
    type Item = (u64, V);
    type IntoIter = std::vec::IntoIter<(u64, V)>;

    fn into_iter(mut self) -> Self::IntoIter {
        let entries: Vec<(u64, V)> = self
            .order
            .iter()
            .filter_map(|k| self.entries.remove(k).map(|v| (*k, v)))
            .collect();
        entries.into_iter()
    }
}
