//! First-seen ordered identifier index.

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap, map::Entry};

use crate::graph::NodeId;

/// Maps external identifiers to sequential [`NodeId`]s in first-seen order.
///
/// The first key inserted receives index 0, the next new key index 1, and so
/// on. Repeated keys always resolve to the index assigned on first sight.
///
/// # Examples
/// ```
/// use graphfix_core::{IdentifierIndex, NodeId};
///
/// let mut index = IdentifierIndex::new();
/// assert_eq!(index.get_or_insert("P53"), (NodeId::new(0), true));
/// assert_eq!(index.get_or_insert("MDM2"), (NodeId::new(1), true));
/// assert_eq!(index.get_or_insert("P53"), (NodeId::new(0), false));
/// assert_eq!(index.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct IdentifierIndex<K> {
    entries: IndexMap<K, NodeId>,
}

impl<K> Default for IdentifierIndex<K> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> IdentifierIndex<K> {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `key`, assigning the next sequential one when the
    /// key has not been seen. The flag reports whether the key was new.
    pub fn get_or_insert(&mut self, key: K) -> (NodeId, bool) {
        let next = NodeId::new(self.entries.len() as u64);
        match self.entries.entry(key) {
            Entry::Occupied(entry) => (*entry.get(), false),
            Entry::Vacant(entry) => (*entry.insert(next), true),
        }
    }

    /// Returns whether `key` has been assigned an index.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.contains_key(key)
    }

    /// Returns the number of distinct keys seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no key has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
