//! Identity-keyed expansion state for collapsible lists.
//!
//! Tracks which items of an ordered collection are expanded for
//! presentation. Membership is keyed by stable identity, never by
//! position, so reordering, inserting, or removing items in the backing
//! collection leaves every other item's flag untouched. A removed
//! identity's flag goes stale harmlessly: it never matches a displayed
//! item again.
//!
//! The same identity rule applies to any "live" handle into a dynamic
//! collection: `find_by_identity` re-resolves the item at each use, so a
//! deletion elsewhere in the list can never redirect a handle to the
//! wrong item the way a cached positional index does.

use std::collections::HashSet;
use std::hash::Hash;
use uuid::Uuid;

/// Stable per-item identity for collection items
pub trait Identified {
    fn identity(&self) -> Uuid;
}

/// Which identities in a collection are currently expanded
#[derive(Clone, Debug)]
pub struct ExpansionState<K> {
    expanded: HashSet<K>,
}

impl<K> Default for ExpansionState<K> {
    fn default() -> Self {
        Self {
            expanded: HashSet::default(),
        }
    }
}

impl<K: Eq + Hash> ExpansionState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &K) -> bool {
        self.expanded.contains(id)
    }

    /// Flip one identity's flag, returning the new state
    pub fn toggle(&mut self, id: K) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn set_expanded(&mut self, id: K, expanded: bool) {
        if expanded {
            self.expanded.insert(id);
        } else {
            self.expanded.remove(&id);
        }
    }

    pub fn expand_all<I: IntoIterator<Item = K>>(&mut self, ids: I) {
        self.expanded.extend(ids);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}

/// Resolve an item by identity at the moment of use
pub fn find_by_identity<T: Identified>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.identity() == id)
}

/// Mutable variant of `find_by_identity`
pub fn find_by_identity_mut<T: Identified>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.identity() == id)
}
