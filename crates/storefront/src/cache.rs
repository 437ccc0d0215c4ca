//! Normalized entity cache for stores that show one entity in several lists.
//!
//! Reviews and notes appear in up to four lists (per product, own, a managed
//! user's, all) plus a "current" slot. Instead of keeping a copy in each,
//! [`EntityCache`] stores every entity once, keyed by id, and each list is an
//! ordered view of ids. Patching an entity therefore updates every list and
//! the current slot at once.

use std::collections::HashMap;
use std::hash::Hash;

use tomato_core::{NoteId, ReviewId};

use crate::models::{Note, Review};

/// An entity with a server-assigned identity.
pub trait Keyed {
    type Key: Copy + Eq + Hash + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

impl Keyed for Review {
    type Key = ReviewId;

    fn key(&self) -> ReviewId {
        self.id
    }
}

impl Keyed for Note {
    type Key = NoteId;

    fn key(&self) -> NoteId {
        self.id
    }
}

/// The lists a review or note can appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListView {
    /// Entries of the product being viewed.
    Product,
    /// The logged-in user's own entries.
    User,
    /// Entries of a user picked by an admin.
    ManagedUser,
    /// Every entry (admin).
    All,
}

impl ListView {
    pub const ALL: [Self; 4] = [Self::Product, Self::User, Self::ManagedUser, Self::All];
}

/// Entities stored once, exposed through ordered views and a current slot.
#[derive(Debug, Clone)]
pub struct EntityCache<T: Keyed> {
    entities: HashMap<T::Key, T>,
    views: HashMap<ListView, Vec<T::Key>>,
    current: Option<T::Key>,
}

impl<T: Keyed> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            views: HashMap::new(),
            current: None,
        }
    }
}

impl<T: Keyed> EntityCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a whole view with a fresh server list.
    pub fn replace_view(&mut self, view: ListView, items: Vec<T>) {
        let keys = items.iter().map(Keyed::key).collect();
        for item in items {
            self.entities.insert(item.key(), item);
        }
        self.views.insert(view, keys);
        self.prune();
    }

    /// Insert a new entity at the front of the given views.
    pub fn prepend(&mut self, views: &[ListView], item: T) {
        let key = item.key();
        self.entities.insert(key, item);
        for view in views {
            let keys = self.views.entry(*view).or_default();
            keys.retain(|k| *k != key);
            keys.insert(0, key);
        }
    }

    /// Replace an entity that is already cached. Returns `false` (and stores
    /// nothing) when the id is unknown.
    pub fn patch(&mut self, item: T) -> bool {
        match self.entities.get_mut(&item.key()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove an entity from every view and clear the current slot if it
    /// pointed at it.
    pub fn remove(&mut self, key: T::Key) -> Option<T> {
        for keys in self.views.values_mut() {
            keys.retain(|k| *k != key);
        }
        if self.current == Some(key) {
            self.current = None;
        }
        self.entities.remove(&key)
    }

    /// Entities of a view, in order.
    pub fn view(&self, view: ListView) -> impl Iterator<Item = &T> {
        self.views
            .get(&view)
            .into_iter()
            .flatten()
            .filter_map(|k| self.entities.get(k))
    }

    /// Owned copy of a view.
    #[must_use]
    pub fn view_vec(&self, view: ListView) -> Vec<T>
    where
        T: Clone,
    {
        self.view(view).cloned().collect()
    }

    #[must_use]
    pub fn view_len(&self, view: ListView) -> usize {
        self.views.get(&view).map_or(0, Vec::len)
    }

    /// Empty one view.
    pub fn clear_view(&mut self, view: ListView) {
        self.views.remove(&view);
        self.prune();
    }

    #[must_use]
    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.entities.get(&key)
    }

    pub fn get_mut(&mut self, key: T::Key) -> Option<&mut T> {
        self.entities.get_mut(&key)
    }

    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.current.and_then(|k| self.entities.get(&k))
    }

    /// Point the current slot at `item` (stored like any other entity), or
    /// clear it.
    pub fn set_current(&mut self, item: Option<T>) {
        match item {
            Some(item) => {
                let key = item.key();
                self.entities.insert(key, item);
                self.current = Some(key);
            }
            None => {
                self.current = None;
                self.prune();
            }
        }
    }

    /// Number of distinct cached entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop entities no longer referenced by any view or the current slot.
    fn prune(&mut self) {
        let views = &self.views;
        let current = self.current;
        self.entities.retain(|key, _| {
            current == Some(*key) || views.values().any(|keys| keys.contains(key))
        });
    }
}
