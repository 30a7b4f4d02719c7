//! `permuted` notifications and the explicit observer list used to deliver them.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    hash::Hash,
    rc::Rc,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Structural change of an ordered list.
///
/// `permutation[i]` is the new index of the item previously at index `i`, or `None` when that
/// item was removed. `new_length` is the list length after the change.
pub struct PermutedEvent {
    /// Old index to new index mapping.
    pub permutation: Vec<Option<usize>>,
    /// List length after the change.
    pub new_length: usize,
}

impl PermutedEvent {
    /// Identity mapping for an unchanged list of `len` items.
    pub fn identity(len: usize) -> Self {
        Self {
            permutation: (0..len).map(Some).collect(),
            new_length: len,
        }
    }

    /// Old indices whose items were removed.
    pub fn removed_indices(&self) -> Vec<usize> {
        self.permutation
            .iter()
            .enumerate()
            .filter_map(|(index, target)| target.is_none().then_some(index))
            .collect()
    }

    /// Returns `true` when the change neither moved nor removed nor added items.
    pub fn is_identity(&self) -> bool {
        self.new_length == self.permutation.len()
            && self
                .permutation
                .iter()
                .enumerate()
                .all(|(index, target)| *target == Some(index))
    }
}

/// Builds the permutation that maps `old` positions onto `new` positions by key.
///
/// Keys are expected to be unique within each sequence.
pub fn permutation_by_key<K: Eq + Hash>(old: &[K], new: &[K]) -> PermutedEvent {
    let positions: HashMap<&K, usize> = new.iter().enumerate().map(|(i, k)| (k, i)).collect();
    PermutedEvent {
        permutation: old.iter().map(|key| positions.get(key).copied()).collect(),
        new_length: new.len(),
    }
}

/// Handle returned by [`PermutedListeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Callback invoked with each `permuted` notification.
pub type PermutedListener = Rc<dyn Fn(&PermutedEvent)>;

#[derive(Default)]
/// Ordered subscription list for `permuted` notifications.
pub struct PermutedListeners {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, PermutedListener)>>,
}

impl PermutedListeners {
    /// Registers a listener and returns its subscription handle.
    pub fn subscribe(&self, listener: PermutedListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` when the handle was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Delivers `event` to every listener in subscription order.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or unsubscribe while
    /// the event is being delivered.
    pub fn emit(&self, event: &PermutedEvent) {
        let snapshot: Vec<PermutedListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Returns `true` when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
