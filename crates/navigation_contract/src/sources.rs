//! Source-list contracts consumed by the navigation list engine.
//!
//! The host owns the live volume and folder-shortcut lists. The engine only reads them by index
//! and listens for their `permuted` notifications.

pub mod memory;

use std::cmp::Ordering;

use crate::{
    events::{PermutedListener, SubscriptionId},
    shortcut::ShortcutEntry,
    volume::VolumeInfo,
};

/// Live, ordered list of mounted volumes.
pub trait VolumeList {
    /// Number of volumes currently in the list.
    fn len(&self) -> usize;

    /// Returns `true` when no volume is mounted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the volume at `index`.
    fn item(&self, index: usize) -> Option<VolumeInfo>;

    /// Registers a listener for structural changes.
    fn subscribe_permuted(&self, listener: PermutedListener) -> SubscriptionId;

    /// Removes a listener registered with [`VolumeList::subscribe_permuted`].
    fn unsubscribe_permuted(&self, id: SubscriptionId);
}

/// Live folder-shortcut list kept in [`FolderShortcutList::compare`] order.
pub trait FolderShortcutList {
    /// Number of shortcuts currently in the list.
    fn len(&self) -> usize;

    /// Returns `true` when there are no shortcuts.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the shortcut at `index`.
    fn item(&self, index: usize) -> Option<ShortcutEntry>;

    /// Total order the list is sorted by.
    fn compare(&self, a: &ShortcutEntry, b: &ShortcutEntry) -> Ordering;

    /// Called when the directory behind `entry` no longer resolves.
    fn on_item_not_found_error(&self, entry: &ShortcutEntry);

    /// Registers a listener for structural changes.
    fn subscribe_permuted(&self, listener: PermutedListener) -> SubscriptionId;

    /// Removes a listener registered with [`FolderShortcutList::subscribe_permuted`].
    fn unsubscribe_permuted(&self, id: SubscriptionId);
}
