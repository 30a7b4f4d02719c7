//! In-memory source lists for tests, previews, and hosts without a native volume manager.

use std::{cell::RefCell, cmp::Ordering, rc::Rc};

use super::{FolderShortcutList, VolumeList};
use crate::{
    events::{permutation_by_key, PermutedListener, PermutedListeners, SubscriptionId},
    shortcut::ShortcutEntry,
    volume::{VolumeId, VolumeInfo},
};

#[derive(Clone, Default)]
/// In-memory volume list. Clones share the same contents and subscribers.
pub struct MemoryVolumeList {
    volumes: Rc<RefCell<Vec<VolumeInfo>>>,
    listeners: Rc<PermutedListeners>,
}

impl MemoryVolumeList {
    /// Creates a list with the given volumes in mount order.
    pub fn new(volumes: Vec<VolumeInfo>) -> Self {
        Self {
            volumes: Rc::new(RefCell::new(volumes)),
            listeners: Rc::default(),
        }
    }

    /// Returns a copy of the current volumes.
    pub fn snapshot(&self) -> Vec<VolumeInfo> {
        self.volumes.borrow().clone()
    }

    /// Appends a newly mounted volume.
    pub fn push(&self, volume: VolumeInfo) {
        let mut next = self.snapshot();
        next.push(volume);
        self.commit(next);
    }

    /// Inserts a volume at `index`, clamped to the list length.
    pub fn insert(&self, index: usize, volume: VolumeInfo) {
        let mut next = self.snapshot();
        let index = index.min(next.len());
        next.insert(index, volume);
        self.commit(next);
    }

    /// Removes (unmounts) a volume by handle.
    pub fn remove(&self, volume_id: &VolumeId) -> Option<VolumeInfo> {
        let mut next = self.snapshot();
        let index = next.iter().position(|v| &v.volume_id == volume_id)?;
        let removed = next.remove(index);
        self.commit(next);
        Some(removed)
    }

    /// Replaces the whole list, emitting one notification for the combined change.
    pub fn replace_all(&self, volumes: Vec<VolumeInfo>) {
        self.commit(volumes);
    }

    fn commit(&self, next: Vec<VolumeInfo>) {
        let event = {
            let mut volumes = self.volumes.borrow_mut();
            let event = permutation_by_key(&volume_ids(&volumes), &volume_ids(&next));
            *volumes = next;
            event
        };
        if !event.is_identity() {
            self.listeners.emit(&event);
        }
    }
}

fn volume_ids(volumes: &[VolumeInfo]) -> Vec<&VolumeId> {
    volumes.iter().map(|v| &v.volume_id).collect()
}

impl VolumeList for MemoryVolumeList {
    fn len(&self) -> usize {
        self.volumes.borrow().len()
    }

    fn item(&self, index: usize) -> Option<VolumeInfo> {
        self.volumes.borrow().get(index).cloned()
    }

    fn subscribe_permuted(&self, listener: PermutedListener) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe_permuted(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }
}

#[derive(Clone, Default)]
/// In-memory folder-shortcut list sorted by full path, without duplicates.
pub struct MemoryFolderShortcutList {
    entries: Rc<RefCell<Vec<ShortcutEntry>>>,
    listeners: Rc<PermutedListeners>,
}

impl MemoryFolderShortcutList {
    /// Creates a list from `entries`, sorting them and dropping duplicate paths.
    pub fn new(entries: Vec<ShortcutEntry>) -> Self {
        Self {
            entries: Rc::new(RefCell::new(normalized(entries))),
            listeners: Rc::default(),
        }
    }

    /// Returns a copy of the current shortcuts.
    pub fn snapshot(&self) -> Vec<ShortcutEntry> {
        self.entries.borrow().clone()
    }

    /// Adds a shortcut at its sorted position. Returns `false` when the path is already pinned.
    pub fn add(&self, entry: ShortcutEntry) -> bool {
        let mut next = self.snapshot();
        match next.binary_search_by(|probe| probe.compare_paths(&entry)) {
            Ok(_) => false,
            Err(index) => {
                next.insert(index, entry);
                self.commit(next);
                true
            }
        }
    }

    /// Removes the shortcut pinned at `full_path`. Returns `false` when nothing was removed.
    pub fn remove(&self, full_path: &str) -> bool {
        let mut next = self.snapshot();
        let before = next.len();
        next.retain(|entry| entry.full_path != full_path);
        if next.len() == before {
            return false;
        }
        self.commit(next);
        true
    }

    /// Replaces all shortcuts, emitting one notification for the combined change.
    pub fn replace_all(&self, entries: Vec<ShortcutEntry>) {
        self.commit(normalized(entries));
    }

    fn commit(&self, next: Vec<ShortcutEntry>) {
        let event = {
            let mut entries = self.entries.borrow_mut();
            let event = permutation_by_key(&shortcut_paths(&entries), &shortcut_paths(&next));
            *entries = next;
            event
        };
        if !event.is_identity() {
            self.listeners.emit(&event);
        }
    }
}

fn shortcut_paths(entries: &[ShortcutEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.full_path.as_str()).collect()
}

fn normalized(mut entries: Vec<ShortcutEntry>) -> Vec<ShortcutEntry> {
    entries.sort_by(ShortcutEntry::compare_paths);
    entries.dedup_by(|a, b| a.full_path == b.full_path);
    entries
}

impl FolderShortcutList for MemoryFolderShortcutList {
    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn item(&self, index: usize) -> Option<ShortcutEntry> {
        self.entries.borrow().get(index).cloned()
    }

    fn compare(&self, a: &ShortcutEntry, b: &ShortcutEntry) -> Ordering {
        a.compare_paths(b)
    }

    fn on_item_not_found_error(&self, entry: &ShortcutEntry) {
        self.remove(&entry.full_path);
    }

    fn subscribe_permuted(&self, listener: PermutedListener) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    fn unsubscribe_permuted(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }
}
