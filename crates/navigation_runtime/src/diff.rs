//! Incremental rebuild of the source arrays from `permuted` notifications.
//!
//! Both functions keep entry identity for everything that survives the change, allocate fresh
//! entries only for new source items, and evict entries that left their source. The returned
//! event is the combined permutation over `volumes ++ shortcuts`.

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};

use leptos::logging;
use navigation_contract::{
    permutation_by_key, FolderShortcutList, PermutedEvent, VolumeId, VolumeList,
};

use crate::{model::EntryId, state::NavigationState};

/// Relocates volume entries per `event` and creates entries for the positions left empty.
pub(crate) fn rebuild_volume_items(
    state: &mut NavigationState,
    volumes: &dyn VolumeList,
    event: &PermutedEvent,
) -> PermutedEvent {
    let old_volumes = std::mem::take(&mut state.volume_items);
    let mut slots: Vec<Option<EntryId>> = vec![None; event.new_length];
    let mut targets: Vec<Option<usize>> = Vec::with_capacity(old_volumes.len());

    for (index, id) in old_volumes.into_iter().enumerate() {
        let target = event
            .permutation
            .get(index)
            .copied()
            .flatten()
            .filter(|slot| slots.get(*slot).is_some_and(Option::is_none));
        match target {
            Some(slot) => {
                slots[slot] = Some(id);
                targets.push(Some(slot));
            }
            None => {
                state.evict(id);
                targets.push(None);
            }
        }
    }

    // Slot index to position in the rebuilt array; differs only when the source came up short.
    let mut positions: Vec<Option<usize>> = Vec::with_capacity(slots.len());
    for (slot, entry) in slots.into_iter().enumerate() {
        let id = match entry {
            Some(id) => Some(id),
            None => match volumes.item(slot) {
                Some(volume) => Some(state.insert_volume(volume)),
                None => {
                    logging::warn!(
                        "volume source has no item at index {slot} of {}",
                        event.new_length
                    );
                    None
                }
            },
        };
        positions.push(id.map(|id| {
            state.volume_items.push(id);
            state.volume_items.len() - 1
        }));
    }

    let volume_count = state.volume_items.len();
    let shortcut_count = state.shortcut_items.len();
    let mut permutation: Vec<Option<usize>> = targets
        .into_iter()
        .map(|target| target.and_then(|slot| positions[slot]))
        .collect();
    permutation.extend((0..shortcut_count).map(|index| Some(volume_count + index)));

    PermutedEvent {
        permutation,
        new_length: volume_count + shortcut_count,
    }
}

/// Rebuilds the volume entries from the source's current contents, matching by volume handle.
///
/// Used when notifications were missed, so no permutation can be trusted.
pub(crate) fn resync_volume_items(
    state: &mut NavigationState,
    volumes: &dyn VolumeList,
) -> PermutedEvent {
    let old_volumes = std::mem::take(&mut state.volume_items);
    let mut by_handle: HashMap<VolumeId, EntryId> = old_volumes
        .iter()
        .filter_map(|id| {
            let volume = state.get(*id)?.volume_info()?;
            Some((volume.volume_id.clone(), *id))
        })
        .collect();

    for index in 0..volumes.len() {
        let Some(volume) = volumes.item(index) else {
            logging::warn!(
                "volume source has no item at index {index} of {}",
                volumes.len()
            );
            continue;
        };
        let id = match by_handle.remove(&volume.volume_id) {
            Some(id) => id,
            None => state.insert_volume(volume),
        };
        state.volume_items.push(id);
    }

    let kept: HashSet<EntryId> = state.volume_items.iter().copied().collect();
    for id in &old_volumes {
        if !kept.contains(id) {
            state.evict(*id);
        }
    }

    let old_roots: Vec<EntryId> = old_volumes
        .iter()
        .chain(&state.shortcut_items)
        .copied()
        .collect();
    let new_roots: Vec<EntryId> = state
        .volume_items
        .iter()
        .chain(&state.shortcut_items)
        .copied()
        .collect();
    permutation_by_key(&old_roots, &new_roots)
}

/// Merges the shortcut entries against the source's current contents.
///
/// Both sequences are sorted by the source comparator, so a single forward pass decides for each
/// old entry whether it survives.
pub(crate) fn merge_shortcut_items(
    state: &mut NavigationState,
    shortcuts: &dyn FolderShortcutList,
) -> PermutedEvent {
    let old_shortcuts = std::mem::take(&mut state.shortcut_items);
    let volume_count = state.volume_items.len();
    let mut permutation: Vec<Option<usize>> = (0..volume_count).map(Some).collect();
    let mut merged: Vec<EntryId> = Vec::with_capacity(shortcuts.len());
    let mut old_iter = old_shortcuts.into_iter().peekable();

    for index in 0..shortcuts.len() {
        let Some(entry) = shortcuts.item(index) else {
            logging::warn!(
                "shortcut source has no item at index {index} of {}",
                shortcuts.len()
            );
            continue;
        };

        let mut reused = None;
        while let Some(&old_id) = old_iter.peek() {
            let ordering = state
                .get(old_id)
                .and_then(|item| item.shortcut_entry())
                .map_or(Ordering::Greater, |old| shortcuts.compare(&entry, old));
            match ordering {
                Ordering::Greater => {
                    old_iter.next();
                    state.evict(old_id);
                    permutation.push(None);
                }
                Ordering::Equal => {
                    old_iter.next();
                    permutation.push(Some(volume_count + merged.len()));
                    reused = Some(old_id);
                    break;
                }
                Ordering::Less => break,
            }
        }

        let id = match reused {
            Some(id) => id,
            None => state.insert_shortcut(entry),
        };
        merged.push(id);
    }

    for old_id in old_iter {
        state.evict(old_id);
        permutation.push(None);
    }

    let new_length = volume_count + merged.len();
    state.shortcut_items = merged;
    PermutedEvent {
        permutation,
        new_length,
    }
}
