//! Navigation engine state: the entry arena, source arrays, singletons, and the derived list.
//!
//! [`NavigationState`] is a plain value with synchronous transitions. Each transition rebuilds
//! the affected source array, recomputes the derived order, and returns a [`NavigationChange`]
//! describing both permutations. Wiring to live sources happens in
//! [`crate::list_model::NavigationListModel`].

use std::collections::BTreeMap;

use navigation_contract::{
    permutation_by_key, FolderShortcutList, NavigationLayout, PermutedEvent, RootType,
    ShortcutEntry, VolumeInfo, VolumeList,
};
use thiserror::Error;

use crate::{
    config::NavigationOptions,
    diff,
    entry_list::EntryList,
    model::{EntryId, ItemSeed, NavigationItem, NavigationItemKind, NavigationSection},
    reorder,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors for requests the engine cannot route.
pub enum NavigationError {
    /// The entry id does not belong to this engine (or was already evicted).
    #[error("navigation entry {0:?} not found")]
    UnknownEntry(EntryId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of one recompute.
pub struct NavigationChange {
    /// Combined permutation over `volumes ++ shortcuts`.
    pub roots: PermutedEvent,
    /// Permutation over the derived navigation list, as delivered to subscribers.
    pub items: PermutedEvent,
}

#[derive(Debug, Clone)]
/// Engine state for one sidebar.
pub struct NavigationState {
    pub(crate) layout: NavigationLayout,
    pub(crate) my_files_label: String,
    pub(crate) entries: BTreeMap<EntryId, NavigationItem>,
    next_id: u64,
    pub(crate) volume_items: Vec<EntryId>,
    pub(crate) shortcut_items: Vec<EntryId>,
    pub(crate) navigation_items: Vec<EntryId>,
    pub(crate) recent_item: Option<EntryId>,
    pub(crate) linux_files_item: Option<EntryId>,
    pub(crate) add_new_services_item: Option<EntryId>,
    pub(crate) my_files_item: Option<EntryId>,
}

impl NavigationState {
    /// Builds entries for the current contents of both sources and computes the initial order.
    pub fn new(
        volumes: &dyn VolumeList,
        shortcuts: &dyn FolderShortcutList,
        recent: Option<ItemSeed>,
        add_new_services: Option<ItemSeed>,
        options: &NavigationOptions,
    ) -> Self {
        let mut state = Self {
            layout: options.layout,
            my_files_label: options.my_files_label.clone(),
            entries: BTreeMap::new(),
            next_id: 0,
            volume_items: Vec::new(),
            shortcut_items: Vec::new(),
            navigation_items: Vec::new(),
            recent_item: None,
            linux_files_item: None,
            add_new_services_item: None,
            my_files_item: None,
        };

        state.recent_item = recent.map(|seed| state.insert_seed(seed));
        state.add_new_services_item = add_new_services.map(|seed| state.insert_seed(seed));
        state.volume_items = (0..volumes.len())
            .filter_map(|index| volumes.item(index))
            .map(|volume| state.insert_volume(volume))
            .collect();
        state.shortcut_items = (0..shortcuts.len())
            .filter_map(|index| shortcuts.item(index))
            .map(|entry| state.insert_shortcut(entry))
            .collect();

        reorder::reorder_navigation_items(&mut state);
        state
    }

    /// Applies a structural change of the volume source.
    pub fn apply_volume_permuted(
        &mut self,
        volumes: &dyn VolumeList,
        event: &PermutedEvent,
    ) -> NavigationChange {
        let previous = self.navigation_items.clone();
        let roots = diff::rebuild_volume_items(self, volumes, event);
        self.finish(previous, roots)
    }

    /// Rebuilds the volume entries from the source's current contents, keeping entries whose
    /// volume handle is still mounted. Recovers from notifications that could not be applied.
    pub fn resync_volume_items(&mut self, volumes: &dyn VolumeList) -> NavigationChange {
        let previous = self.navigation_items.clone();
        let roots = diff::resync_volume_items(self, volumes);
        self.finish(previous, roots)
    }

    /// Applies a structural change of the shortcut source by merging against its new contents.
    pub fn apply_shortcut_permuted(&mut self, shortcuts: &dyn FolderShortcutList) -> NavigationChange {
        let previous = self.navigation_items.clone();
        let roots = diff::merge_shortcut_items(self, shortcuts);
        self.finish(previous, roots)
    }

    /// Installs, replaces, or clears the Linux files placeholder and reorders.
    pub fn set_linux_files_item(&mut self, seed: Option<ItemSeed>) -> NavigationChange {
        let previous = self.navigation_items.clone();
        if let Some(old) = self.linux_files_item.take() {
            reorder::drop_placeholder_child(self, old);
            self.evict(old);
        }
        self.linux_files_item = seed.map(|seed| self.insert_seed(seed));
        let roots = PermutedEvent::identity(self.volume_items.len() + self.shortcut_items.len());
        self.finish(previous, roots)
    }

    fn finish(&mut self, previous: Vec<EntryId>, roots: PermutedEvent) -> NavigationChange {
        reorder::reorder_navigation_items(self);
        NavigationChange {
            roots,
            items: permutation_by_key(&previous, &self.navigation_items),
        }
    }

    /// Layout this engine orders for.
    pub fn layout(&self) -> NavigationLayout {
        self.layout
    }

    /// Length of the derived list.
    pub fn len(&self) -> usize {
        self.navigation_items.len()
    }

    /// Returns `true` when the derived list is empty.
    pub fn is_empty(&self) -> bool {
        self.navigation_items.is_empty()
    }

    /// Entry at `index` of the derived list.
    pub fn item(&self, index: usize) -> Option<&NavigationItem> {
        self.navigation_items
            .get(index)
            .and_then(|id| self.entries.get(id))
    }

    /// Any entry owned by this engine, including My Files children and off-list singletons.
    pub fn get(&self, id: EntryId) -> Option<&NavigationItem> {
        self.entries.get(&id)
    }

    /// Index of `id` in the derived list, searching from `from_index`.
    pub fn index_of(&self, id: EntryId, from_index: usize) -> Option<usize> {
        self.navigation_items
            .iter()
            .enumerate()
            .skip(from_index)
            .find_map(|(index, candidate)| (*candidate == id).then_some(index))
    }

    /// Ids of the derived list in display order.
    pub fn item_ids(&self) -> &[EntryId] {
        &self.navigation_items
    }

    /// Entries of the derived list in display order.
    pub fn items(&self) -> impl Iterator<Item = &NavigationItem> + '_ {
        self.navigation_items
            .iter()
            .filter_map(|id| self.entries.get(id))
    }

    /// Volume entries in volume-source order.
    pub fn volume_items(&self) -> impl Iterator<Item = &NavigationItem> + '_ {
        self.volume_items.iter().filter_map(|id| self.entries.get(id))
    }

    /// Shortcut entries in shortcut-source order.
    pub fn folder_shortcut_items(&self) -> impl Iterator<Item = &NavigationItem> + '_ {
        self.shortcut_items
            .iter()
            .filter_map(|id| self.entries.get(id))
    }

    /// My Files grouping, once the nested layout has created it.
    pub fn my_files_item(&self) -> Option<&NavigationItem> {
        self.my_files_item.and_then(|id| self.entries.get(&id))
    }

    /// Recent singleton, when supplied.
    pub fn recent_item(&self) -> Option<&NavigationItem> {
        self.recent_item.and_then(|id| self.entries.get(&id))
    }

    /// Linux files placeholder, when installed.
    pub fn linux_files_item(&self) -> Option<&NavigationItem> {
        self.linux_files_item.and_then(|id| self.entries.get(&id))
    }

    /// Add-new-services singleton, when supplied.
    pub fn add_new_services_item(&self) -> Option<&NavigationItem> {
        self.add_new_services_item
            .and_then(|id| self.entries.get(&id))
    }

    fn allocate(&mut self, item: impl FnOnce(EntryId) -> NavigationItem) -> EntryId {
        self.next_id += 1;
        let id = EntryId(self.next_id);
        self.entries.insert(id, item(id));
        id
    }

    fn insert_seed(&mut self, seed: ItemSeed) -> EntryId {
        self.allocate(|id| seed.into_item(id))
    }

    pub(crate) fn insert_volume(&mut self, volume: VolumeInfo) -> EntryId {
        self.allocate(|id| {
            NavigationItem::new(id, volume.label.clone(), NavigationItemKind::Volume(volume))
        })
    }

    pub(crate) fn insert_shortcut(&mut self, entry: ShortcutEntry) -> EntryId {
        self.allocate(|id| {
            NavigationItem::new(id, entry.name.clone(), NavigationItemKind::Shortcut(entry))
        })
    }

    pub(crate) fn ensure_my_files(&mut self) -> EntryId {
        if let Some(id) = self.my_files_item {
            return id;
        }
        let label = self.my_files_label.clone();
        let id = self.allocate(|id| {
            let mut item = NavigationItem::new(
                id,
                label.clone(),
                NavigationItemKind::EntryList(EntryList::new(label, RootType::MyFiles)),
            );
            item.set_section(NavigationSection::MyFiles);
            item
        });
        self.my_files_item = Some(id);
        id
    }

    pub(crate) fn evict(&mut self, id: EntryId) {
        self.entries.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use navigation_contract::{
        MemoryFolderShortcutList, MemoryVolumeList, VolumeId, VolumeType,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{entry_list::EntryListChild, model::NavigationItemType};

    fn volume(id: &str, volume_type: VolumeType) -> VolumeInfo {
        VolumeInfo::new(id, volume_type, id)
    }

    fn shortcuts(paths: &[&str]) -> MemoryFolderShortcutList {
        MemoryFolderShortcutList::new(paths.iter().map(|p| ShortcutEntry::from_path(*p)).collect())
    }

    fn labels(state: &NavigationState) -> Vec<String> {
        state.items().map(|item| item.label().to_string()).collect()
    }

    #[test]
    fn flat_layout_places_recent_right_after_downloads() {
        let volumes = MemoryVolumeList::new(vec![
            volume("Drive", VolumeType::Drive),
            volume("Downloads", VolumeType::Downloads),
            volume("Removable1", VolumeType::Removable),
        ]);
        let shortcut_list = shortcuts(&["/S1", "/S2"]);
        let state = NavigationState::new(
            &volumes,
            &shortcut_list,
            Some(ItemSeed::recent("R")),
            None,
            &NavigationOptions::default(),
        );

        assert_eq!(
            labels(&state),
            vec!["Drive", "Downloads", "R", "Removable1", "S1", "S2"]
        );
        assert_eq!(state.len(), 3 + 2 + 1);
    }

    #[test]
    fn nested_layout_groups_downloads_and_linux_placeholder() {
        let volumes = MemoryVolumeList::new(vec![
            volume("Downloads", VolumeType::Downloads),
            volume("Removable1", VolumeType::Removable),
            volume("Drive1", VolumeType::Drive),
        ]);
        let shortcut_list = shortcuts(&[]);
        let mut state = NavigationState::new(
            &volumes,
            &shortcut_list,
            Some(ItemSeed::recent("R")),
            None,
            &NavigationOptions::nested().with_my_files_label("MyFiles"),
        );
        let linux_change = state.set_linux_files_item(Some(ItemSeed::linux_files("Linux files")));
        assert!(linux_change.items.is_identity());

        assert_eq!(labels(&state), vec!["R", "MyFiles", "Removable1", "Drive1"]);
        let linux_id = state.linux_files_item().expect("linux item").id();
        let my_files = state.my_files_item().expect("my files");
        assert_eq!(my_files.section(), NavigationSection::MyFiles);
        assert_eq!(
            my_files.entry_list().expect("entry list").children(),
            &[
                EntryListChild::Volume(volume("Downloads", VolumeType::Downloads)),
                EntryListChild::Placeholder { entry_id: linux_id },
            ]
        );
        let sections: Vec<NavigationSection> = state.items().map(|i| i.section()).collect();
        assert_eq!(
            sections,
            vec![
                NavigationSection::Top,
                NavigationSection::MyFiles,
                NavigationSection::Removable,
                NavigationSection::Cloud,
            ]
        );
    }

    #[test]
    fn volume_removal_marks_old_index_removed_and_shifts_the_rest() {
        let volumes = MemoryVolumeList::new(vec![
            volume("Downloads", VolumeType::Downloads),
            volume("usb", VolumeType::Removable),
            volume("Drive", VolumeType::Drive),
        ]);
        let shortcut_list = shortcuts(&["/a"]);
        let mut state = NavigationState::new(
            &volumes,
            &shortcut_list,
            None,
            None,
            &NavigationOptions::default(),
        );
        let before: Vec<EntryId> = state.item_ids().to_vec();

        let event = PermutedEvent {
            permutation: vec![Some(0), None, Some(1)],
            new_length: 2,
        };
        volumes.replace_all(vec![
            volume("Downloads", VolumeType::Downloads),
            volume("Drive", VolumeType::Drive),
        ]);
        let change = state.apply_volume_permuted(&volumes, &event);

        assert_eq!(
            change.roots.permutation,
            vec![Some(0), None, Some(1), Some(2)]
        );
        assert_eq!(change.roots.new_length, 3);
        assert_eq!(change.items.permutation, vec![Some(0), None, Some(1), Some(2)]);
        assert_eq!(change.items.new_length, state.len());
        assert!(state.get(before[1]).is_none());
        assert_eq!(state.item_ids(), &[before[0], before[2], before[3]]);
    }

    #[test]
    fn volume_insert_reuses_existing_entries_and_creates_the_new_one() {
        let volumes = MemoryVolumeList::new(vec![
            volume("Downloads", VolumeType::Downloads),
            volume("Drive", VolumeType::Drive),
        ]);
        let shortcut_list = shortcuts(&[]);
        let mut state = NavigationState::new(
            &volumes,
            &shortcut_list,
            None,
            None,
            &NavigationOptions::default(),
        );
        let downloads = state.item(0).expect("downloads").id();
        let drive = state.item(1).expect("drive").id();

        volumes.insert(1, volume("usb", VolumeType::Removable));
        let event = PermutedEvent {
            permutation: vec![Some(0), Some(2)],
            new_length: 3,
        };
        state.apply_volume_permuted(&volumes, &event);

        assert_eq!(state.item(0).map(NavigationItem::id), Some(downloads));
        assert_eq!(state.item(2).map(NavigationItem::id), Some(drive));
        let usb = state.item(1).expect("usb");
        assert_eq!(usb.item_type(), NavigationItemType::Volume);
        assert_eq!(usb.volume_info().map(|v| v.volume_id.clone()), Some(VolumeId::new("usb")));
        assert!(usb.id() != downloads && usb.id() != drive);
    }

    #[test]
    fn shortcut_merge_drops_reuses_and_creates() {
        let volumes = MemoryVolumeList::new(vec![volume("Downloads", VolumeType::Downloads)]);
        let shortcut_list = shortcuts(&["/A", "/B", "/C"]);
        let mut state = NavigationState::new(
            &volumes,
            &shortcut_list,
            None,
            None,
            &NavigationOptions::default(),
        );
        let ids: Vec<EntryId> = state.folder_shortcut_items().map(NavigationItem::id).collect();

        shortcut_list.replace_all(vec![
            ShortcutEntry::from_path("/A"),
            ShortcutEntry::from_path("/C"),
            ShortcutEntry::from_path("/D"),
        ]);
        let change = state.apply_shortcut_permuted(&shortcut_list);

        assert_eq!(change.roots.permutation, vec![Some(0), Some(1), None, Some(2)]);
        assert_eq!(change.roots.new_length, 4);
        let merged: Vec<EntryId> = state.folder_shortcut_items().map(NavigationItem::id).collect();
        assert_eq!(merged[0], ids[0]);
        assert_eq!(merged[1], ids[2]);
        assert!(!ids.contains(&merged[2]));
        assert!(state.get(ids[1]).is_none());
        assert_eq!(labels(&state), vec!["Downloads", "A", "C", "D"]);
    }

    #[test]
    fn index_of_honors_from_index_and_identity() {
        let volumes = MemoryVolumeList::new(vec![volume("Downloads", VolumeType::Downloads)]);
        let shortcut_list = shortcuts(&["/a"]);
        let state = NavigationState::new(
            &volumes,
            &shortcut_list,
            None,
            Some(ItemSeed::menu("Add new services", "#add-new-services-menu", "add")),
            &NavigationOptions::default(),
        );
        let services = state.add_new_services_item().expect("services").id();

        assert_eq!(state.index_of(services, 0), Some(2));
        assert_eq!(state.index_of(services, 2), Some(2));
        assert_eq!(state.index_of(services, 3), None);
        assert_eq!(state.index_of(EntryId(999), 0), None);
        assert!(state.item(3).is_none());
    }
}
