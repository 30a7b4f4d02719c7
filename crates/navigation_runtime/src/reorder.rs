//! Layout policies that derive the sidebar order from the source arrays and singletons.

use navigation_contract::{NavigationLayout, VolumeInfo, VolumeType};

use crate::{
    entry_list::{EntryList, EntryListChild},
    model::{EntryId, NavigationSection},
    state::NavigationState,
};

/// Volume types that share the removable section, in concatenation order.
const REMOVABLE_SECTION_TYPES: [VolumeType; 4] = [
    VolumeType::MediaView,
    VolumeType::Removable,
    VolumeType::Archive,
    VolumeType::Mtp,
];

/// Rebuilds `navigation_items` for the state's layout.
pub(crate) fn reorder_navigation_items(state: &mut NavigationState) {
    let order = match state.layout {
        NavigationLayout::Flat => flat_navigation_items(state),
        NavigationLayout::Nested => order_and_nest_items(state),
    };
    state.navigation_items = order;
}

/// Removes the placeholder child for `entry_id` from the My Files grouping, if grouped.
pub(crate) fn drop_placeholder_child(state: &mut NavigationState, entry_id: EntryId) {
    let Some(my_files) = state.my_files_item else {
        return;
    };
    if let Some(list) = state
        .entries
        .get_mut(&my_files)
        .and_then(|item| item.entry_list_mut())
    {
        list.remove_entry(&EntryListChild::Placeholder { entry_id });
    }
}

/// Volume entries with their source index, recording that index as `original_order`.
fn indexed_volumes(state: &mut NavigationState) -> Vec<(EntryId, VolumeInfo)> {
    let mut volumes = Vec::with_capacity(state.volume_items.len());
    for (index, id) in state.volume_items.iter().enumerate() {
        let Some(item) = state.entries.get_mut(id) else {
            continue;
        };
        item.set_original_order(index);
        if let Some(volume) = item.volume_info() {
            volumes.push((*id, volume.clone()));
        }
    }
    volumes
}

fn flat_navigation_items(state: &mut NavigationState) -> Vec<EntryId> {
    let volumes = indexed_volumes(state);
    let linux_files_mounted = volumes
        .iter()
        .any(|(_, volume)| volume.volume_type == VolumeType::Crostini);

    let mut order: Vec<EntryId> = volumes.iter().map(|(id, _)| *id).collect();
    if let Some(downloads_index) = volumes
        .iter()
        .position(|(_, volume)| volume.volume_type == VolumeType::Downloads)
    {
        let after_downloads = state.recent_item.into_iter().chain(
            state
                .linux_files_item
                .filter(|_| !linux_files_mounted),
        );
        order.splice(downloads_index + 1..downloads_index + 1, after_downloads);
    }
    order.extend(state.shortcut_items.iter().copied());
    order.extend(state.add_new_services_item);
    order
}

/// Volumes bucketed by type. Single-volume types keep the last occurrence.
#[derive(Default)]
struct VolumeBuckets {
    downloads: Option<(EntryId, VolumeInfo)>,
    android_files: Option<(EntryId, VolumeInfo)>,
    crostini: Option<(EntryId, VolumeInfo)>,
    removable_section: Vec<(usize, EntryId)>,
    drive: Vec<EntryId>,
    provided: Vec<EntryId>,
}

impl VolumeBuckets {
    fn collect(volumes: Vec<(EntryId, VolumeInfo)>) -> Self {
        let mut buckets = Self::default();
        let mut removable_by_type: [Vec<(usize, EntryId)>; 4] = Default::default();
        for (index, (id, volume)) in volumes.into_iter().enumerate() {
            match volume.volume_type {
                VolumeType::Downloads => buckets.downloads = Some((id, volume)),
                VolumeType::AndroidFiles => buckets.android_files = Some((id, volume)),
                VolumeType::Crostini => buckets.crostini = Some((id, volume)),
                VolumeType::Drive => buckets.drive.push(id),
                VolumeType::Provided => buckets.provided.push(id),
                volume_type => match REMOVABLE_SECTION_TYPES
                    .iter()
                    .position(|candidate| *candidate == volume_type)
                {
                    Some(slot) => removable_by_type[slot].push((index, id)),
                    None => panic!("no explicit order for volume type `{volume_type}`"),
                },
            }
        }
        buckets.removable_section = removable_by_type.into_iter().flatten().collect();
        buckets
            .removable_section
            .sort_by_key(|(original_order, _)| *original_order);
        buckets
    }
}

fn order_and_nest_items(state: &mut NavigationState) -> Vec<EntryId> {
    let buckets = VolumeBuckets::collect(indexed_volumes(state));

    let mut order: Vec<EntryId> = state.recent_item.into_iter().collect();
    order.extend(state.shortcut_items.iter().copied());

    let my_files = state.ensure_my_files();
    order.push(my_files);
    sync_my_files_children(state, my_files, &buckets);

    for (_, id) in &buckets.removable_section {
        assign_section(state, *id, NavigationSection::Removable);
        order.push(*id);
    }
    for id in buckets.drive.iter().chain(&buckets.provided) {
        assign_section(state, *id, NavigationSection::Cloud);
        order.push(*id);
    }
    order.extend(state.add_new_services_item);
    order
}

fn sync_my_files_children(state: &mut NavigationState, my_files: EntryId, buckets: &VolumeBuckets) {
    let linux_files_item = state.linux_files_item;
    let Some(list) = state
        .entries
        .get_mut(&my_files)
        .and_then(|item| item.entry_list_mut())
    else {
        return;
    };

    sync_volume_child(list, VolumeType::Downloads, buckets.downloads.as_ref());
    sync_volume_child(list, VolumeType::AndroidFiles, buckets.android_files.as_ref());
    sync_volume_child(list, VolumeType::Crostini, buckets.crostini.as_ref());

    if let Some(entry_id) = linux_files_item {
        let placeholder = EntryListChild::Placeholder { entry_id };
        if buckets.crostini.is_some() {
            list.remove_entry(&placeholder);
        } else {
            list.add_entry(placeholder);
        }
    }
}

fn sync_volume_child(
    list: &mut EntryList,
    volume_type: VolumeType,
    mounted: Option<&(EntryId, VolumeInfo)>,
) {
    match mounted {
        Some((_, volume)) => {
            if list.find_index_by_volume_id(&volume.volume_id).is_none() {
                list.remove_by_volume_type(volume_type);
                list.add_entry(EntryListChild::Volume(volume.clone()));
            }
        }
        None => {
            list.remove_by_volume_type(volume_type);
        }
    }
}

fn assign_section(state: &mut NavigationState, id: EntryId, section: NavigationSection) {
    if let Some(item) = state.entries.get_mut(&id) {
        item.set_section(section);
    }
}
