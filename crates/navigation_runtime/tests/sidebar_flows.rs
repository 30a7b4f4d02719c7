use std::{cell::RefCell, rc::Rc};

use futures::executor::block_on;
use navigation_contract::{
    MemoryFolderShortcutList, MemoryPrefsStore, MemoryVolumeList, NavigationLayout,
    PermutedEvent, ShortcutEntry, VolumeId, VolumeInfo, VolumeType,
};
use navigation_runtime::{
    load_navigation_options, persist_navigation_layout, EntryListChild, ItemSeed,
    NavigationItemType, NavigationListModel, NavigationSection,
};

fn volume(id: &str, volume_type: VolumeType, label: &str) -> VolumeInfo {
    VolumeInfo::new(id, volume_type, label)
}

fn labels(model: &NavigationListModel) -> Vec<String> {
    model
        .items()
        .iter()
        .map(|item| item.label().to_string())
        .collect()
}

fn sidebar(
    volumes: &MemoryVolumeList,
    shortcuts: &MemoryFolderShortcutList,
    layout: NavigationLayout,
) -> NavigationListModel {
    let store = MemoryPrefsStore::default();
    block_on(persist_navigation_layout(&store, layout)).expect("persist layout");
    let options = block_on(load_navigation_options(&store)).with_my_files_label("My files");
    NavigationListModel::new(
        Rc::new(volumes.clone()),
        Rc::new(shortcuts.clone()),
        Some(ItemSeed::recent("Recent")),
        Some(ItemSeed::menu(
            "Add new services",
            "#add-new-services-menu",
            "add",
        )),
        &options,
    )
}

#[test]
fn flat_sidebar_follows_mounts_and_shortcut_edits() {
    let volumes = MemoryVolumeList::new(vec![
        volume("drive", VolumeType::Drive, "Google Drive"),
        volume("downloads", VolumeType::Downloads, "Downloads"),
    ]);
    let shortcuts = MemoryFolderShortcutList::new(vec![ShortcutEntry::from_path("/Downloads/a")]);
    let model = sidebar(&volumes, &shortcuts, NavigationLayout::Flat);
    let events = Rc::new(RefCell::new(Vec::<PermutedEvent>::new()));
    let sink = events.clone();
    model.subscribe(Rc::new(move |event: &PermutedEvent| {
        sink.borrow_mut().push(event.clone())
    }));

    assert_eq!(
        labels(&model),
        vec!["Google Drive", "Downloads", "Recent", "a", "Add new services"]
    );

    volumes.push(volume("usb", VolumeType::Removable, "USB"));
    shortcuts.add(ShortcutEntry::from_path("/Downloads/b"));
    volumes.remove(&VolumeId::new("drive"));

    assert_eq!(
        labels(&model),
        vec!["Downloads", "Recent", "USB", "a", "b", "Add new services"]
    );
    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2].permutation[0], None);
    assert_eq!(events[2].new_length, model.len());
}

#[test]
fn nested_sidebar_groups_my_files_and_tracks_linux_files() {
    let volumes = MemoryVolumeList::new(vec![
        volume("downloads", VolumeType::Downloads, "Downloads"),
        volume("usb", VolumeType::Removable, "USB"),
        volume("drive", VolumeType::Drive, "Google Drive"),
    ]);
    let shortcuts = MemoryFolderShortcutList::default();
    let model = sidebar(&volumes, &shortcuts, NavigationLayout::Nested);
    model.set_linux_files_item(Some(ItemSeed::linux_files("Linux files")));

    assert_eq!(
        labels(&model),
        vec!["Recent", "My files", "USB", "Google Drive", "Add new services"]
    );
    let sections: Vec<NavigationSection> =
        model.items().iter().map(|item| item.section()).collect();
    assert_eq!(
        sections,
        vec![
            NavigationSection::Top,
            NavigationSection::MyFiles,
            NavigationSection::Removable,
            NavigationSection::Cloud,
            NavigationSection::Top,
        ]
    );

    let my_files = model.my_files_item().expect("my files");
    let children = my_files.entry_list().expect("entry list").children().to_vec();
    assert_eq!(children.len(), 2);
    assert!(matches!(children[1], EntryListChild::Placeholder { .. }));

    volumes.push(volume("crostini", VolumeType::Crostini, "Linux files"));
    let my_files_after = model.my_files_item().expect("my files");
    assert_eq!(my_files_after.id(), my_files.id());
    assert_eq!(
        my_files_after
            .entry_list()
            .expect("entry list")
            .children()
            .iter()
            .filter_map(EntryListChild::volume_id)
            .map(VolumeId::as_str)
            .collect::<Vec<_>>(),
        vec!["downloads", "crostini"]
    );
    assert_eq!(model.len(), 5);
}

#[test]
fn stale_shortcut_is_dropped_through_not_found_error() {
    let volumes = MemoryVolumeList::new(vec![volume(
        "downloads",
        VolumeType::Downloads,
        "Downloads",
    )]);
    let shortcuts = MemoryFolderShortcutList::new(vec![
        ShortcutEntry::from_path("/Downloads/keep"),
        ShortcutEntry::from_path("/Downloads/missing"),
    ]);
    let model = sidebar(&volumes, &shortcuts, NavigationLayout::Flat);
    let missing = model
        .folder_shortcut_list()
        .into_iter()
        .find(|item| item.label() == "missing")
        .expect("missing shortcut");
    assert_eq!(missing.item_type(), NavigationItemType::Shortcut);

    model
        .on_item_not_found_error(missing.id())
        .expect("shortcut owned by model");

    assert_eq!(
        labels(&model),
        vec!["Downloads", "Recent", "keep", "Add new services"]
    );
    assert_eq!(model.index_of(missing.id(), 0), None);
}
