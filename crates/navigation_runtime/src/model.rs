//! Navigation entry types shared by the engine state, reorder policies, and the list model.

use navigation_contract::{RootType, ShortcutEntry, VolumeInfo};
use serde::{Deserialize, Serialize};

use crate::entry_list::EntryList;

/// Stable identity of a navigation entry.
///
/// Two entries are the same entry exactly when their ids match. Ids are never reused within one
/// engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
/// Visual grouping of sidebar entries.
pub enum NavigationSection {
    /// Recent and shortcuts.
    #[default]
    Top,
    /// The My Files grouping.
    MyFiles,
    /// Archives, MTP devices, media views and removable media.
    Removable,
    /// Drive and file system providers.
    Cloud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Coarse entry type reported to sidebar renderers.
pub enum NavigationItemType {
    /// Folder shortcut.
    Shortcut,
    /// Mounted volume.
    Volume,
    /// Menu button.
    Menu,
    /// Recent files root.
    Recent,
    /// Linux files placeholder.
    Crostini,
    /// Grouping of other roots.
    EntryList,
    /// Label-only action.
    MenuAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Menu opened by a menu entry.
pub struct MenuTarget {
    /// Selector of the menu element.
    pub menu: String,
    /// Icon name shown on the button.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// Per-variant payload of a navigation entry.
pub enum NavigationItemKind {
    /// Mounted volume.
    Volume(VolumeInfo),
    /// Folder shortcut.
    Shortcut(ShortcutEntry),
    /// Menu button.
    Menu(MenuTarget),
    /// Synthetic root (Recent, Linux files placeholder).
    Fake {
        /// Synthetic root type.
        root_type: RootType,
    },
    /// Grouping with child roots (My Files).
    EntryList(EntryList),
    /// Label-only action such as "add new service".
    MenuAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Entry in the derived navigation list.
pub struct NavigationItem {
    id: EntryId,
    label: String,
    section: NavigationSection,
    original_order: Option<usize>,
    kind: NavigationItemKind,
}

impl NavigationItem {
    pub(crate) fn new(id: EntryId, label: impl Into<String>, kind: NavigationItemKind) -> Self {
        Self {
            id,
            label: label.into(),
            section: NavigationSection::Top,
            original_order: None,
            kind,
        }
    }

    /// Stable identity of this entry.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// User-facing label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Section assigned by the last reorder.
    pub fn section(&self) -> NavigationSection {
        self.section
    }

    /// Index of this entry's volume in the volume source at the last reorder.
    pub fn original_order(&self) -> Option<usize> {
        self.original_order
    }

    /// Variant payload.
    pub fn kind(&self) -> &NavigationItemKind {
        &self.kind
    }

    /// Coarse entry type derived from the payload.
    pub fn item_type(&self) -> NavigationItemType {
        match &self.kind {
            NavigationItemKind::Volume(_) => NavigationItemType::Volume,
            NavigationItemKind::Shortcut(_) => NavigationItemType::Shortcut,
            NavigationItemKind::Menu(_) => NavigationItemType::Menu,
            NavigationItemKind::Fake {
                root_type: RootType::Recent,
            } => NavigationItemType::Recent,
            NavigationItemKind::Fake {
                root_type: RootType::Crostini,
            } => NavigationItemType::Crostini,
            NavigationItemKind::Fake {
                root_type: RootType::MyFiles,
            }
            | NavigationItemKind::EntryList(_) => NavigationItemType::EntryList,
            NavigationItemKind::MenuAction => NavigationItemType::MenuAction,
        }
    }

    /// Volume payload, for volume entries.
    pub fn volume_info(&self) -> Option<&VolumeInfo> {
        match &self.kind {
            NavigationItemKind::Volume(volume) => Some(volume),
            _ => None,
        }
    }

    /// Directory payload, for shortcut entries.
    pub fn shortcut_entry(&self) -> Option<&ShortcutEntry> {
        match &self.kind {
            NavigationItemKind::Shortcut(entry) => Some(entry),
            _ => None,
        }
    }

    /// Child set, for grouping entries.
    pub fn entry_list(&self) -> Option<&EntryList> {
        match &self.kind {
            NavigationItemKind::EntryList(list) => Some(list),
            _ => None,
        }
    }

    pub(crate) fn entry_list_mut(&mut self) -> Option<&mut EntryList> {
        match &mut self.kind {
            NavigationItemKind::EntryList(list) => Some(list),
            _ => None,
        }
    }

    pub(crate) fn set_section(&mut self, section: NavigationSection) {
        self.section = section;
    }

    pub(crate) fn set_original_order(&mut self, order: usize) {
        self.original_order = Some(order);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Caller-built singleton entry handed to the engine, which assigns its [`EntryId`].
pub struct ItemSeed {
    label: String,
    kind: NavigationItemKind,
}

impl ItemSeed {
    /// Recent files root.
    pub fn recent(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NavigationItemKind::Fake {
                root_type: RootType::Recent,
            },
        }
    }

    /// Linux files placeholder, shown until the container volume is mounted.
    pub fn linux_files(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NavigationItemKind::Fake {
                root_type: RootType::Crostini,
            },
        }
    }

    /// Menu button opening `menu`.
    pub fn menu(label: impl Into<String>, menu: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NavigationItemKind::Menu(MenuTarget {
                menu: menu.into(),
                icon: icon.into(),
            }),
        }
    }

    /// Label-only action.
    pub fn menu_action(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NavigationItemKind::MenuAction,
        }
    }

    pub(crate) fn into_item(self, id: EntryId) -> NavigationItem {
        NavigationItem::new(id, self.label, self.kind)
    }
}
