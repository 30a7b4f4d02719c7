//! Synthetic grouping entry (My Files) that owns other roots as children.

use navigation_contract::{RootType, VolumeId, VolumeInfo, VolumeType};
use serde::{Deserialize, Serialize};

use crate::model::EntryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// Child root of an [`EntryList`].
pub enum EntryListChild {
    /// Mounted volume folded into the grouping.
    Volume(VolumeInfo),
    /// Synthetic navigation entry (the Linux files placeholder).
    Placeholder {
        /// Engine entry the child stands for.
        entry_id: EntryId,
    },
}

impl EntryListChild {
    /// Volume handle of a volume child.
    pub fn volume_id(&self) -> Option<&VolumeId> {
        match self {
            Self::Volume(volume) => Some(&volume.volume_id),
            Self::Placeholder { .. } => None,
        }
    }

    /// Volume type of a volume child.
    pub fn volume_type(&self) -> Option<VolumeType> {
        match self {
            Self::Volume(volume) => Some(volume.volume_type),
            Self::Placeholder { .. } => None,
        }
    }

    fn same_child(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Volume(a), Self::Volume(b)) => a.volume_id == b.volume_id,
            (Self::Placeholder { entry_id: a }, Self::Placeholder { entry_id: b }) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Ordered, duplicate-free set of child roots under a synthetic root.
///
/// Volume children are matched by volume handle, placeholders by entry id.
pub struct EntryList {
    label: String,
    root_type: RootType,
    children: Vec<EntryListChild>,
}

impl EntryList {
    /// Creates an empty grouping.
    pub fn new(label: impl Into<String>, root_type: RootType) -> Self {
        Self {
            label: label.into(),
            root_type,
            children: Vec::new(),
        }
    }

    /// Grouping label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Synthetic root type of the grouping.
    pub fn root_type(&self) -> RootType {
        self.root_type
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[EntryListChild] {
        &self.children
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` when the grouping has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends `child` unless an equivalent child is already present.
    ///
    /// Returns `true` when the child was added.
    pub fn add_entry(&mut self, child: EntryListChild) -> bool {
        if self.contains_entry(&child) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Removes the child equivalent to `child`. Returns `true` when a child was removed.
    pub fn remove_entry(&mut self, child: &EntryListChild) -> bool {
        match self.children.iter().position(|c| c.same_child(child)) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the first volume child of `volume_type`. Returns `true` when a child was removed.
    pub fn remove_by_volume_type(&mut self, volume_type: VolumeType) -> bool {
        match self
            .children
            .iter()
            .position(|c| c.volume_type() == Some(volume_type))
        {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` when an equivalent child is present.
    pub fn contains_entry(&self, child: &EntryListChild) -> bool {
        self.children.iter().any(|c| c.same_child(child))
    }

    /// Index of the child wrapping the volume with handle `volume_id`.
    pub fn find_index_by_volume_id(&self, volume_id: &VolumeId) -> Option<usize> {
        self.children
            .iter()
            .position(|c| c.volume_id() == Some(volume_id))
    }
}
