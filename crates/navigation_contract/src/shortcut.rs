//! Folder shortcut entries pinned by the user.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Directory reference backing a folder shortcut.
pub struct ShortcutEntry {
    /// Base name of the directory, used as the shortcut label.
    pub name: String,
    /// Full normalized path of the directory.
    pub full_path: String,
}

impl ShortcutEntry {
    /// Creates a shortcut entry from a full path, deriving the name from the last segment.
    pub fn from_path(full_path: impl Into<String>) -> Self {
        let full_path = full_path.into();
        let name = full_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("/")
            .to_string();
        Self { name, full_path }
    }

    /// Total order used by shortcut lists sorted by path.
    pub fn compare_paths(&self, other: &Self) -> Ordering {
        self.full_path.cmp(&other.full_path)
    }
}
