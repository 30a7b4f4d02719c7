//! Navigation sidebar engine: merges mounted volumes and folder shortcuts into one ordered list.

pub mod config;
mod diff;
pub mod entry_list;
pub mod list_model;
pub mod model;
mod reorder;
pub mod state;

pub use config::{
    load_navigation_options, persist_navigation_layout, NavigationOptions,
    DEFAULT_MY_FILES_LABEL,
};
pub use entry_list::{EntryList, EntryListChild};
pub use list_model::NavigationListModel;
pub use model::{
    EntryId, ItemSeed, MenuTarget, NavigationItem, NavigationItemKind, NavigationItemType,
    NavigationSection,
};
pub use state::{NavigationChange, NavigationError, NavigationState};
