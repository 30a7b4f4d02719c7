//! Host-facing contracts for the file-browser navigation sidebar.
//!
//! This crate is runtime-agnostic. It defines the volume and folder-shortcut models the host
//! reports, the `permuted` change notification shared by every ordered list, the source-list
//! traits the navigation engine reads from, in-memory source adapters, and navigation
//! preference storage. The engine itself lives in `navigation_runtime`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod events;
pub mod prefs;
pub mod shortcut;
pub mod sources;
pub mod volume;

pub use events::{
    permutation_by_key, PermutedEvent, PermutedListener, PermutedListeners, SubscriptionId,
};
pub use prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NavigationLayout, NavigationPrefs,
    NoopPrefsStore, PrefsError, PrefsStore, PrefsStoreFuture, NAVIGATION_PREFS_KEY,
};
pub use shortcut::ShortcutEntry;
pub use sources::{
    memory::{MemoryFolderShortcutList, MemoryVolumeList},
    FolderShortcutList, VolumeList,
};
pub use volume::{RootType, UnknownVolumeType, VolumeId, VolumeInfo, VolumeType};
