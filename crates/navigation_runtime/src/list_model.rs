//! Live navigation list model wired to a volume source and a folder-shortcut source.

use std::{
    cell::{Cell, Ref, RefCell},
    rc::{Rc, Weak},
};

use leptos::logging;
use navigation_contract::{
    FolderShortcutList, NavigationLayout, PermutedEvent, PermutedListener, PermutedListeners,
    SubscriptionId, VolumeList,
};

use crate::{
    config::NavigationOptions,
    model::{EntryId, ItemSeed, NavigationItem},
    state::{NavigationChange, NavigationError, NavigationState},
};

/// Ordered sidebar model that follows its sources and re-emits one `permuted` notification per
/// source change.
///
/// The model owns its entries; readers get clones. State borrows are released before emitting,
/// so listeners may query the model from inside a notification. A source change that arrives
/// while a [`NavigationListModel::state`] guard is alive is deferred and applied by the next
/// query or notification once the guard is gone.
pub struct NavigationListModel {
    shared: Rc<Shared>,
    volumes: Rc<dyn VolumeList>,
    shortcuts: Rc<dyn FolderShortcutList>,
    volume_subscription: SubscriptionId,
    shortcut_subscription: SubscriptionId,
}

/// State reachable from both the model and its source subscriptions.
struct Shared {
    state: RefCell<NavigationState>,
    listeners: PermutedListeners,
    stale_volumes: Cell<bool>,
    stale_shortcuts: Cell<bool>,
    pending_linux_files: RefCell<Option<Option<ItemSeed>>>,
}

impl NavigationListModel {
    /// Builds the model from the current source contents and subscribes to both sources.
    pub fn new(
        volumes: Rc<dyn VolumeList>,
        shortcuts: Rc<dyn FolderShortcutList>,
        recent: Option<ItemSeed>,
        add_new_services: Option<ItemSeed>,
        options: &NavigationOptions,
    ) -> Self {
        let shared = Rc::new(Shared::new(NavigationState::new(
            volumes.as_ref(),
            shortcuts.as_ref(),
            recent,
            add_new_services,
            options,
        )));

        let volume_subscription = volumes.subscribe_permuted(volume_listener(
            Rc::downgrade(&shared),
            Rc::downgrade(&volumes),
            Rc::downgrade(&shortcuts),
        ));
        let shortcut_subscription = shortcuts.subscribe_permuted(shortcut_listener(
            Rc::downgrade(&shared),
            Rc::downgrade(&volumes),
            Rc::downgrade(&shortcuts),
        ));

        Self {
            shared,
            volumes,
            shortcuts,
            volume_subscription,
            shortcut_subscription,
        }
    }

    /// Read access to the engine state.
    ///
    /// Source changes delivered while the guard is alive are deferred until it is dropped.
    pub fn state(&self) -> Ref<'_, NavigationState> {
        self.catch_up();
        self.shared.state.borrow()
    }

    /// Layout the model orders for.
    pub fn layout(&self) -> NavigationLayout {
        self.state().layout()
    }

    /// Entry at `index` of the derived list.
    pub fn item(&self, index: usize) -> Option<NavigationItem> {
        self.state().item(index).cloned()
    }

    /// Length of the derived list.
    pub fn len(&self) -> usize {
        self.state().len()
    }

    /// Returns `true` when the derived list is empty.
    pub fn is_empty(&self) -> bool {
        self.state().is_empty()
    }

    /// Index of `id` in the derived list at or after `from_index`.
    pub fn index_of(&self, id: EntryId, from_index: usize) -> Option<usize> {
        self.state().index_of(id, from_index)
    }

    /// Snapshot of the derived list in display order.
    pub fn items(&self) -> Vec<NavigationItem> {
        self.state().items().cloned().collect()
    }

    /// Shortcut entries in shortcut-source order.
    pub fn folder_shortcut_list(&self) -> Vec<NavigationItem> {
        self.state().folder_shortcut_items().cloned().collect()
    }

    /// My Files grouping entry, once the nested layout has created it.
    pub fn my_files_item(&self) -> Option<NavigationItem> {
        self.state().my_files_item().cloned()
    }

    /// Subscribes to the model's `permuted` notifications.
    pub fn subscribe(&self, listener: PermutedListener) -> SubscriptionId {
        self.shared.listeners.subscribe(listener)
    }

    /// Removes a subscription. Returns `true` when it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.listeners.unsubscribe(id)
    }

    /// Installs or clears the Linux files placeholder, then reorders and notifies.
    ///
    /// While a state guard is alive the update is held back and applied by the next query.
    pub fn set_linux_files_item(&self, seed: Option<ItemSeed>) {
        self.catch_up();
        *self.shared.pending_linux_files.borrow_mut() = Some(seed);
        self.shared.apply_pending_linux_files();
    }

    /// Reports that the directory behind entry `id` no longer exists.
    ///
    /// Shortcut entries forward the removal intent to the shortcut source; other entries are
    /// left alone.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::UnknownEntry`] when `id` is neither in the derived list nor a
    /// shortcut entry of this model.
    pub fn on_item_not_found_error(&self, id: EntryId) -> Result<(), NavigationError> {
        let shortcut = {
            let state = self.state();
            let owned = state.index_of(id, 0).is_some() || state.shortcut_items.contains(&id);
            if !owned {
                return Err(NavigationError::UnknownEntry(id));
            }
            state
                .get(id)
                .and_then(NavigationItem::shortcut_entry)
                .cloned()
        };
        if let Some(entry) = shortcut {
            self.shortcuts.on_item_not_found_error(&entry);
        }
        Ok(())
    }

    fn catch_up(&self) {
        self.shared
            .catch_up(self.volumes.as_ref(), self.shortcuts.as_ref());
    }
}

impl Drop for NavigationListModel {
    fn drop(&mut self) {
        self.volumes.unsubscribe_permuted(self.volume_subscription);
        self.shortcuts
            .unsubscribe_permuted(self.shortcut_subscription);
    }
}

impl Shared {
    fn new(state: NavigationState) -> Self {
        Self {
            state: RefCell::new(state),
            listeners: PermutedListeners::default(),
            stale_volumes: Cell::new(false),
            stale_shortcuts: Cell::new(false),
            pending_linux_files: RefCell::new(None),
        }
    }

    /// Runs one transition unless the state is borrowed, releasing the borrow before returning.
    fn try_transition(
        &self,
        transition: impl FnOnce(&mut NavigationState) -> NavigationChange,
    ) -> Option<NavigationChange> {
        let mut state = self.state.try_borrow_mut().ok()?;
        Some(transition(&mut state))
    }

    fn on_volumes_permuted(
        &self,
        volumes: &dyn VolumeList,
        shortcuts: &dyn FolderShortcutList,
        event: &PermutedEvent,
    ) {
        // After a missed notification the event's old indices no longer match `volume_items`.
        let change = if self.stale_volumes.get() {
            self.try_transition(|state| state.resync_volume_items(volumes))
        } else {
            self.try_transition(|state| state.apply_volume_permuted(volumes, event))
        };
        match change {
            Some(change) => {
                self.stale_volumes.set(false);
                self.listeners.emit(&change.items);
                self.catch_up(volumes, shortcuts);
            }
            None => {
                self.stale_volumes.set(true);
                logging::warn!("navigation state is borrowed; volume change deferred");
            }
        }
    }

    fn on_shortcuts_permuted(&self, volumes: &dyn VolumeList, shortcuts: &dyn FolderShortcutList) {
        match self.try_transition(|state| state.apply_shortcut_permuted(shortcuts)) {
            Some(change) => {
                self.stale_shortcuts.set(false);
                self.listeners.emit(&change.items);
                self.catch_up(volumes, shortcuts);
            }
            None => {
                self.stale_shortcuts.set(true);
                logging::warn!("navigation state is borrowed; shortcut change deferred");
            }
        }
    }

    /// Applies every deferred change the state can take right now.
    fn catch_up(&self, volumes: &dyn VolumeList, shortcuts: &dyn FolderShortcutList) {
        if self.stale_volumes.get() {
            if let Some(change) = self.try_transition(|state| state.resync_volume_items(volumes)) {
                self.stale_volumes.set(false);
                self.listeners.emit(&change.items);
            }
        }
        if self.stale_shortcuts.get() {
            if let Some(change) =
                self.try_transition(|state| state.apply_shortcut_permuted(shortcuts))
            {
                self.stale_shortcuts.set(false);
                self.listeners.emit(&change.items);
            }
        }
        self.apply_pending_linux_files();
    }

    fn apply_pending_linux_files(&self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        let Some(seed) = self.pending_linux_files.borrow_mut().take() else {
            return;
        };
        let change = state.set_linux_files_item(seed);
        drop(state);
        self.listeners.emit(&change.items);
    }
}

fn volume_listener(
    shared: Weak<Shared>,
    volumes: Weak<dyn VolumeList>,
    shortcuts: Weak<dyn FolderShortcutList>,
) -> PermutedListener {
    Rc::new(move |event: &PermutedEvent| {
        let (Some(shared), Some(volumes), Some(shortcuts)) =
            (shared.upgrade(), volumes.upgrade(), shortcuts.upgrade())
        else {
            return;
        };
        shared.on_volumes_permuted(volumes.as_ref(), shortcuts.as_ref(), event);
    })
}

fn shortcut_listener(
    shared: Weak<Shared>,
    volumes: Weak<dyn VolumeList>,
    shortcuts: Weak<dyn FolderShortcutList>,
) -> PermutedListener {
    Rc::new(move |_event: &PermutedEvent| {
        let (Some(shared), Some(volumes), Some(shortcuts)) =
            (shared.upgrade(), volumes.upgrade(), shortcuts.upgrade())
        else {
            return;
        };
        shared.on_shortcuts_permuted(volumes.as_ref(), shortcuts.as_ref());
    })
}
