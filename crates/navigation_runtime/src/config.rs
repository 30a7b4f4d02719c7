//! Engine options and their loading from persisted navigation preferences.

use leptos::logging;
use navigation_contract::{
    load_pref_with, save_pref_with, NavigationLayout, NavigationPrefs, PrefsError, PrefsStore,
    NAVIGATION_PREFS_KEY,
};

/// Label of the My Files grouping when the host supplies none.
pub const DEFAULT_MY_FILES_LABEL: &str = "My files";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Construction options for the navigation engine.
pub struct NavigationOptions {
    /// Flat or nested sidebar layout.
    pub layout: NavigationLayout,
    /// Localized label of the My Files grouping.
    pub my_files_label: String,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            layout: NavigationLayout::Flat,
            my_files_label: DEFAULT_MY_FILES_LABEL.to_string(),
        }
    }
}

impl NavigationOptions {
    /// Default options with the nested layout.
    pub fn nested() -> Self {
        Self {
            layout: NavigationLayout::Nested,
            ..Self::default()
        }
    }

    /// Options derived from persisted preferences.
    pub fn from_prefs(prefs: &NavigationPrefs) -> Self {
        Self {
            layout: prefs.layout,
            ..Self::default()
        }
    }

    /// Replaces the My Files label.
    pub fn with_my_files_label(mut self, label: impl Into<String>) -> Self {
        self.my_files_label = label.into();
        self
    }
}

/// Loads engine options from `store`, falling back to defaults when nothing usable is stored.
pub async fn load_navigation_options<S: PrefsStore + ?Sized>(store: &S) -> NavigationOptions {
    match load_pref_with::<S, NavigationPrefs>(store, NAVIGATION_PREFS_KEY).await {
        Ok(Some(prefs)) => NavigationOptions::from_prefs(&prefs),
        Ok(None) => NavigationOptions::default(),
        Err(err) => {
            logging::warn!("navigation prefs load failed: {err}");
            NavigationOptions::default()
        }
    }
}

/// Persists the sidebar layout preference.
///
/// # Errors
///
/// Returns [`PrefsError`] when the store rejects the write.
pub async fn persist_navigation_layout<S: PrefsStore + ?Sized>(
    store: &S,
    layout: NavigationLayout,
) -> Result<(), PrefsError> {
    save_pref_with(store, NAVIGATION_PREFS_KEY, &NavigationPrefs { layout }).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use navigation_contract::{MemoryPrefsStore, NoopPrefsStore, PrefsStoreFuture};
    use pretty_assertions::assert_eq;

    use super::*;

    struct FailingPrefsStore;

    impl PrefsStore for FailingPrefsStore {
        fn load_pref<'a>(
            &'a self,
            _key: &'a str,
        ) -> PrefsStoreFuture<'a, Result<Option<String>, PrefsError>> {
            Box::pin(async { Err(PrefsError::Store("storage offline".to_string())) })
        }

        fn save_pref<'a>(
            &'a self,
            _key: &'a str,
            _raw_json: &'a str,
        ) -> PrefsStoreFuture<'a, Result<(), PrefsError>> {
            Box::pin(async { Err(PrefsError::Store("storage offline".to_string())) })
        }
    }

    #[test]
    fn persisted_layout_is_loaded_back() {
        let store = MemoryPrefsStore::default();
        block_on(persist_navigation_layout(&store, NavigationLayout::Nested)).expect("persist");

        let options = block_on(load_navigation_options(&store));
        assert_eq!(options, NavigationOptions::nested());
    }

    #[test]
    fn missing_or_failing_prefs_fall_back_to_defaults() {
        assert_eq!(
            block_on(load_navigation_options(&NoopPrefsStore)),
            NavigationOptions::default()
        );
        assert_eq!(
            block_on(load_navigation_options(&FailingPrefsStore)),
            NavigationOptions::default()
        );
        let err = block_on(persist_navigation_layout(
            &FailingPrefsStore,
            NavigationLayout::Flat,
        ))
        .expect_err("write should fail");
        assert_eq!(err.to_string(), "prefs store failed: storage offline");
    }

    #[test]
    fn my_files_label_can_be_localized() {
        let options = NavigationOptions::nested().with_my_files_label("Meine Dateien");
        assert_eq!(options.my_files_label, "Meine Dateien");
        assert_eq!(options.layout, NavigationLayout::Nested);
    }
}
