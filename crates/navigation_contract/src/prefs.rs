//! Navigation preference storage contracts and adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Storage key for [`NavigationPrefs`].
pub const NAVIGATION_PREFS_KEY: &str = "files.navigation.prefs.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Sidebar layout mode.
pub enum NavigationLayout {
    /// Volumes listed as top-level siblings.
    #[default]
    Flat,
    /// Downloads, Android files and Linux files nested under a My Files grouping.
    Nested,
}

impl NavigationLayout {
    /// Stored tag of the layout.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Nested => "nested",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
/// Persisted navigation preferences.
pub struct NavigationPrefs {
    /// Sidebar layout mode.
    pub layout: NavigationLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Preference storage failures.
pub enum PrefsError {
    /// The backing store rejected or failed the operation.
    #[error("prefs store failed: {0}")]
    Store(String),
    /// A stored value could not be (de)serialized.
    #[error("prefs value for `{key}` is invalid: {message}")]
    Invalid {
        /// Preference key.
        key: String,
        /// Serializer error text.
        message: String,
    },
}

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for preference values stored as JSON text per key.
pub trait PrefsStore {
    /// Loads the raw JSON string stored under `key`.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, PrefsError>>;

    /// Stores a raw JSON string under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), PrefsError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store for hosts without preference storage: every sidebar starts in the default layout.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, PrefsError>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), PrefsError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store for previews and tests. Clones share the same values.
pub struct MemoryPrefsStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Store whose navigation prefs already select `layout`.
    pub fn with_layout(layout: NavigationLayout) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert(
            NAVIGATION_PREFS_KEY.to_string(),
            format!("{{\"layout\":\"{}\"}}", layout.as_str()),
        );
        store
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, PrefsError>> {
        let value = self.values.borrow().get(key).cloned();
        Box::pin(async move { Ok(value) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), PrefsError>> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Box::pin(async { Ok(()) })
    }
}

/// Loads and deserializes a typed preference value.
///
/// # Errors
///
/// Returns [`PrefsError`] when the store fails or the stored JSON does not match `T`.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, PrefsError> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| PrefsError::Invalid {
            key: key.to_string(),
            message: err.to_string(),
        })
}

/// Serializes and saves a typed preference value.
///
/// # Errors
///
/// Returns [`PrefsError`] when serialization or the store save fails.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), PrefsError> {
    let raw = serde_json::to_string(value).map_err(|err| PrefsError::Invalid {
        key: key.to_string(),
        message: err.to_string(),
    })?;
    store.save_pref(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn navigation_prefs_default_to_flat_and_tolerate_missing_fields() {
        assert_eq!(NavigationPrefs::default().layout, NavigationLayout::Flat);
        let prefs: NavigationPrefs = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(prefs, NavigationPrefs::default());
        let prefs: NavigationPrefs =
            serde_json::from_str("{\"layout\":\"nested\"}").expect("deserialize");
        assert_eq!(prefs.layout, NavigationLayout::Nested);
    }

    #[test]
    fn saved_navigation_prefs_load_back_from_memory_store() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;
        let prefs = NavigationPrefs {
            layout: NavigationLayout::Nested,
        };

        block_on(save_pref_with(store_obj, NAVIGATION_PREFS_KEY, &prefs)).expect("save");
        assert_eq!(
            block_on(store_obj.load_pref(NAVIGATION_PREFS_KEY)).expect("load raw"),
            Some("{\"layout\":\"nested\"}".to_string())
        );
        let loaded: Option<NavigationPrefs> =
            block_on(load_pref_with(store_obj, NAVIGATION_PREFS_KEY)).expect("load typed");
        assert_eq!(loaded, Some(prefs));
    }

    #[test]
    fn seeded_store_serves_the_layout_tag() {
        for layout in [NavigationLayout::Flat, NavigationLayout::Nested] {
            let store = MemoryPrefsStore::with_layout(layout);
            let loaded: Option<NavigationPrefs> =
                block_on(load_pref_with(&store, NAVIGATION_PREFS_KEY)).expect("load typed");
            assert_eq!(loaded.map(|prefs| prefs.layout), Some(layout));
            assert_eq!(
                serde_json::to_value(layout).expect("serialize"),
                serde_json::Value::from(layout.as_str())
            );
        }
    }

    #[test]
    fn invalid_stored_json_reports_the_key() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref(NAVIGATION_PREFS_KEY, "{\"layout\":\"sideways\"}"))
            .expect("save raw");

        let err = block_on(load_pref_with::<_, NavigationPrefs>(
            &store,
            NAVIGATION_PREFS_KEY,
        ))
        .expect_err("invalid layout");
        match err {
            PrefsError::Invalid { key, .. } => assert_eq!(key, NAVIGATION_PREFS_KEY),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn noop_store_forgets_saved_layouts() {
        let store = NoopPrefsStore;
        block_on(save_pref_with(
            &store,
            NAVIGATION_PREFS_KEY,
            &NavigationPrefs {
                layout: NavigationLayout::Nested,
            },
        ))
        .expect("save");
        let loaded: Option<NavigationPrefs> =
            block_on(load_pref_with(&store, NAVIGATION_PREFS_KEY)).expect("load");
        assert_eq!(loaded, None);
    }
}
