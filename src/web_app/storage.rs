// web_app/storage.rs - Key/value persistence for browser state
//
// The selection, the auth session, and the list caches all persist through
// `KeyValueStore`. In the browser that is `localStorage` / `sessionStorage`;
// on the server and in tests it is an in-memory map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("browser storage is not available")]
    Unavailable,

    #[error("storage write rejected: {0}")]
    Write(String),

    #[error("could not serialize value: {0}")]
    Serialize(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// Serialize `value` as JSON under `key`
pub fn put_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    store.set(key, &json)
}

/// Read JSON stored under `key`
///
/// Malformed data is removed so it cannot break the next page load either.
pub fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding malformed stored value for '{}': {}", key, e);
            store.remove(key);
            None
        }
    }
}

/// In-memory store; clones share the same map
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }

    fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// `window.localStorage` or `window.sessionStorage`
#[cfg(feature = "hydrate")]
pub struct BrowserStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(feature = "hydrate")]
impl BrowserStore {
    pub fn local() -> Self {
        Self {
            storage: web_sys::window().and_then(|w| w.local_storage().ok().flatten()),
        }
    }

    pub fn session() -> Self {
        Self {
            storage: web_sys::window().and_then(|w| w.session_storage().ok().flatten()),
        }
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }

    fn clear(&self) {
        if let Some(storage) = &self.storage {
            let _ = storage.clear();
        }
    }
}

/// Persistent (survives browser restarts) store for the current platform
#[cfg(feature = "hydrate")]
pub fn local_store() -> BrowserStore {
    BrowserStore::local()
}

/// Tab-scoped store for the current platform
#[cfg(feature = "hydrate")]
pub fn session_store() -> BrowserStore {
    BrowserStore::session()
}

// There is no browser storage while rendering on the server; state written
// here is dropped with the request.
#[cfg(not(feature = "hydrate"))]
pub fn local_store() -> MemoryStore {
    MemoryStore::new()
}

#[cfg(not(feature = "hydrate"))]
pub fn session_store() -> MemoryStore {
    MemoryStore::new()
}

/// Session-scoped cache of list responses keyed by page and filter
///
/// Only unfiltered pages are cached; a filtered query always goes to the backend.
pub struct ResultsCache<'a> {
    store: &'a dyn KeyValueStore,
    scope: &'static str,
}

impl<'a> ResultsCache<'a> {
    pub fn new(store: &'a dyn KeyValueStore, scope: &'static str) -> Self {
        Self { store, scope }
    }

    pub fn key(&self, page: u32, filter: &str) -> String {
        format!("{}-page-{}-filter-{}", self.scope, page, filter)
    }

    pub fn get<T: DeserializeOwned>(&self, page: u32, filter: &str) -> Option<T> {
        if !filter.is_empty() {
            return None;
        }
        let hit = get_json(self.store, &self.key(page, filter));
        if hit.is_some() {
            tracing::debug!("Cache hit for {} page {}", self.scope, page);
        }
        hit
    }

    /// Key of the list of page numbers currently cached for this scope
    pub fn index_key(&self) -> String {
        format!("{}-cached-pages", self.scope)
    }

    fn cached_pages(&self) -> Vec<u32> {
        get_json(self.store, &self.index_key()).unwrap_or_default()
    }

    pub fn put<T: Serialize>(&self, page: u32, filter: &str, value: &T) {
        if !filter.is_empty() {
            return;
        }
        if let Err(e) = put_json(self.store, &self.key(page, filter), value) {
            tracing::warn!("Could not cache {} page {}: {}", self.scope, page, e);
            return;
        }
        let mut pages = self.cached_pages();
        if !pages.contains(&page) {
            pages.push(page);
            if let Err(e) = put_json(self.store, &self.index_key(), &pages) {
                tracing::warn!("Could not index cached {} pages: {}", self.scope, e);
            }
        }
    }

    pub fn invalidate(&self, page: u32, filter: &str) {
        self.store.remove(&self.key(page, filter));
    }

    /// Drop every cached page of this scope; a write can shift rows across pages
    pub fn invalidate_all(&self) {
        let pages = self.cached_pages();
        for page in &pages {
            self.store.remove(&self.key(*page, ""));
        }
        self.store.remove(&self.index_key());
        tracing::debug!("Invalidated {} cached {} pages", pages.len(), self.scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("a", "1").unwrap();
        assert_eq!(other.get("a").as_deref(), Some("1"));
        other.remove("a");
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_json_discards_malformed_value() {
        let store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();
        assert_eq!(get_json::<Vec<u32>>(&store, "broken"), None);
        assert_eq!(store.get("broken"), None);
    }

    #[test]
    fn test_cache_skips_filtered_queries() {
        let store = MemoryStore::new();
        let cache = ResultsCache::new(&store, "users-table");
        cache.put(1, "ana", &vec![1, 2]);
        assert!(store.is_empty());

        cache.put(1, "", &vec![1, 2]);
        assert_eq!(cache.key(1, ""), "users-table-page-1-filter-");
        assert_eq!(cache.get::<Vec<u32>>(1, ""), Some(vec![1, 2]));

        cache.invalidate(1, "");
        assert_eq!(cache.get::<Vec<u32>>(1, ""), None);
    }

    #[test]
    fn test_invalidate_all_clears_every_cached_page() {
        let store = MemoryStore::new();
        let cache = ResultsCache::new(&store, "users-table");
        store.set("unrelated", "kept").unwrap();
        for page in [1, 3, 3, 7] {
            cache.put(page, "", &vec![page]);
        }
        assert_eq!(get_json::<Vec<u32>>(&store, &cache.index_key()), Some(vec![1, 3, 7]));

        cache.invalidate_all();

        for page in [1, 3, 7] {
            assert_eq!(cache.get::<Vec<u32>>(page, ""), None);
        }
        assert_eq!(store.get(&cache.index_key()), None);
        assert_eq!(store.get("unrelated").as_deref(), Some("kept"));
        // A fresh fill starts a new index
        cache.put(2, "", &vec![2]);
        assert_eq!(get_json::<Vec<u32>>(&store, &cache.index_key()), Some(vec![2]));
    }
}
