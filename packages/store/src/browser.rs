//! # Browser storage: `localStorage` / `sessionStorage`
//!
//! [`BrowserStorage`] is the [`KeyValueStorage`] implementation used on the
//! **web platform**. It forwards to the window's `Storage` objects through
//! `web-sys`.
//!
//! ## Handles
//!
//! | Constructor | Backing object | Lifetime |
//! |-------------|----------------|----------|
//! | [`BrowserStorage::local`] | `window.localStorage` | Persists across tabs and restarts |
//! | [`BrowserStorage::session`] | `window.sessionStorage` | Scoped to the current tab |
//!
//! `BrowserStorage` is a small `Copy` value that looks the `Storage` object up
//! on every call; the browser caches it, and `web_sys::Storage` cannot be
//! shared across the `'static` closures Dioxus hands out.
//!
//! ## Error handling
//!
//! All methods swallow errors (private browsing quotas, disabled storage,
//! missing window). A broken storage degrades to "no session", which sends the
//! user back to the login page rather than crashing the app.

use crate::storage::KeyValueStorage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Area {
    Local,
    Session,
}

/// `Storage`-backed key/value store for the web platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserStorage {
    area: Area,
}

impl BrowserStorage {
    /// Handle to `window.localStorage`.
    pub fn local() -> Self {
        Self { area: Area::Local }
    }

    /// Handle to `window.sessionStorage`.
    pub fn session() -> Self {
        Self {
            area: Area::Session,
        }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.area {
            Area::Local => window.local_storage(),
            Area::Session => window.session_storage(),
        };
        storage.ok().flatten()
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("Failed to write {key} to {:?} storage", self.area);
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            let _ = storage.clear();
        }
    }
}
