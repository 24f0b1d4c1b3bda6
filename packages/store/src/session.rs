//! # Session store: persisted token and cached user
//!
//! [`SessionStore`] owns the two browser storage areas the admin session lives
//! in. The token and the JSON-serialised [`User`] are written to the persistent
//! (`local`) area on login; logout removes every auth-related key from both
//! areas.
//!
//! | Key | Area | Content |
//! |-----|------|---------|
//! | `token` | local (cleared from both) | Raw bearer token |
//! | `user` | local (cleared from both) | [`User`] as JSON |
//! | `authData`, `adminData` | both | Legacy keys, only ever removed |
//!
//! The store holds no invariants beyond "token absent ⇒ unauthenticated";
//! validity of the token is decided by [`crate::token`].

use thiserror::Error;

use crate::models::User;
use crate::storage::KeyValueStorage;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Every key removed on logout, from both storage areas.
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USER_KEY, "authData", "adminData"];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("stored user is not valid JSON: {0}")]
    MalformedUser(#[from] serde_json::Error),
}

pub struct SessionStore<S: KeyValueStorage> {
    local: S,
    session: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(local: S, session: S) -> Self {
        Self { local, session }
    }

    pub fn token(&self) -> Option<String> {
        self.local.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// The cached user, `Ok(None)` when nothing is stored.
    pub fn user(&self) -> Result<Option<User>, SessionError> {
        match self.local.get_item(USER_KEY) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn persist(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let user_json = serde_json::to_string(user)?;
        self.local.set_item(TOKEN_KEY, token);
        self.local.set_item(USER_KEY, &user_json);
        Ok(())
    }

    /// Remove every session key from both storage areas.
    pub fn clear(&self) {
        for key in SESSION_KEYS {
            self.local.remove_item(key);
            self.session.remove_item(key);
        }
    }

    /// Best-effort cleanup while the tab is closing.
    pub fn clear_on_unload(&self) {
        self.local.remove_item(TOKEN_KEY);
        self.local.remove_item(USER_KEY);
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn user() -> User {
        User {
            id: "1".into(),
            name: "A".into(),
            email: "a@b.com".into(),
            role: "admin".into(),
        }
    }

    fn stores() -> (SessionStore<MemoryStorage>, MemoryStorage, MemoryStorage) {
        let local = MemoryStorage::new();
        let session = MemoryStorage::new();
        (
            SessionStore::new(local.clone(), session.clone()),
            local,
            session,
        )
    }

    #[test]
    fn persist_then_read() {
        let (store, local, _) = stores();
        assert!(store.token().is_none());
        assert!(store.user().unwrap().is_none());

        store.persist("tok", &user()).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.user().unwrap(), Some(user()));
        assert!(local.get_item(USER_KEY).unwrap().contains("a@b.com"));
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let (store, local, _) = stores();
        local.set_item(TOKEN_KEY, "");
        assert!(store.token().is_none());
    }

    #[test]
    fn malformed_user_is_an_error() {
        let (store, local, _) = stores();
        local.set_item(USER_KEY, "{not json");
        assert!(matches!(store.user(), Err(SessionError::MalformedUser(_))));
    }

    #[test]
    fn clear_removes_keys_from_both_areas() {
        let (store, local, session) = stores();
        store.persist("tok", &user()).unwrap();
        session.set_item(TOKEN_KEY, "tok");
        session.set_item(USER_KEY, "{}");
        session.set_item("adminData", "x");
        local.set_item("authData", "x");
        local.set_item("theme", "dark");

        store.clear();

        for key in SESSION_KEYS {
            assert!(local.get_item(key).is_none(), "{key} left in local");
            assert!(session.get_item(key).is_none(), "{key} left in session");
        }
        assert_eq!(local.get_item("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn unload_clears_whole_session_area() {
        let (store, local, session) = stores();
        store.persist("tok", &user()).unwrap();
        session.set_item("draft", "x");

        store.clear_on_unload();

        assert!(local.is_empty());
        assert!(session.is_empty());
    }
}
