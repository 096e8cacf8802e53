//! Tab-scoped admin session flag.
//!
//! The browser keeps the flag in `sessionStorage` under the key `admin`
//! with the value `"true"`. [`SessionStore`] abstracts that storage and
//! [`AdminSession`] is the only code that reads or writes the key.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use salones_core::SessionState;
use tracing::debug;

/// Storage key of the admin flag.
pub const ADMIN_KEY: &str = "admin";

const ADMIN_VALUE: &str = "true";

/// String key/value storage scoped to the tab's lifetime.
pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-process [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Controlled read/write access to the admin flag.
#[derive(Debug)]
pub struct AdminSession<S> {
    store: S,
}

impl<S: SessionStore> AdminSession<S> {
    /// Wrap a store. An existing flag (e.g. after a page reload) is honoured.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        if self.store.get_item(ADMIN_KEY).as_deref() == Some(ADMIN_VALUE) {
            SessionState::Admin
        } else {
            SessionState::Anonymous
        }
    }

    /// Returns `true` in admin mode.
    pub fn is_admin(&self) -> bool {
        self.state().is_admin()
    }

    /// Enter admin mode after a successful login.
    pub fn enter_admin(&self) {
        self.store.set_item(ADMIN_KEY, ADMIN_VALUE);
        debug!("Admin session started");
    }

    /// Return to anonymous mode.
    pub fn clear(&self) {
        self.store.remove_item(ADMIN_KEY);
        debug!("Admin session cleared");
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }
}
