//! Lightweight preference storage contracts and adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Host service for lightweight preference values stored as raw text per key.
///
/// The browser backing (`localStorage`) is synchronous, so this contract is too. Callers that
/// need typed values parse the raw text themselves.
pub trait PrefsStore {
    /// Loads the raw value stored under `key`.
    fn load_pref(&self, key: &str) -> Result<Option<String>, String>;

    /// Saves a raw value under `key`, replacing any previous value.
    fn save_pref(&self, key: &str, raw: &str) -> Result<(), String>;

    /// Deletes a preference key.
    fn delete_pref(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets and baseline tests.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save_pref(&self, _key: &str, _raw: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map, which lets tests hand one clone to the code under test and
/// inspect another.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Builds a store pre-populated with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.borrow_mut();
            for (key, value) in entries {
                inner.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// Preference store whose every operation fails, modelling blocked or quota-exhausted storage.
pub struct FailingPrefsStore {
    reason: String,
}

impl FailingPrefsStore {
    /// Builds a store that reports `reason` for every operation.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PrefsStore for FailingPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, String> {
        Err(self.reason.clone())
    }

    fn save_pref(&self, _key: &str, _raw: &str) -> Result<(), String> {
        Err(self.reason.clone())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), String> {
        Err(self.reason.clone())
    }
}
