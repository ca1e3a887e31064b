//! Local key-value storage for user preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! Preferences survive reloads through the browser's `localStorage`. The
//! controllers only see [`KeyValueStore`], so tests run against an in-memory
//! map and private-browsing sessions (no storage) degrade to defaults.
//!
//! TRADE-OFFS
//! ==========
//! Writes are best-effort: callers log a rejected write and move on rather
//! than surfacing it to the user.

/// Error returned when a preference cannot be written.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No storage area is available (e.g. disabled by the browser).
    #[error("local storage is unavailable")]
    Unavailable,
    /// The storage area refused the write (quota, security policy).
    #[error("local storage rejected `{key}`: {reason}")]
    Rejected { key: String, reason: String },
}

/// String-keyed durable store. Writes are last-writer-wins.
pub trait KeyValueStore {
    /// Read the value stored for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot accept the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// `window.localStorage`, or nothing when the browser denies access.
#[cfg(feature = "browser")]
pub struct BrowserStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(feature = "browser")]
impl BrowserStore {
    /// Open the window's local storage area.
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("local storage unavailable; preferences will not persist");
        }
        Self { storage }
    }
}

#[cfg(feature = "browser")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|err| StoreError::Rejected {
            key: key.to_owned(),
            reason: format!("{err:?}"),
        })
    }
}
