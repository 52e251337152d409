//! Persisted session storage
//!
//! A small string key-value interface in the shape of browser local storage.
//! The session manager is the only writer.

use std::collections::BTreeMap;

use crate::error::Result;

/// Consolidated, versioned session record
pub const SESSION_KEY: &str = "session";
/// Access token
pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_ID_KEY: &str = "user_id";
pub const USER_NAME_KEY: &str = "user_name";
pub const USER_TYPE_KEY: &str = "user_type";
pub const IMAGE_KEY: &str = "image";
/// Serialized login payload
pub const USER_INFO_KEY: &str = "userInfo";

/// Every key written by a login
pub const SESSION_KEYS: &[&str] = &[
    SESSION_KEY,
    TOKEN_KEY,
    REFRESH_TOKEN_KEY,
    USER_ID_KEY,
    USER_NAME_KEY,
    USER_TYPE_KEY,
    IMAGE_KEY,
    USER_INFO_KEY,
];

/// String key-value store that outlives a console session
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write several entries at once; either all land or none do
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()>;

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value.to_string())])
    }

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Remove every entry
    fn clear(&mut self) -> Result<()>;

    /// All stored keys, sorted
    fn keys(&self) -> Result<Vec<String>>;
}

/// Process-local storage, for tests and throwaway runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
