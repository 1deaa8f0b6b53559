// Durable session storage.
//
// Four independent string slots hold the credential pair and the cached
// identities. Implementations decide where they live: `MemoryStore` for
// tests and throwaway sessions, `campus_config::FileStore` on disk.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Regular user bearer token.
pub const TOKEN_KEY: &str = "token";
/// Serialized regular user identity.
pub const USER_KEY: &str = "user";
/// Administrative bearer token.
pub const ADMIN_TOKEN_KEY: &str = "adminToken";
/// Serialized administrative identity.
pub const ADMIN_USER_KEY: &str = "adminUser";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("session storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key/value storage for session state.
///
/// Every call is a single atomic read or write; callers never hold a
/// lock across an await point.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with initial slots.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let slots = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            slots: RwLock::new(slots),
        }
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("memory store lock poisoned".into())
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().map_err(|_| Self::poisoned())?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| Self::poisoned())?;
        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| Self::poisoned())?;
        slots.remove(key);
        Ok(())
    }
}
