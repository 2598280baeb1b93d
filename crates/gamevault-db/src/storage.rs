use std::collections::HashMap;

use rusqlite::Connection;

use gamevault_core::error::VaultError;

/// Names of the persisted entries.
pub mod keys {
    pub const COLLECTION: &str = "gameCollection";
    pub const DARK_MODE: &str = "darkMode";
    pub const USERNAME: &str = "username";
}

/// Durable string key/value storage.
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, VaultError>;

    /// Write every pair, all-or-nothing where the backend supports it.
    fn write_batch(&mut self, entries: &[(&str, String)]) -> Result<(), VaultError>;

    fn write(&mut self, key: &str, value: String) -> Result<(), VaultError> {
        self.write_batch(&[(key, value)])
    }
}

fn storage_err(e: impl std::fmt::Display) -> VaultError {
    VaultError::Storage {
        message: e.to_string(),
    }
}

/// SQLite-backed storage over the `kv_entries` table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Wrap a connection that has already been migrated.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStorage for SqliteStorage {
    fn read(&self, key: &str) -> Result<Option<String>, VaultError> {
        crate::ops::get_value(&self.conn, key).map_err(storage_err)
    }

    fn write_batch(&mut self, entries: &[(&str, String)]) -> Result<(), VaultError> {
        let tx = self.conn.transaction().map_err(storage_err)?;
        for (key, value) in entries {
            crate::ops::put_value(&tx, key, value).map_err(storage_err)?;
        }
        tx.commit().map_err(storage_err)
    }
}

/// In-memory storage with an optional byte quota, for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seed a raw value, bypassing the quota.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, VaultError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write_batch(&mut self, entries: &[(&str, String)]) -> Result<(), VaultError> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert(key.to_string(), value.clone());
        }
        if let Some(limit) = self.quota {
            let needed = Self::used_bytes(&next);
            if needed > limit {
                return Err(VaultError::QuotaExceeded { needed, limit });
            }
        }
        self.entries = next;
        Ok(())
    }
}
