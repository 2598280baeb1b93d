use gamevault_core::error::VaultError;

/// Keychain account under which the catalog API key is stored.
pub const API_KEY_ENTRY: &str = "rawg-api-key";

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "RAWG_API_KEY";

/// Trait for credential storage backends.
pub trait CredentialStore: Send + Sync {
    /// Store a secret under the given key.
    fn store(&self, key: &str, secret: &str) -> Result<(), VaultError>;

    /// Retrieve a secret by key.
    fn get(&self, key: &str) -> Result<Option<String>, VaultError>;

    /// Delete a stored secret.
    fn delete(&self, key: &str) -> Result<(), VaultError>;
}

/// Where a resolved API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    Keychain,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Environment => write!(f, "environment ({API_KEY_ENV})"),
            KeySource::Keychain => write!(f, "OS keychain"),
        }
    }
}

/// Find the catalog API key: `env_value` wins over the credential store.
pub fn resolve_api_key(
    store: &dyn CredentialStore,
    env_value: Option<String>,
) -> Result<(String, KeySource), VaultError> {
    if let Some(key) = env_value.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
        return Ok((key, KeySource::Environment));
    }
    match store.get(API_KEY_ENTRY)? {
        Some(key) if !key.is_empty() => Ok((key, KeySource::Keychain)),
        _ => Err(VaultError::MissingApiKey),
    }
}

/// OS keychain-backed credential store using the `keyring` crate.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: "gamevault".to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, VaultError> {
        keyring::Entry::new(&self.service, key).map_err(|e| VaultError::CredentialError {
            message: e.to_string(),
        })
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringStore {
    fn store(&self, key: &str, secret: &str) -> Result<(), VaultError> {
        self.entry(key)?
            .set_password(secret)
            .map_err(|e| VaultError::CredentialError {
                message: e.to_string(),
            })
    }

    fn get(&self, key: &str) -> Result<Option<String>, VaultError> {
        match self.entry(key)?.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(VaultError::CredentialError {
                message: e.to_string(),
            }),
        }
    }

    fn delete(&self, key: &str) -> Result<(), VaultError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => {
                tracing::debug!("no keychain entry for {key}, nothing to delete");
                Ok(())
            }
            Err(e) => Err(VaultError::CredentialError {
                message: e.to_string(),
            }),
        }
    }
}

/// In-memory credential store for testing.
pub struct MemoryStore {
    store: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            store: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, std::collections::HashMap<String, String>>, VaultError>
    {
        self.store.lock().map_err(|_| VaultError::CredentialError {
            message: "credential store lock poisoned".into(),
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryStore {
    fn store(&self, key: &str, secret: &str) -> Result<(), VaultError> {
        self.lock()?.insert(key.to_string(), secret.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, VaultError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), VaultError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
