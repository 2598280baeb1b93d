use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::VaultError;
use crate::models::query::DEFAULT_PAGE_SIZE;
use crate::models::state::DuplicatePolicy;

/// Environment variable that relocates the gamevault home directory.
pub const HOME_ENV: &str = "GAMEVAULT_HOME";

/// Top-level configuration, stored at `~/.gamevault/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Base URL of the catalog API.
    #[serde(default = "default_api_url")]
    pub api_url: url::Url,

    /// Results per catalog page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// How adding an already-collected game is handled.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

fn default_api_url() -> url::Url {
    url::Url::parse("https://api.rawg.io/api").expect("static catalog url is valid")
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: DEFAULT_PAGE_SIZE,
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

impl VaultConfig {
    /// Returns the gamevault home directory (`$GAMEVAULT_HOME` or `~/.gamevault/`).
    pub fn home_dir() -> Result<PathBuf, VaultError> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let base = dirs::home_dir().ok_or_else(|| VaultError::Config {
            message: "could not determine home directory".into(),
        })?;
        Ok(base.join(".gamevault"))
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Result<PathBuf, VaultError> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Returns the path to the storage database.
    pub fn db_path() -> Result<PathBuf, VaultError> {
        Ok(Self::home_dir()?.join("gamevault.db"))
    }

    /// Load config from the default location, or return defaults if not found.
    pub fn load() -> Result<Self, VaultError> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, VaultError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| VaultError::Serialization(e.to_string()))?;
        if config.page_size == 0 {
            return Err(VaultError::Config {
                message: "page_size must be at least 1".into(),
            });
        }
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), VaultError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VaultError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Initialize the home directory with default config.
    pub fn init() -> Result<PathBuf, VaultError> {
        let home = Self::home_dir()?;
        std::fs::create_dir_all(&home)?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
            tracing::info!("wrote default config to {}", config_path.display());
        }

        Ok(home)
    }
}
