pub mod auth;
pub mod browse;
pub mod collection;
pub mod config;
pub mod game;
pub mod profile;
pub mod theme;

use std::sync::Arc;

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};

use gamevault_auth::{resolve_api_key, KeyringStore, API_KEY_ENV};
use gamevault_catalog::CatalogProvider;
use gamevault_core::config::VaultConfig;
use gamevault_db::SqliteStorage;
use gamevault_store::ambient::ambient_dark_mode;
use gamevault_store::CollectionStore;

#[derive(Subcommand)]
pub enum Command {
    /// Initialize and show configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
    /// Manage the catalog API key
    Auth {
        #[command(subcommand)]
        action: auth::AuthAction,
    },
    /// Search and page through the game catalog
    Browse(browse::BrowseArgs),
    /// Show details, screenshots and stores for a game
    Game(game::GameArgs),
    /// Manage your personal collection
    Collection {
        #[command(subcommand)]
        action: collection::CollectionAction,
    },
    /// Show or toggle the colour theme
    Theme {
        #[command(subcommand)]
        action: theme::ThemeAction,
    },
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: profile::ProfileAction,
    },
}

pub async fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Config { action } => config::run(action),
        Command::Auth { action } => auth::run(action),
        Command::Browse(args) => browse::run(args).await,
        Command::Game(args) => game::run(args).await,
        Command::Collection { action } => collection::run(action).await,
        Command::Theme { action } => theme::run(action),
        Command::Profile { action } => profile::run(action),
    }
}

/// Open the storage database, falling back to a throwaway in-memory one when
/// the file cannot be opened.
pub(crate) fn open_storage() -> anyhow::Result<SqliteStorage> {
    let db_path = VaultConfig::db_path()?;
    let conn = match gamevault_db::open_db(&db_path) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(
                "could not open {}: {e}; changes will not be saved",
                db_path.display()
            );
            gamevault_db::open_memory_db()?
        }
    };
    Ok(SqliteStorage::new(conn))
}

/// Hydrate the collection store from the storage database.
pub(crate) fn open_store(config: &VaultConfig) -> anyhow::Result<CollectionStore<SqliteStorage>> {
    Ok(CollectionStore::hydrate(
        open_storage()?,
        ambient_dark_mode(),
        config.duplicate_policy,
    ))
}

/// Build the catalog client using the configured API key.
pub(crate) fn catalog(config: &VaultConfig) -> anyhow::Result<Arc<dyn CatalogProvider>> {
    let (key, source) = resolve_api_key(&KeyringStore::new(), std::env::var(API_KEY_ENV).ok())?;
    tracing::debug!("using catalog API key from {source}");
    Ok(gamevault_catalog::create_provider(&config.api_url, &key)?)
}

pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Warn when the last collection change only exists in memory.
pub(crate) fn report_unsaved(store: &CollectionStore<SqliteStorage>) {
    if !store.is_persisted() {
        eprintln!("warning: the change could not be saved and will be lost on exit");
    }
}
