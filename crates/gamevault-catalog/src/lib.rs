pub mod latest;
pub mod pagination;
pub mod rawg;
pub mod session;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use gamevault_core::error::VaultError;
use gamevault_core::models::game::GameId;
use gamevault_core::models::query::CatalogQueryParams;

pub use types::{GameDetails, GamePage, GameSummary, NamedRef, PlatformSlot, Screenshot, StoreLink};

/// Read-only access to a remote game catalog.
///
/// Every call is an independent request. Failures are logged by the
/// implementation and returned unchanged; nothing is retried or cached.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// One page of a search or listing.
    async fn list_games(&self, params: &CatalogQueryParams) -> Result<GamePage, VaultError>;

    /// Full metadata for one game.
    async fn game_details(&self, id: GameId) -> Result<GameDetails, VaultError>;

    /// Screenshot images for one game.
    async fn game_screenshots(&self, id: GameId) -> Result<Vec<Screenshot>, VaultError>;

    /// Purchase links for one game.
    async fn game_stores(&self, id: GameId) -> Result<Vec<StoreLink>, VaultError>;
}

/// Create the catalog client for `api_url`.
pub fn create_provider(
    api_url: &url::Url,
    api_key: &str,
) -> Result<Arc<dyn CatalogProvider>, VaultError> {
    Ok(Arc::new(rawg::RawgClient::new(
        api_url.clone(),
        api_key.to_string(),
    )?))
}

/// Everything shown on a game's detail view.
#[derive(Debug, Clone)]
pub struct GameOverview {
    pub details: GameDetails,
    pub screenshots: Vec<Screenshot>,
    pub stores: Vec<StoreLink>,
}

/// Fetch details, screenshots and store links concurrently. The first
/// failure fails the whole overview.
pub async fn fetch_overview(
    provider: &dyn CatalogProvider,
    id: GameId,
) -> Result<GameOverview, VaultError> {
    let (details, screenshots, stores) = tokio::try_join!(
        provider.game_details(id),
        provider.game_screenshots(id),
        provider.game_stores(id),
    )?;
    Ok(GameOverview {
        details,
        screenshots,
        stores,
    })
}
