use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use gamevault_core::error::VaultError;
use gamevault_core::models::game::GameId;
use gamevault_core::models::query::CatalogQueryParams;

use crate::types::{GameDetails, GamePage, Listing, Screenshot, StoreLink};
use crate::CatalogProvider;

/// Client for the RAWG games database API.
pub struct RawgClient {
    client: reqwest::Client,
    api_url: url::Url,
    api_key: String,
}

impl RawgClient {
    pub fn new(api_url: url::Url, api_key: String) -> Result<Self, VaultError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(concat!("gamevault/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| VaultError::Transport {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .query(&[("key", self.api_key.as_str())])
    }

    /// Build the listing request without sending it.
    pub fn list_request(
        &self,
        params: &CatalogQueryParams,
    ) -> Result<reqwest::Request, VaultError> {
        self.get("/games")
            .query(&list_query(params))
            .build()
            .map_err(|e| VaultError::Transport {
                message: e.without_url().to_string(),
            })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: Result<reqwest::Request, VaultError>,
        what: &str,
        id: Option<GameId>,
    ) -> Result<T, VaultError> {
        let result = match request {
            Ok(request) => self.execute(request, id).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            tracing::error!("error fetching {what}: {e}");
        }
        result
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
        id: Option<GameId>,
    ) -> Result<T, VaultError> {
        tracing::debug!("GET {}", request.url().path());
        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| VaultError::Transport {
                message: e.without_url().to_string(),
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(VaultError::GameNotFound { id });
            }
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(VaultError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        resp.json::<T>().await.map_err(|e| VaultError::Decode {
            message: e.without_url().to_string(),
        })
    }

    fn request(&self, path: &str) -> Result<reqwest::Request, VaultError> {
        self.get(path).build().map_err(|e| VaultError::Transport {
            message: e.without_url().to_string(),
        })
    }
}

/// Query-string pairs for a listing, excluding the API key.
pub fn list_query(params: &CatalogQueryParams) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", params.page.max(1).to_string()),
        ("page_size", params.page_size.to_string()),
    ];
    if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query.push(("search", search.to_string()));
    }
    query.push(("search_precise", "true".to_string()));
    query.push(("search_exact", "false".to_string()));
    if let Some(platform) = params.platform {
        query.push(("platforms", platform.to_string()));
    }
    if let Some(genre) = params.genre {
        query.push(("genres", genre.to_string()));
    }
    if let Some(dates) = &params.dates {
        query.push(("dates", dates.to_param()));
    }
    if let Some(ordering) = &params.ordering {
        query.push(("ordering", ordering.to_string()));
    }
    query
}

#[async_trait]
impl CatalogProvider for RawgClient {
    async fn list_games(&self, params: &CatalogQueryParams) -> Result<GamePage, VaultError> {
        self.fetch(self.list_request(params), "games", None).await
    }

    async fn game_details(&self, id: GameId) -> Result<GameDetails, VaultError> {
        let request = self.request(&format!("/games/{id}"));
        self.fetch(request, "game details", Some(id)).await
    }

    async fn game_screenshots(&self, id: GameId) -> Result<Vec<Screenshot>, VaultError> {
        let request = self.request(&format!("/games/{id}/screenshots"));
        let listing: Listing<Screenshot> = self.fetch(request, "game screenshots", Some(id)).await?;
        Ok(listing.results)
    }

    async fn game_stores(&self, id: GameId) -> Result<Vec<StoreLink>, VaultError> {
        let request = self.request(&format!("/games/{id}/stores"));
        let listing: Listing<StoreLink> = self.fetch(request, "game stores", Some(id)).await?;
        Ok(listing.results)
    }
}
