use serde::{Deserialize, Deserializer, Serialize};

use gamevault_core::models::game::{CollectionEntry, GameId, GameStatus};

use crate::pagination::total_pages;

// The catalog sends `null` for empty lists on some records.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An id/name pair such as a genre, developer or publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Listings nest each platform one level down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSlot {
    pub platform: NamedRef,
}

/// A game as it appears in a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: GameId,
    pub name: String,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default)]
    pub metacritic: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<PlatformSlot>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<NamedRef>,
}

impl GameSummary {
    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms.iter().map(|p| p.platform.name.as_str()).collect()
    }

    /// Snapshot this game into a collection entry with `status`.
    pub fn to_entry(&self, status: GameStatus) -> CollectionEntry {
        let mut entry = CollectionEntry::new(self.id, self.name.clone(), status);
        entry.release_date = self.released.clone();
        entry.image_url = self.background_image.clone();
        entry.rating = self.rating;
        entry.genre = join_names(self.genres.iter().map(|g| g.name.as_str()));
        entry.platform = join_names(self.platform_names().into_iter());
        if let Some(score) = self.metacritic {
            entry.extra.insert("metacritic".into(), score.into());
        }
        entry
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = names.collect::<Vec<_>>().join(", ");
    (!joined.is_empty()).then_some(joined)
}

/// One page of a listing plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePage {
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<GameSummary>,
}

impl GamePage {
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.count, page_size)
    }
}

/// Full metadata for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetails {
    pub id: GameId,
    pub name: String,
    #[serde(default)]
    pub description_raw: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default)]
    pub metacritic: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub playtime: u32,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub developers: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publishers: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<PlatformSlot>,
    #[serde(default)]
    pub esrb_rating: Option<NamedRef>,
}

impl GameDetails {
    pub fn to_entry(&self, status: GameStatus) -> CollectionEntry {
        let mut entry = CollectionEntry::new(self.id, self.name.clone(), status);
        entry.release_date = self.released.clone();
        entry.image_url = self.background_image.clone();
        entry.rating = self.rating;
        entry.genre = join_names(self.genres.iter().map(|g| g.name.as_str()));
        entry.platform = join_names(self.platforms.iter().map(|p| p.platform.name.as_str()));
        entry.developer = join_names(self.developers.iter().map(|d| d.name.as_str()));
        entry.publisher = join_names(self.publishers.iter().map(|p| p.name.as_str()));
        if let Some(score) = self.metacritic {
            entry.extra.insert("metacritic".into(), score.into());
        }
        entry
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Where a game can be bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreLink {
    pub id: u64,
    #[serde(default)]
    pub game_id: Option<GameId>,
    pub store_id: u32,
    pub url: String,
}

const KNOWN_STORES: &[(&str, &str)] = &[
    ("store.steampowered.com", "Steam"),
    ("store.playstation.com", "PlayStation Store"),
    ("xbox.com", "Xbox Store"),
    ("microsoft.com", "Xbox Store"),
    ("apps.apple.com", "App Store"),
    ("itunes.apple.com", "App Store"),
    ("gog.com", "GOG"),
    ("nintendo.com", "Nintendo Store"),
    ("play.google.com", "Google Play"),
    ("epicgames.com", "Epic Games"),
];

impl StoreLink {
    /// Storefront name, recognised from the link's host.
    pub fn store_name(&self) -> Option<&'static str> {
        let host = url::Url::parse(&self.url).ok()?.host_str()?.to_lowercase();
        KNOWN_STORES
            .iter()
            .find(|(domain, _)| host == *domain || host.ends_with(&format!(".{domain}")))
            .map(|(_, name)| *name)
    }
}

/// Envelope used by the screenshot and store endpoints.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Listing<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}
