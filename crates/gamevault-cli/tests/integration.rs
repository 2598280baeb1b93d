use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use gamevault_auth::{resolve_api_key, CredentialStore, KeySource, MemoryStore, API_KEY_ENTRY};
use gamevault_catalog::latest::LatestOnly;
use gamevault_catalog::session::{BrowseSession, Section};
use gamevault_catalog::{
    fetch_overview, CatalogProvider, GameDetails, GamePage, GameSummary, Screenshot, StoreLink,
};
use gamevault_core::config::VaultConfig;
use gamevault_core::error::VaultError;
use gamevault_core::models::game::{CollectionEntry, GameId, GameStatus};
use gamevault_core::models::query::CatalogQueryParams;
use gamevault_core::models::state::DuplicatePolicy;
use gamevault_core::validation::NewGameDraft;
use gamevault_db::{keys, open_db, open_memory_db, KeyValueStorage, SqliteStorage};
use gamevault_store::library::{library_view, LibrarySort, LibraryStats};
use gamevault_store::profile::{load_username, save_username, DEFAULT_USERNAME};
use gamevault_store::{AddOutcome, CollectionStore};

struct FakeCatalog {
    games: Vec<GameSummary>,
}

fn summary(id: u64, name: &str, released: &str) -> GameSummary {
    GameSummary {
        id: GameId(id),
        name: name.into(),
        released: Some(released.into()),
        background_image: Some(format!("https://media.example/{id}.jpg")),
        rating: 4.2,
        metacritic: None,
        platforms: vec![],
        genres: vec![],
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn list_games(&self, params: &CatalogQueryParams) -> Result<GamePage, VaultError> {
        let matches: Vec<GameSummary> = self
            .games
            .iter()
            .filter(|g| {
                params
                    .search
                    .as_deref()
                    .map_or(true, |s| g.name.to_lowercase().contains(&s.to_lowercase()))
            })
            .cloned()
            .collect();
        let size = params.page_size as usize;
        let start = (params.page.saturating_sub(1) as usize) * size;
        Ok(GamePage {
            count: matches.len() as u64,
            results: matches.into_iter().skip(start).take(size).collect(),
        })
    }

    async fn game_details(&self, id: GameId) -> Result<GameDetails, VaultError> {
        let game = self
            .games
            .iter()
            .find(|g| g.id == id)
            .ok_or(VaultError::GameNotFound { id })?;
        Ok(GameDetails {
            id: game.id,
            name: game.name.clone(),
            description_raw: Some("A game.".into()),
            released: game.released.clone(),
            background_image: game.background_image.clone(),
            rating: game.rating,
            metacritic: Some(90),
            playtime: 12,
            website: None,
            developers: vec![],
            publishers: vec![],
            genres: vec![],
            platforms: vec![],
            esrb_rating: None,
        })
    }

    async fn game_screenshots(&self, id: GameId) -> Result<Vec<Screenshot>, VaultError> {
        Ok(vec![Screenshot {
            id: id.0 * 10,
            image: format!("https://media.example/{id}/1.jpg"),
            width: None,
            height: None,
        }])
    }

    async fn game_stores(&self, id: GameId) -> Result<Vec<StoreLink>, VaultError> {
        Ok(vec![StoreLink {
            id: 1,
            game_id: Some(id),
            store_id: 1,
            url: format!("https://store.steampowered.com/app/{id}"),
        }])
    }
}

fn fake_catalog() -> Arc<dyn CatalogProvider> {
    let games = (1..=45)
        .map(|i| summary(i, &format!("Game {i}"), &format!("20{:02}-01-01", i % 25)))
        .collect();
    Arc::new(FakeCatalog { games })
}

#[test]
fn test_config_defaults() {
    let config = VaultConfig::default();
    assert_eq!(config.page_size, 20);
    assert_eq!(config.api_url.as_str(), "https://api.rawg.io/api");
    assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
}

#[test]
fn test_config_roundtrip() {
    let mut config = VaultConfig::default();
    config.duplicate_policy = DuplicatePolicy::Allow;
    let serialized = toml::to_string_pretty(&config).unwrap();
    let deserialized: VaultConfig = toml::from_str(&serialized).unwrap();
    assert_eq!(deserialized.duplicate_policy, DuplicatePolicy::Allow);
    assert_eq!(deserialized.page_size, config.page_size);
}

#[test]
fn test_full_pipeline_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("gamevault.db");

    // 1. Fresh storage hydrates to the empty light state
    let storage = SqliteStorage::new(open_db(&db_path).unwrap());
    let mut store = CollectionStore::hydrate(storage, None, DuplicatePolicy::Reject);
    assert!(store.collection().is_empty());
    assert!(!store.dark_mode());

    // 2. Add, duplicate, update, toggle
    let zelda = CollectionEntry::new(GameId(1), "Zelda", GameStatus::Playing);
    assert_eq!(store.add_to_collection(zelda.clone()), AddOutcome::Added);
    assert_eq!(store.add_to_collection(zelda), AddOutcome::AlreadyPresent);
    store.add_to_collection(CollectionEntry::new(GameId(2), "Hades", GameStatus::Backlog));
    assert!(store.update_status(GameId(1), GameStatus::Completed));
    assert!(store.toggle_theme());
    assert!(store.is_persisted());

    // 3. Storage holds exactly what memory holds
    let raw = store.storage().read(keys::COLLECTION).unwrap().unwrap();
    let stored: Vec<CollectionEntry> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, store.collection());
    assert_eq!(store.storage().read(keys::DARK_MODE).unwrap().as_deref(), Some("true"));
    drop(store);

    // 4. A new session sees the same state
    let storage = SqliteStorage::new(open_db(&db_path).unwrap());
    let mut store = CollectionStore::hydrate(storage, Some(false), DuplicatePolicy::Reject);
    assert_eq!(store.collection().len(), 2);
    assert_eq!(store.get(GameId(1)).unwrap().status, GameStatus::Completed);
    assert!(store.dark_mode());

    // 5. Remove and re-check
    assert_eq!(store.remove_from_collection(GameId(1)), 1);
    assert_eq!(store.remove_from_collection(GameId(1)), 0);
    let storage = store.into_storage();
    let store = CollectionStore::hydrate(storage, None, DuplicatePolicy::Reject);
    assert_eq!(store.collection().len(), 1);
    assert_eq!(store.collection()[0].name, "Hades");
}

#[test]
fn test_library_view_and_stats_over_store() {
    let storage = SqliteStorage::new(open_memory_db().unwrap());
    let mut store = CollectionStore::hydrate(storage, None, DuplicatePolicy::Reject);
    let mut old = CollectionEntry::new(GameId(1), "b-side", GameStatus::Completed);
    old.release_date = Some("2001-05-01".into());
    let mut new = CollectionEntry::new(GameId(2), "A-side", GameStatus::Playing);
    new.release_date = Some("2020-05-01".into());
    store.add_to_collection(old);
    store.add_to_collection(new);

    let by_name: Vec<_> = library_view(store.collection(), None, LibrarySort::Name)
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(by_name, vec![GameId(2), GameId(1)]);

    let completed = library_view(
        store.collection(),
        Some(GameStatus::Completed),
        LibrarySort::Date,
    );
    assert_eq!(completed.len(), 1);

    let stats = LibraryStats::of(store.collection());
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completion_rate(), 50.0);
}

#[test]
fn test_custom_game_validation_into_store() {
    let storage = SqliteStorage::new(open_memory_db().unwrap());
    let mut store = CollectionStore::hydrate(storage, None, DuplicatePolicy::Reject);

    let invalid = NewGameDraft {
        title: "Homebrew".into(),
        rating: "9".into(),
        ..NewGameDraft::default()
    };
    let errors = invalid.validate(GameId(1)).unwrap_err();
    assert!(errors.message_for("platform").is_some());
    assert!(errors.message_for("rating").is_some());
    assert!(store.collection().is_empty());

    let draft = NewGameDraft {
        title: "Homebrew".into(),
        platform: "PC".into(),
        genre: "Puzzle".into(),
        release_date: "2023-02-01".into(),
        rating: "3.5".into(),
        status: GameStatus::Backlog,
        ..NewGameDraft::default()
    };
    let id = GameId::generate_local(store.collection().iter().map(|e| &e.id));
    let entry = draft.validate(id).unwrap();
    assert_eq!(store.add_to_collection(entry), AddOutcome::Added);
    assert_eq!(store.get(id).unwrap().rating, 3.5);
}

#[test]
fn test_profile_name_shares_storage() {
    let mut storage = SqliteStorage::new(open_memory_db().unwrap());
    assert_eq!(load_username(&storage), DEFAULT_USERNAME);
    save_username(&mut storage, "  Samus ").unwrap();

    let store = CollectionStore::hydrate(storage, None, DuplicatePolicy::Reject);
    assert_eq!(load_username(store.storage()), "Samus");
    assert!(store.collection().is_empty());
}

#[test]
fn test_api_key_resolution() {
    let creds = MemoryStore::new();
    assert!(matches!(
        resolve_api_key(&creds, None),
        Err(VaultError::MissingApiKey)
    ));

    creds.store(API_KEY_ENTRY, "stored").unwrap();
    let (key, source) = resolve_api_key(&creds, None).unwrap();
    assert_eq!((key.as_str(), source), ("stored", KeySource::Keychain));

    let (key, source) = resolve_api_key(&creds, Some("from-env".into())).unwrap();
    assert_eq!((key.as_str(), source), ("from-env", KeySource::Environment));
}

#[tokio::test]
async fn test_browse_then_collect() {
    let provider = fake_catalog();
    let guard = LatestOnly::new();
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    let mut session = BrowseSession::new(20);
    let page = session
        .fetch(provider.clone(), &guard, today)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.count, 45);
    assert_eq!(page.results.len(), 20);
    assert_eq!(session.total_pages(), Some(3));

    session.go_to_page(3);
    let last = session
        .fetch(provider.clone(), &guard, today)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(last.results.len(), 5);

    session.set_search(Some("game 4".into()));
    assert_eq!(session.page(), 1);
    let found = session
        .fetch(provider.clone(), &guard, today)
        .await
        .unwrap()
        .unwrap();
    assert!(found.results.iter().all(|g| g.name.starts_with("Game 4")));

    let storage = SqliteStorage::new(open_memory_db().unwrap());
    let mut store = CollectionStore::hydrate(storage, None, DuplicatePolicy::Reject);
    let pick = &found.results[0];
    store.add_to_collection(pick.to_entry(GameStatus::Backlog));
    let entry = store.get(pick.id).unwrap();
    assert_eq!(entry.name, pick.name);
    assert_eq!(entry.image_url, pick.background_image);
    assert_eq!(entry.status, GameStatus::Backlog);
}

#[tokio::test]
async fn test_overview_and_missing_game() {
    let provider = fake_catalog();

    let overview = fetch_overview(provider.as_ref(), GameId(7)).await.unwrap();
    assert_eq!(overview.details.name, "Game 7");
    assert_eq!(overview.screenshots.len(), 1);
    assert_eq!(overview.stores[0].store_name(), Some("Steam"));

    let err = fetch_overview(provider.as_ref(), GameId(999)).await.unwrap_err();
    assert!(matches!(err, VaultError::GameNotFound { id } if id == GameId(999)));
}

#[test]
fn test_parse_roundtrips() {
    for status in GameStatus::ALL {
        assert_eq!(status.to_string().parse::<GameStatus>().unwrap(), status);
    }
    for section in [Section::All, Section::TopRated, Section::NewReleases] {
        assert_eq!(section.to_string().parse::<Section>().unwrap(), section);
    }
    for policy in [DuplicatePolicy::Reject, DuplicatePolicy::Allow] {
        assert_eq!(policy.to_string().parse::<DuplicatePolicy>().unwrap(), policy);
    }
}
