use std::sync::Arc;

use chrono::NaiveDate;

use gamevault_core::error::VaultError;
use gamevault_core::models::query::{CatalogQueryParams, DateRange};

use crate::latest::LatestOnly;
use crate::types::GamePage;
use crate::CatalogProvider;

/// Which listing the user is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    All,
    TopRated,
    NewReleases,
}

impl Section {
    fn index(self) -> usize {
        match self {
            Section::All => 0,
            Section::TopRated => 1,
            Section::NewReleases => 2,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::All => write!(f, "all"),
            Section::TopRated => write!(f, "top-rated"),
            Section::NewReleases => write!(f, "new-releases"),
        }
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "all" => Ok(Section::All),
            "top-rated" | "top" => Ok(Section::TopRated),
            "new-releases" | "new" => Ok(Section::NewReleases),
            _ => Err(format!("unknown section: {s}")),
        }
    }
}

/// Filters applied to the `All` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilters {
    pub search: Option<String>,
    pub platform: Option<u32>,
    pub genre: Option<u32>,
    pub year: Option<i32>,
}

/// Paging and filter bookkeeping for catalog browsing.
///
/// Each section remembers its own page. Changing a filter or switching
/// section starts that section over at page 1.
#[derive(Debug, Clone)]
pub struct BrowseSession {
    section: Section,
    filters: BrowseFilters,
    pages: [u32; 3],
    total_pages: [Option<u32>; 3],
    page_size: u32,
}

impl BrowseSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            section: Section::All,
            filters: BrowseFilters::default(),
            pages: [1; 3],
            total_pages: [None; 3],
            page_size: page_size.max(1),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn filters(&self) -> &BrowseFilters {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.pages[self.section.index()]
    }

    /// Total pages of the current section, once a page has been fetched.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages[self.section.index()]
    }

    pub fn set_section(&mut self, section: Section) {
        self.section = section;
        self.reset_page();
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.filters.search = search.filter(|s| !s.trim().is_empty());
        self.filters_changed();
    }

    pub fn set_platform(&mut self, platform: Option<u32>) {
        self.filters.platform = platform;
        self.filters_changed();
    }

    pub fn set_genre(&mut self, genre: Option<u32>) {
        self.filters.genre = genre;
        self.filters_changed();
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.filters.year = year;
        self.filters_changed();
    }

    /// Move to `page`, clamped to the known page range. Returns the page chosen.
    pub fn go_to_page(&mut self, page: u32) -> u32 {
        let mut page = page.max(1);
        if let Some(total) = self.total_pages().filter(|t| *t > 0) {
            page = page.min(total);
        }
        self.pages[self.section.index()] = page;
        page
    }

    pub fn next_page(&mut self) -> u32 {
        self.go_to_page(self.page().saturating_add(1))
    }

    pub fn prev_page(&mut self) -> u32 {
        self.go_to_page(self.page().saturating_sub(1))
    }

    /// The request for the current section and page.
    pub fn params(&self, today: NaiveDate) -> CatalogQueryParams {
        let page = self.page();
        let params = match self.section {
            Section::All => CatalogQueryParams {
                search: self.filters.search.clone(),
                platform: self.filters.platform,
                genre: self.filters.genre,
                dates: self.filters.year.and_then(DateRange::year),
                page,
                ..CatalogQueryParams::default()
            },
            Section::TopRated => CatalogQueryParams::top_rated(page),
            Section::NewReleases => CatalogQueryParams::new_releases(today, page),
        };
        params.with_page_size(self.page_size)
    }

    /// Remember the page count reported by a fetched page.
    pub fn record(&mut self, page: &GamePage) {
        self.total_pages[self.section.index()] = Some(page.total_pages(self.page_size));
    }

    /// Fetch the current page through `guard`. `Ok(None)` means a newer
    /// request replaced this one and its result was dropped.
    pub async fn fetch(
        &mut self,
        provider: Arc<dyn CatalogProvider>,
        guard: &LatestOnly,
        today: NaiveDate,
    ) -> Result<Option<GamePage>, VaultError> {
        let params = self.params(today);
        let outcome = guard
            .run(async move { provider.list_games(&params).await })
            .await;
        match outcome {
            Some(Ok(page)) => {
                self.record(&page);
                Ok(Some(page))
            }
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    fn filters_changed(&mut self) {
        self.total_pages[Section::All.index()] = None;
        self.pages[Section::All.index()] = 1;
    }

    fn reset_page(&mut self) {
        self.pages[self.section.index()] = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gamevault_core::models::game::GameId;
    use std::sync::Mutex;

    use crate::types::{GameDetails, GameSummary, Screenshot, StoreLink};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn summary(id: u64, name: &str) -> GameSummary {
        GameSummary {
            id: GameId(id),
            name: name.into(),
            released: None,
            background_image: None,
            rating: 0.0,
            metacritic: None,
            platforms: vec![],
            genres: vec![],
        }
    }

    /// Answers every listing with a fixed page and records what was asked.
    struct FixedCatalog {
        page: GamePage,
        seen: Mutex<Vec<CatalogQueryParams>>,
    }

    #[async_trait]
    impl CatalogProvider for FixedCatalog {
        async fn list_games(&self, params: &CatalogQueryParams) -> Result<GamePage, VaultError> {
            self.seen.lock().unwrap().push(params.clone());
            Ok(self.page.clone())
        }

        async fn game_details(&self, id: GameId) -> Result<GameDetails, VaultError> {
            Err(VaultError::GameNotFound { id })
        }

        async fn game_screenshots(&self, _id: GameId) -> Result<Vec<Screenshot>, VaultError> {
            Ok(Vec::new())
        }

        async fn game_stores(&self, _id: GameId) -> Result<Vec<StoreLink>, VaultError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_search_scenario() {
        let catalog = Arc::new(FixedCatalog {
            page: GamePage {
                count: 3,
                results: vec![summary(1, "Zelda"), summary(2, "Zelda II"), summary(3, "Zelda III")],
            },
            seen: Mutex::new(Vec::new()),
        });
        let guard = LatestOnly::new();
        let mut session = BrowseSession::new(20);
        session.set_search(Some("zelda".into()));

        let page = session
            .fetch(catalog.clone(), &guard, today())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.results.len(), 3);
        assert_eq!(session.total_pages(), Some(1));

        let seen = catalog.seen.lock().unwrap();
        assert_eq!(seen[0].search.as_deref(), Some("zelda"));
        assert_eq!(seen[0].page, 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut session = BrowseSession::new(20);
        session.record(&GamePage { count: 200, results: vec![] });
        assert_eq!(session.go_to_page(4), 4);

        session.set_genre(Some(5));
        assert_eq!(session.page(), 1);
        assert_eq!(session.total_pages(), None);
        assert_eq!(session.params(today()).genre, Some(5));
    }

    #[test]
    fn test_sections_keep_their_own_page() {
        let mut session = BrowseSession::new(20);
        session.go_to_page(3);

        session.set_section(Section::TopRated);
        assert_eq!(session.page(), 1);
        session.next_page();
        let params = session.params(today());
        assert_eq!(params.page, 2);
        assert_eq!(params.ordering.unwrap().to_string(), "-rating");

        session.set_section(Section::NewReleases);
        let params = session.params(today());
        assert_eq!(params.dates.unwrap().to_param(), "2024-03-15,2024-06-15");
        assert_eq!(params.search, None);
    }

    #[test]
    fn test_paging_is_clamped() {
        let mut session = BrowseSession::new(20);
        assert_eq!(session.prev_page(), 1);
        session.record(&GamePage { count: 45, results: vec![] });
        assert_eq!(session.go_to_page(10), 3);
        assert_eq!(session.next_page(), 3);
    }

    #[test]
    fn test_year_filter_becomes_date_range() {
        let mut session = BrowseSession::new(10);
        session.set_year(Some(2018));
        session.set_platform(Some(187));
        let params = session.params(today());
        assert_eq!(params.dates.unwrap().to_param(), "2018-01-01,2018-12-31");
        assert_eq!(params.platform, Some(187));
        assert_eq!(params.page_size, 10);
    }

    #[test]
    fn test_section_parse() {
        assert_eq!("top-rated".parse::<Section>().unwrap(), Section::TopRated);
        assert_eq!("new_releases".parse::<Section>().unwrap(), Section::NewReleases);
        assert!("trending".parse::<Section>().is_err());
    }
}
