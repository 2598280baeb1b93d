use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Page size used when a query does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Well-known catalog platform ids, addressable by name.
pub const PLATFORMS: &[(&str, u32)] = &[
    ("pc", 4),
    ("playstation", 187),
    ("xbox", 1),
    ("nintendo", 7),
];

/// Well-known catalog genre ids, addressable by name.
pub const GENRES: &[(&str, u32)] = &[("action", 4), ("rpg", 5), ("strategy", 10), ("shooter", 2)];

/// Resolve a platform given either its name or its numeric id.
pub fn platform_id(value: &str) -> Result<u32, String> {
    lookup_id(PLATFORMS, value).ok_or_else(|| format!("unknown platform: {value}"))
}

/// Resolve a genre given either its name or its numeric id.
pub fn genre_id(value: &str) -> Result<u32, String> {
    lookup_id(GENRES, value).ok_or_else(|| format!("unknown genre: {value}"))
}

fn lookup_id(table: &[(&str, u32)], value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(id) = value.parse::<u32>() {
        return Some(id);
    }
    let lower = value.to_lowercase();
    table.iter().find(|(name, _)| *name == lower).map(|(_, id)| *id)
}

/// Inclusive release-date window, sent as `start,end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// January 1st through December 31st of `year`.
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// The `months` months leading up to and including `today`.
    pub fn last_months(today: NaiveDate, months: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today));
        Self { start, end: today }
    }

    pub fn to_param(&self) -> String {
        format!("{},{}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

/// Fields the catalog can order listings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    Name,
    Released,
    Added,
    Created,
    Updated,
    Rating,
    Metacritic,
}

impl std::fmt::Display for OrderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderField::Name => write!(f, "name"),
            OrderField::Released => write!(f, "released"),
            OrderField::Added => write!(f, "added"),
            OrderField::Created => write!(f, "created"),
            OrderField::Updated => write!(f, "updated"),
            OrderField::Rating => write!(f, "rating"),
            OrderField::Metacritic => write!(f, "metacritic"),
        }
    }
}

impl std::str::FromStr for OrderField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(OrderField::Name),
            "released" => Ok(OrderField::Released),
            "added" => Ok(OrderField::Added),
            "created" => Ok(OrderField::Created),
            "updated" => Ok(OrderField::Updated),
            "rating" => Ok(OrderField::Rating),
            "metacritic" => Ok(OrderField::Metacritic),
            _ => Err(format!("unknown ordering field: {s}")),
        }
    }
}

/// Sort order for catalog listings; `-rating` means rating, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub field: OrderField,
    pub descending: bool,
}

impl Ordering {
    pub fn desc(field: OrderField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    pub fn asc(field: OrderField) -> Self {
        Self {
            field,
            descending: false,
        }
    }
}

impl std::fmt::Display for Ordering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

impl std::str::FromStr for Ordering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some(field) => Ok(Ordering::desc(field.parse()?)),
            None => Ok(Ordering::asc(s.parse()?)),
        }
    }
}

/// One catalog listing request. Built fresh for every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQueryParams {
    pub search: Option<String>,
    pub platform: Option<u32>,
    pub genre: Option<u32>,
    pub dates: Option<DateRange>,
    pub ordering: Option<Ordering>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for CatalogQueryParams {
    fn default() -> Self {
        Self {
            search: None,
            platform: None,
            genre: None,
            dates: None,
            ordering: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogQueryParams {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    /// Highest rated first.
    pub fn top_rated(page: u32) -> Self {
        Self {
            ordering: Some(Ordering::desc(OrderField::Rating)),
            page,
            ..Self::default()
        }
    }

    /// Released in the three months up to `today`, newest first.
    pub fn new_releases(today: NaiveDate, page: u32) -> Self {
        Self {
            dates: Some(DateRange::last_months(today, 3)),
            ordering: Some(Ordering::desc(OrderField::Released)),
            page,
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
