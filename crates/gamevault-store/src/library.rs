use std::cmp::Ordering;

use chrono::NaiveDate;

use gamevault_core::models::game::{CollectionEntry, GameStatus};

/// How the library listing is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibrarySort {
    /// Alphabetical, ignoring case.
    #[default]
    Name,
    /// Newest release first; undated entries last.
    Date,
}

impl std::str::FromStr for LibrarySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(LibrarySort::Name),
            "date" => Ok(LibrarySort::Date),
            _ => Err(format!("unknown sort: {s}")),
        }
    }
}

/// Entries with `status` (or all of them), in `sort` order.
pub fn library_view(
    collection: &[CollectionEntry],
    status: Option<GameStatus>,
    sort: LibrarySort,
) -> Vec<&CollectionEntry> {
    let mut view: Vec<&CollectionEntry> = collection
        .iter()
        .filter(|e| status.map_or(true, |s| e.status == s))
        .collect();
    match sort {
        LibrarySort::Name => view.sort_by_cached_key(|e| e.name.to_lowercase()),
        LibrarySort::Date => view.sort_by(|a, b| compare_release(b, a)),
    }
    view
}

fn release(entry: &CollectionEntry) -> Option<NaiveDate> {
    entry
        .release_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

// Undated entries compare lowest so they land last in a descending sort.
fn compare_release(a: &CollectionEntry, b: &CollectionEntry) -> Ordering {
    release(a).cmp(&release(b))
}

/// Per-status counts for the library header.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LibraryStats {
    pub total: usize,
    pub playing: usize,
    pub completed: usize,
    pub backlog: usize,
    pub dropped: usize,
}

impl LibraryStats {
    pub fn of(collection: &[CollectionEntry]) -> Self {
        let mut stats = Self {
            total: collection.len(),
            ..Self::default()
        };
        for entry in collection {
            match entry.status {
                GameStatus::Playing => stats.playing += 1,
                GameStatus::Completed => stats.completed += 1,
                GameStatus::Backlog => stats.backlog += 1,
                GameStatus::Dropped => stats.dropped += 1,
            }
        }
        stats
    }

    pub fn count(&self, status: GameStatus) -> usize {
        match status {
            GameStatus::Playing => self.playing,
            GameStatus::Completed => self.completed,
            GameStatus::Backlog => self.backlog,
            GameStatus::Dropped => self.dropped,
        }
    }

    /// Share of completed games as a percentage, to one decimal place.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let rate = self.completed as f64 / self.total as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }
}
