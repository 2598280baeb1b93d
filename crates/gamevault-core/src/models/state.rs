use serde::{Deserialize, Serialize};

use super::game::{CollectionEntry, GameId, GameStatus};

/// What to do when an entry is added whose id is already collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the existing entry and ignore the new one.
    #[default]
    Reject,
    /// Append regardless, allowing several entries with one id.
    Allow,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::Allow => write!(f, "allow"),
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(DuplicatePolicy::Reject),
            "allow" => Ok(DuplicatePolicy::Allow),
            _ => Err(format!("unknown duplicate policy: {s}")),
        }
    }
}

/// A mutation intent against the collection state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(CollectionEntry),
    Remove(GameId),
    UpdateStatus { id: GameId, status: GameStatus },
    ToggleTheme,
    /// Replace the whole collection, e.g. from an import.
    Replace(Vec<CollectionEntry>),
}

/// The effect an [`Action`] had on the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added,
    AlreadyPresent,
    Removed(usize),
    StatusUpdated(usize),
    ThemeToggled(bool),
    Replaced { kept: usize, dropped: usize },
}

impl Change {
    /// Whether the state differs from before the action.
    pub fn is_mutation(&self) -> bool {
        match self {
            Change::Added | Change::ThemeToggled(_) | Change::Replaced { .. } => true,
            Change::AlreadyPresent => false,
            Change::Removed(n) | Change::StatusUpdated(n) => *n > 0,
        }
    }
}

/// The user's collection plus UI theme preference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionState {
    pub collection: Vec<CollectionEntry>,
    pub dark_mode: bool,
}

impl CollectionState {
    pub fn new(collection: Vec<CollectionEntry>, dark_mode: bool) -> Self {
        Self {
            collection,
            dark_mode,
        }
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.collection.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: GameId) -> Option<&CollectionEntry> {
        self.collection.iter().find(|e| e.id == id)
    }

    /// Apply `action` in place and report what changed.
    pub fn apply(&mut self, action: Action, policy: DuplicatePolicy) -> Change {
        match action {
            Action::Add(entry) => {
                if policy == DuplicatePolicy::Reject && self.contains(entry.id) {
                    return Change::AlreadyPresent;
                }
                self.collection.push(entry);
                Change::Added
            }
            Action::Remove(id) => {
                let before = self.collection.len();
                self.collection.retain(|e| e.id != id);
                Change::Removed(before - self.collection.len())
            }
            Action::UpdateStatus { id, status } => {
                let mut updated = 0;
                for entry in self.collection.iter_mut().filter(|e| e.id == id) {
                    if entry.status != status {
                        entry.status = status;
                        updated += 1;
                    }
                }
                Change::StatusUpdated(updated)
            }
            Action::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                Change::ThemeToggled(self.dark_mode)
            }
            Action::Replace(entries) => {
                let total = entries.len();
                self.collection = dedupe(entries, policy);
                Change::Replaced {
                    kept: self.collection.len(),
                    dropped: total - self.collection.len(),
                }
            }
        }
    }
}

/// Collapse repeated ids (first occurrence wins) under `Reject`.
pub fn dedupe(entries: Vec<CollectionEntry>, policy: DuplicatePolicy) -> Vec<CollectionEntry> {
    if policy == DuplicatePolicy::Allow {
        return entries;
    }
    let mut seen = std::collections::HashSet::new();
    entries.into_iter().filter(|e| seen.insert(e.id)).collect()
}
