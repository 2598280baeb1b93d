use gamevault_core::error::VaultError;
use gamevault_core::models::game::{CollectionEntry, GameId, GameStatus};
use gamevault_core::models::state::{dedupe, Action, Change, CollectionState, DuplicatePolicy};
use gamevault_db::{keys, KeyValueStorage};

/// Result of adding a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The id was already collected and the duplicate policy kept the old entry.
    AlreadyPresent,
}

/// Owner of the collection state, writing every change through to `storage`.
///
/// Mutations take `&mut self`, so each one is applied and persisted before
/// the next can begin. Storage failures are logged and never surface to the
/// caller; the in-memory state stays authoritative for the session.
pub struct CollectionStore<S: KeyValueStorage> {
    state: CollectionState,
    storage: S,
    policy: DuplicatePolicy,
    persisted: bool,
}

impl<S: KeyValueStorage> CollectionStore<S> {
    /// Load persisted state from `storage`. A missing collection starts empty.
    /// An unreadable collection discards the whole stored state, so the theme
    /// falls back to `ambient_dark_mode` (or light) as well.
    pub fn hydrate(
        storage: S,
        ambient_dark_mode: Option<bool>,
        policy: DuplicatePolicy,
    ) -> Self {
        let fallback_theme = ambient_dark_mode.unwrap_or(false);
        let (collection, dark_mode) = match load_collection(&storage, policy) {
            Some(collection) => {
                let dark_mode = load_dark_mode(&storage).unwrap_or(fallback_theme);
                (collection, dark_mode)
            }
            None => (Vec::new(), fallback_theme),
        };
        tracing::debug!(
            "hydrated {} collection entries (dark mode: {dark_mode})",
            collection.len()
        );
        Self {
            state: CollectionState::new(collection, dark_mode),
            storage,
            policy,
            persisted: true,
        }
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn collection(&self) -> &[CollectionEntry] {
        &self.state.collection
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.state.contains(id)
    }

    pub fn get(&self, id: GameId) -> Option<&CollectionEntry> {
        self.state.get(id)
    }

    /// Whether the last write to storage succeeded.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Apply `action`, persisting the result if anything changed.
    pub fn dispatch(&mut self, action: Action) -> Change {
        let change = self.state.apply(action, self.policy);
        if change.is_mutation() {
            self.persist();
        } else {
            tracing::debug!("{change:?} left the collection unchanged");
        }
        change
    }

    pub fn add_to_collection(&mut self, entry: CollectionEntry) -> AddOutcome {
        match self.dispatch(Action::Add(entry)) {
            Change::AlreadyPresent => AddOutcome::AlreadyPresent,
            _ => AddOutcome::Added,
        }
    }

    /// Remove every entry with `id`, returning how many were removed.
    pub fn remove_from_collection(&mut self, id: GameId) -> usize {
        match self.dispatch(Action::Remove(id)) {
            Change::Removed(n) => n,
            _ => 0,
        }
    }

    /// Set the status of `id`. Returns `false` when nothing changed.
    pub fn update_status(&mut self, id: GameId, status: GameStatus) -> bool {
        self.dispatch(Action::UpdateStatus { id, status }).is_mutation()
    }

    /// Flip the theme and return the new value.
    pub fn toggle_theme(&mut self) -> bool {
        self.dispatch(Action::ToggleTheme);
        self.state.dark_mode
    }

    /// Replace the whole collection. Returns `(kept, dropped)` after the
    /// duplicate policy is applied.
    pub fn replace_collection(&mut self, entries: Vec<CollectionEntry>) -> (usize, usize) {
        match self.dispatch(Action::Replace(entries)) {
            Change::Replaced { kept, dropped } => (kept, dropped),
            _ => (self.state.collection.len(), 0),
        }
    }

    fn persist(&mut self) {
        match self.write_state() {
            Ok(()) => self.persisted = true,
            Err(e) => {
                tracing::error!("error saving collection to storage: {e}");
                self.persisted = false;
            }
        }
    }

    fn write_state(&mut self) -> Result<(), VaultError> {
        let collection = serde_json::to_string(&self.state.collection)?;
        let dark_mode = serde_json::to_string(&self.state.dark_mode)?;
        self.storage.write_batch(&[
            (keys::COLLECTION, collection),
            (keys::DARK_MODE, dark_mode),
        ])
    }
}

// `None` when the stored collection cannot be read or parsed.
fn load_collection<S: KeyValueStorage>(
    storage: &S,
    policy: DuplicatePolicy,
) -> Option<Vec<CollectionEntry>> {
    let raw = match storage.read(keys::COLLECTION) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Some(Vec::new()),
        Err(e) => {
            tracing::warn!("error loading collection from storage: {e}");
            return None;
        }
    };
    let entries: Vec<CollectionEntry> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("stored collection is unreadable, discarding stored state: {e}");
            return None;
        }
    };
    let total = entries.len();
    let entries = dedupe(entries, policy);
    if entries.len() < total {
        tracing::warn!(
            "dropped {} duplicate collection entries from storage",
            total - entries.len()
        );
    }
    Some(entries)
}

fn load_dark_mode<S: KeyValueStorage>(storage: &S) -> Option<bool> {
    match storage.read(keys::DARK_MODE) {
        Ok(Some(raw)) => serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!("stored theme flag is unreadable: {e}"))
            .ok(),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("error loading theme from storage: {e}");
            None
        }
    }
}
