use std::path::PathBuf;

use clap::Subcommand;
use comfy_table::{Cell, Table};

use gamevault_core::config::VaultConfig;
use gamevault_core::models::game::{CollectionEntry, GameId, GameStatus};
use gamevault_core::models::state::DuplicatePolicy;
use gamevault_core::validation::NewGameDraft;
use gamevault_store::library::{library_view, LibrarySort, LibraryStats};
use gamevault_store::AddOutcome;

use crate::palette::Palette;

#[derive(Subcommand)]
pub enum CollectionAction {
    /// List games in the collection
    List {
        /// Only show games with this status
        #[arg(long)]
        status: Option<GameStatus>,
        /// Sort by name or date
        #[arg(long, default_value = "name")]
        sort: LibrarySort,
    },
    /// Show per-status counts
    Stats,
    /// Add a catalog game to the collection
    Add {
        /// Catalog id of the game
        id: GameId,
        /// Initial status
        #[arg(long, default_value = "playing")]
        status: GameStatus,
    },
    /// Add a game that is not in the catalog
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        platform: String,
        #[arg(long)]
        genre: String,
        /// Release date as YYYY-MM-DD
        #[arg(long)]
        release_date: String,
        #[arg(long, default_value = "playing")]
        status: GameStatus,
        /// Rating between 0 and 5
        #[arg(long, default_value = "")]
        rating: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        publisher: Option<String>,
        #[arg(long)]
        developer: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Remove a game from the collection
    Remove {
        id: GameId,
    },
    /// Change the status of a game
    Status {
        id: GameId,
        status: GameStatus,
    },
    /// Write the collection as JSON
    Export {
        /// Output file (stdout if omitted)
        path: Option<PathBuf>,
    },
    /// Load a collection from a JSON export
    Import {
        path: PathBuf,
        /// Keep existing entries and append the imported ones
        #[arg(long)]
        merge: bool,
    },
}

pub async fn run(action: CollectionAction) -> anyhow::Result<()> {
    let config = VaultConfig::load()?;
    let mut store = super::open_store(&config)?;
    let palette = Palette::new(store.dark_mode());

    match action {
        CollectionAction::List { status, sort } => {
            let view = library_view(store.collection(), status, sort);
            if view.is_empty() {
                match status {
                    Some(s) => println!("No {s} games in your collection."),
                    None => println!(
                        "Your collection is empty. Use `gamevault collection add` to add a game."
                    ),
                }
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(palette.header(&[
                "ID", "NAME", "STATUS", "RELEASED", "RATING", "PLATFORM", "GENRE",
            ]));
            for entry in view {
                table.add_row(vec![
                    Cell::new(entry.id),
                    Cell::new(&entry.name),
                    palette.status_cell(entry.status),
                    Cell::new(entry.release_date.as_deref().unwrap_or("—")),
                    Cell::new(format!("{:.1}", entry.rating)),
                    Cell::new(entry.platform.as_deref().unwrap_or("")),
                    Cell::new(entry.genre.as_deref().unwrap_or("")),
                ]);
            }
            println!("{table}");
        }

        CollectionAction::Stats => {
            let stats = LibraryStats::of(store.collection());
            let mut table = Table::new();
            table.set_header(palette.header(&["STATUS", "GAMES"]));
            for status in GameStatus::ALL {
                table.add_row(vec![palette.status_cell(status), Cell::new(stats.count(status))]);
            }
            table.add_row(vec![Cell::new("total"), Cell::new(stats.total)]);
            println!("{table}");
            println!("Completion rate: {}%", stats.completion_rate());
        }

        CollectionAction::Add { id, status } => {
            if store.contains(id) && store.policy() == DuplicatePolicy::Reject {
                println!("Game {id} is already in your collection.");
                return Ok(());
            }

            let provider = super::catalog(&config)?;
            let pb = super::spinner(format!("Fetching game {id}..."));
            let details = provider.game_details(id).await;
            pb.finish_and_clear();
            let entry = details?.to_entry(status);

            let name = entry.name.clone();
            match store.add_to_collection(entry) {
                AddOutcome::Added => println!("Added '{name}' as {status}"),
                AddOutcome::AlreadyPresent => println!("'{name}' is already in your collection."),
            }
            super::report_unsaved(&store);
        }

        CollectionAction::New {
            title,
            platform,
            genre,
            release_date,
            status,
            rating,
            description,
            publisher,
            developer,
            image_url,
        } => {
            let draft = NewGameDraft {
                title,
                platform,
                genre,
                status,
                release_date,
                rating,
                description,
                publisher,
                developer,
                image_url,
            };
            let id = GameId::generate_local(store.collection().iter().map(|e| &e.id));
            let entry = match draft.validate(id) {
                Ok(entry) => entry,
                Err(errors) => {
                    for error in &errors.0 {
                        eprintln!("  {}: {}", error.field, error.message);
                    }
                    anyhow::bail!("game not added: {} invalid field(s)", errors.0.len());
                }
            };

            let name = entry.name.clone();
            store.add_to_collection(entry);
            println!("Added '{name}' with id {id}");
            super::report_unsaved(&store);
        }

        CollectionAction::Remove { id } => {
            let name = store.get(id).map(|e| e.name.clone());
            match (store.remove_from_collection(id), name) {
                (0, _) => println!("Game {id} is not in your collection."),
                (_, Some(name)) => println!("Removed '{name}'"),
                (_, None) => println!("Removed game {id}"),
            }
            super::report_unsaved(&store);
        }

        CollectionAction::Status { id, status } => {
            if !store.contains(id) {
                anyhow::bail!("Game {id} is not in your collection");
            }
            if store.update_status(id, status) {
                println!("Game {id} is now {status}");
            } else {
                println!("Game {id} is already {status}");
            }
            super::report_unsaved(&store);
        }

        CollectionAction::Export { path } => {
            let json = serde_json::to_string_pretty(store.collection())?;
            match path {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported {} games to {}", store.collection().len(), path.display());
                }
                None => println!("{json}"),
            }
        }

        CollectionAction::Import { path, merge } => {
            let raw = std::fs::read_to_string(&path)?;
            let imported: Vec<CollectionEntry> = serde_json::from_str(&raw)?;

            let entries = if merge {
                let mut merged = store.collection().to_vec();
                merged.extend(imported);
                merged
            } else {
                imported
            };

            let (kept, dropped) = store.replace_collection(entries);
            println!("Collection now has {kept} games");
            if dropped > 0 {
                println!("Skipped {dropped} duplicate entries");
            }
            super::report_unsaved(&store);
        }
    }

    Ok(())
}
