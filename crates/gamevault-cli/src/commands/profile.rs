use clap::Subcommand;
use comfy_table::{Cell, Table};

use gamevault_core::config::VaultConfig;
use gamevault_core::error::VaultError;
use gamevault_store::library::LibraryStats;
use gamevault_store::profile::{load_username, save_username};

use crate::palette::Palette;

const RECENT_LIMIT: usize = 5;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show your name, collection stats and latest additions
    Show,
    /// Change your display name
    Rename {
        name: String,
    },
}

pub fn run(action: ProfileAction) -> anyhow::Result<()> {
    match action {
        ProfileAction::Show => {
            let config = VaultConfig::load()?;
            let store = super::open_store(&config)?;
            let palette = Palette::new(store.dark_mode());
            let username = load_username(store.storage());
            let stats = LibraryStats::of(store.collection());

            println!("{}", palette.heading(&username));
            println!(
                "  {} games, {}% completed",
                stats.total,
                stats.completion_rate()
            );

            let mut table = Table::new();
            table.set_header(palette.header(&["PLAYING", "COMPLETED", "BACKLOG", "DROPPED"]));
            table.add_row(vec![
                Cell::new(stats.playing),
                Cell::new(stats.completed),
                Cell::new(stats.backlog),
                Cell::new(stats.dropped),
            ]);
            println!("{table}");

            // Newest additions are at the end of the collection.
            let recent: Vec<_> = store.collection().iter().rev().take(RECENT_LIMIT).collect();
            if !recent.is_empty() {
                println!();
                println!("{}", palette.heading("Recently added"));
                for entry in recent {
                    println!("  {:<40} {}", entry.name, entry.status);
                }
            }
            Ok(())
        }
        ProfileAction::Rename { name } => {
            let mut storage = super::open_storage()?;
            match save_username(&mut storage, &name) {
                Ok(saved) => {
                    println!("Profile name set to '{saved}'");
                    Ok(())
                }
                Err(VaultError::InvalidInput(errors)) => {
                    anyhow::bail!("{}", errors.message_for("username").unwrap_or("invalid name"))
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
