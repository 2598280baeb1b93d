use clap::Args;
use comfy_table::{Cell, Table};

use gamevault_catalog::latest::LatestOnly;
use gamevault_catalog::pagination::{page_window, PageMarker};
use gamevault_catalog::session::{BrowseSession, Section};
use gamevault_core::config::VaultConfig;
use gamevault_core::models::query::{genre_id, platform_id};

use crate::palette::Palette;

#[derive(Args)]
pub struct BrowseArgs {
    /// Which listing to show: all, top-rated or new-releases
    #[arg(long, default_value = "all")]
    section: Section,

    /// Free-text search
    #[arg(long, short)]
    search: Option<String>,

    /// Platform filter: pc, playstation, xbox or nintendo
    #[arg(long, value_parser = platform_id)]
    platform: Option<u32>,

    /// Genre filter: action, rpg, strategy or shooter
    #[arg(long, value_parser = genre_id)]
    genre: Option<u32>,

    /// Only games released in this year
    #[arg(long)]
    year: Option<i32>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,
}

pub async fn run(args: BrowseArgs) -> anyhow::Result<()> {
    let config = VaultConfig::load()?;
    let provider = super::catalog(&config)?;
    let store = super::open_store(&config)?;
    let palette = Palette::new(store.dark_mode());

    let mut session = BrowseSession::new(config.page_size);
    session.set_section(args.section);
    if args.section == Section::All {
        session.set_search(args.search);
        session.set_platform(args.platform);
        session.set_genre(args.genre);
        session.set_year(args.year);
    } else if args.search.is_some()
        || args.platform.is_some()
        || args.genre.is_some()
        || args.year.is_some()
    {
        tracing::warn!(
            "filters only apply to the 'all' section; ignoring them for {}",
            args.section
        );
    }
    session.go_to_page(args.page);

    let guard = LatestOnly::new();
    let today = chrono::Local::now().date_naive();
    let pb = super::spinner(format!("Loading {} page {}...", args.section, session.page()));
    let result = session.fetch(provider, &guard, today).await;
    pb.finish_and_clear();

    let Some(page) = result? else {
        return Ok(());
    };

    if page.results.is_empty() {
        println!("No games found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(palette.header(&[
        "ID",
        "NAME",
        "RELEASED",
        "RATING",
        "PLATFORMS",
        "COLLECTION",
    ]));

    for game in &page.results {
        let collection_cell = match store.get(game.id) {
            Some(entry) => palette.status_cell(entry.status),
            None => Cell::new(""),
        };
        table.add_row(vec![
            Cell::new(game.id),
            Cell::new(&game.name),
            Cell::new(game.released.as_deref().unwrap_or("—")),
            Cell::new(format!("{:.1}", game.rating)),
            Cell::new(game.platform_names().join(", ")),
            collection_cell,
        ]);
    }

    println!("{table}");

    let total = session.total_pages().unwrap_or(1);
    let current = session.page();
    let pager: Vec<String> = page_window(current, total)
        .into_iter()
        .map(|marker| match marker {
            PageMarker::Page(n) if n == current => palette.heading(format!("[{n}]")).to_string(),
            other => other.to_string(),
        })
        .collect();
    println!();
    println!("{} games  |  page {}", page.count, pager.join(" "));

    Ok(())
}
