use clap::Args;

use gamevault_catalog::fetch_overview;
use gamevault_core::config::VaultConfig;
use gamevault_core::models::game::GameId;

use crate::palette::Palette;

#[derive(Args)]
pub struct GameArgs {
    /// Catalog id of the game
    id: GameId,
}

fn names<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(String::as_str).collect::<Vec<_>>().join(", ")
}

pub async fn run(args: GameArgs) -> anyhow::Result<()> {
    let config = VaultConfig::load()?;
    let provider = super::catalog(&config)?;
    let store = super::open_store(&config)?;
    let palette = Palette::new(store.dark_mode());

    let pb = super::spinner(format!("Fetching game {}...", args.id));
    let overview = fetch_overview(provider.as_ref(), args.id).await;
    pb.finish_and_clear();
    let overview = overview?;
    let details = &overview.details;

    println!("{}", palette.heading(&details.name));
    if let Some(released) = &details.released {
        println!("  Released:   {released}");
    }
    println!("  Rating:     {:.1}", details.rating);
    if let Some(score) = details.metacritic {
        println!("  Metacritic: {score}");
    }
    if details.playtime > 0 {
        println!("  Playtime:   {}h", details.playtime);
    }
    if !details.genres.is_empty() {
        println!("  Genres:     {}", names(details.genres.iter().map(|g| &g.name)));
    }
    if !details.platforms.is_empty() {
        println!(
            "  Platforms:  {}",
            names(details.platforms.iter().map(|p| &p.platform.name))
        );
    }
    if !details.developers.is_empty() {
        println!("  Developers: {}", names(details.developers.iter().map(|d| &d.name)));
    }
    if !details.publishers.is_empty() {
        println!("  Publishers: {}", names(details.publishers.iter().map(|p| &p.name)));
    }
    if let Some(esrb) = &details.esrb_rating {
        println!("  ESRB:       {}", esrb.name);
    }
    if let Some(website) = &details.website {
        if !website.is_empty() {
            println!("  Website:    {website}");
        }
    }

    match store.get(details.id) {
        Some(entry) => println!("  Collection: {}", entry.status),
        None => println!("  Collection: not added (`gamevault collection add {}`)", details.id),
    }

    if let Some(description) = details.description_raw.as_deref().filter(|d| !d.is_empty()) {
        println!();
        println!("{description}");
    }

    if !overview.screenshots.is_empty() {
        println!();
        println!("{}", palette.heading("Screenshots"));
        for shot in &overview.screenshots {
            println!("  {}", shot.image);
        }
    }

    if !overview.stores.is_empty() {
        println!();
        println!("{}", palette.heading("Where to buy"));
        for link in &overview.stores {
            println!("  {:<18} {}", link.store_name().unwrap_or("Store"), link.url);
        }
    }

    Ok(())
}
