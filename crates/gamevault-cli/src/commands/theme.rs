use clap::Subcommand;
use gamevault_core::config::VaultConfig;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Show the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

fn name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

pub fn run(action: ThemeAction) -> anyhow::Result<()> {
    let config = VaultConfig::load()?;
    let mut store = super::open_store(&config)?;

    match action {
        ThemeAction::Show => println!("Theme: {}", name(store.dark_mode())),
        ThemeAction::Toggle => {
            let dark = store.toggle_theme();
            println!("Theme: {}", name(dark));
            super::report_unsaved(&store);
        }
    }
    Ok(())
}
