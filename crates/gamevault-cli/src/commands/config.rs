use clap::Subcommand;
use gamevault_core::config::VaultConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Create ~/.gamevault/ with a default config and storage database
    Init,
    /// Show current configuration
    Show,
}

pub fn run(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let home = VaultConfig::init()?;
            let db_path = VaultConfig::db_path()?;

            gamevault_db::open_db(&db_path)?;

            println!("Initialized gamevault at {}", home.display());
            println!("  config:   {}", VaultConfig::config_path()?.display());
            println!("  database: {}", db_path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = VaultConfig::load()?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{toml_str}");
            Ok(())
        }
    }
}
