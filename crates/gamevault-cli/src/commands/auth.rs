use clap::Subcommand;
use gamevault_auth::{resolve_api_key, CredentialStore, KeyringStore, API_KEY_ENTRY, API_KEY_ENV};
use gamevault_core::error::VaultError;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the catalog API key in the OS keychain
    SetKey {
        /// API key (will prompt if not provided)
        #[arg(long)]
        key: Option<String>,
    },
    /// Remove the stored API key
    Clear,
    /// Show where the API key is coming from
    Status,
}

pub fn run(action: AuthAction) -> anyhow::Result<()> {
    let cred_store = KeyringStore::new();

    match action {
        AuthAction::SetKey { key } => {
            let key = match key {
                Some(k) => k,
                None => {
                    eprint!("Enter catalog API key: ");
                    let mut input = String::new();
                    std::io::stdin().read_line(&mut input)?;
                    input
                }
            };
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("API key cannot be empty");
            }

            cred_store.store(API_KEY_ENTRY, key)?;
            println!("API key stored in OS keychain as '{API_KEY_ENTRY}'");
            Ok(())
        }
        AuthAction::Clear => {
            cred_store.delete(API_KEY_ENTRY)?;
            println!("API key removed from OS keychain");
            Ok(())
        }
        AuthAction::Status => {
            match resolve_api_key(&cred_store, std::env::var(API_KEY_ENV).ok()) {
                Ok((_, source)) => println!("API key configured via {source}"),
                Err(VaultError::MissingApiKey) => println!(
                    "No API key configured. Use `gamevault auth set-key` or set {API_KEY_ENV}."
                ),
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }
    }
}
