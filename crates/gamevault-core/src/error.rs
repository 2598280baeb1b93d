use crate::models::game::GameId;
use crate::validation::ValidationErrors;

/// Central error type for the gamevault system.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("game not found: {id}")]
    GameNotFound { id: GameId },

    #[error("no catalog API key configured (set RAWG_API_KEY or run `gamevault auth set-key`)")]
    MissingApiKey,

    #[error("catalog API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("catalog request failed: {message}")]
    Transport { message: String },

    #[error("could not decode catalog response: {message}")]
    Decode { message: String },

    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("credential error: {message}")]
    CredentialError { message: String },
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        VaultError::Serialization(e.to_string())
    }
}
