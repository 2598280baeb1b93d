use gamevault_core::error::VaultError;
use gamevault_core::validation::{FieldError, ValidationErrors};
use gamevault_db::{keys, KeyValueStorage};

pub const DEFAULT_USERNAME: &str = "Game Enthusiast";

/// Display name shown on the profile, stored alongside the collection.
pub fn load_username<S: KeyValueStorage>(storage: &S) -> String {
    match storage.read(keys::USERNAME) {
        Ok(Some(name)) if !name.trim().is_empty() => name,
        Ok(_) => DEFAULT_USERNAME.to_string(),
        Err(e) => {
            tracing::warn!("error loading username from storage: {e}");
            DEFAULT_USERNAME.to_string()
        }
    }
}

/// Save a new display name. Blank names are rejected before storage is touched.
pub fn save_username<S: KeyValueStorage>(
    storage: &mut S,
    name: &str,
) -> Result<String, VaultError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationErrors(vec![FieldError {
            field: "username",
            message: "Username is required".into(),
        }])
        .into());
    }
    if let Err(e) = storage.write(keys::USERNAME, name.to_string()) {
        tracing::error!("error saving username to storage: {e}");
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamevault_db::MemoryStorage;

    #[test]
    fn test_default_and_rename() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_username(&storage), DEFAULT_USERNAME);

        assert_eq!(save_username(&mut storage, "  Samus ").unwrap(), "Samus");
        assert_eq!(load_username(&storage), "Samus");
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut storage = MemoryStorage::new();
        let err = save_username(&mut storage, "   ").unwrap_err();
        assert!(matches!(err, VaultError::InvalidInput(_)));
        assert!(storage.is_empty());
    }
}
