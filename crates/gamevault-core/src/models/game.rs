use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of a game, shared with the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl GameId {
    /// Generate an id for a user-authored entry from the current time in
    /// milliseconds, stepping forward until it is not in `taken`.
    pub fn generate_local<'a, I>(taken: I) -> Self
    where
        I: IntoIterator<Item = &'a GameId>,
    {
        let taken: Vec<u64> = taken.into_iter().map(|id| id.0).collect();
        let mut candidate = chrono::Utc::now().timestamp_millis().max(0) as u64;
        while taken.contains(&candidate) {
            candidate += 1;
        }
        Self(candidate)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GameId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(GameId)
            .map_err(|_| format!("invalid game id: {s}"))
    }
}

/// Where the player is with a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Completed,
    Backlog,
    Dropped,
}

impl GameStatus {
    pub const ALL: [GameStatus; 4] = [
        GameStatus::Playing,
        GameStatus::Completed,
        GameStatus::Backlog,
        GameStatus::Dropped,
    ];
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Playing => write!(f, "Playing"),
            GameStatus::Completed => write!(f, "Completed"),
            GameStatus::Backlog => write!(f, "Backlog"),
            GameStatus::Dropped => write!(f, "Dropped"),
        }
    }
}

impl std::str::FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "playing" => Ok(GameStatus::Playing),
            "completed" => Ok(GameStatus::Completed),
            "backlog" => Ok(GameStatus::Backlog),
            "dropped" => Ok(GameStatus::Dropped),
            _ => Err(format!("unknown game status: {s}")),
        }
    }
}

/// A game in the user's personal collection.
///
/// Field names on the wire follow the catalog's JSON (`released`,
/// `background_image`) so catalog payloads can be stored as-is. Fields the
/// store does not know about are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: GameId,
    pub name: String,
    #[serde(rename = "released", default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(rename = "background_image", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "rating_or_zero")]
    pub rating: f64,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl CollectionEntry {
    pub fn new(id: GameId, name: impl Into<String>, status: GameStatus) -> Self {
        Self {
            id,
            name: name.into(),
            release_date: None,
            image_url: None,
            rating: 0.0,
            status,
            platform: None,
            genre: None,
            description: None,
            publisher: None,
            developer: None,
            extra: BTreeMap::new(),
        }
    }
}

// Catalog payloads sometimes carry `"rating": null`.
fn rating_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_playing() {
        assert_eq!(GameStatus::default(), GameStatus::Playing);
        let entry: CollectionEntry = serde_json::from_str(r#"{"id": 2, "name": "B"}"#).unwrap();
        assert_eq!(entry.status, GameStatus::Playing);
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("backlog".parse::<GameStatus>().unwrap(), GameStatus::Backlog);
        assert_eq!("DROPPED".parse::<GameStatus>().unwrap(), GameStatus::Dropped);
        assert!("wishlist".parse::<GameStatus>().is_err());
    }

    #[test]
    fn test_entry_uses_catalog_field_names() {
        let mut entry =
            CollectionEntry::new(GameId(3498), "Grand Theft Auto V", GameStatus::Completed);
        entry.release_date = Some("2013-09-17".into());
        entry.image_url = Some("https://media.example/gta.jpg".into());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 3498);
        assert_eq!(json["released"], "2013-09-17");
        assert_eq!(json["background_image"], "https://media.example/gta.jpg");
        assert_eq!(json["status"], "Completed");
        assert!(json.get("platform").is_none());
    }

    #[test]
    fn test_entry_keeps_unknown_fields() {
        let raw = r#"{"id":1,"name":"A","status":"Playing","rating":null,"metacritic":92,"slug":"a"}"#;
        let entry: CollectionEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.rating, 0.0);
        assert_eq!(entry.extra["metacritic"], 92);

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["slug"], "a");
    }

    #[test]
    fn test_generate_local_skips_taken_ids() {
        let first = GameId::generate_local(&[]);
        let taken = vec![first, GameId(first.0 + 1)];
        let next = GameId::generate_local(&taken);
        assert!(!taken.contains(&next));
    }
}
