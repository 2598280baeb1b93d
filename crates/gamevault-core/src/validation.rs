use chrono::NaiveDate;

use crate::models::game::{CollectionEntry, GameId, GameStatus};

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", summary(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// A user-authored game, as typed into the "add game" form.
#[derive(Debug, Clone, Default)]
pub struct NewGameDraft {
    pub title: String,
    pub platform: String,
    pub genre: String,
    pub status: GameStatus,
    pub release_date: String,
    /// Free text; empty means unrated.
    pub rating: String,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub developer: Option<String>,
    pub image_url: Option<String>,
}

impl NewGameDraft {
    /// Check the draft and turn it into a collection entry with `id`.
    pub fn validate(self, id: GameId) -> Result<CollectionEntry, ValidationErrors> {
        let mut errors = Vec::new();
        let mut push = |field: &'static str, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        if self.title.trim().is_empty() {
            push("title", "Title is required");
        }
        if self.platform.trim().is_empty() {
            push("platform", "Platform is required");
        }
        let release = self.release_date.trim();
        if release.is_empty() {
            push("releaseDate", "Release date is required");
        } else if NaiveDate::parse_from_str(release, "%Y-%m-%d").is_err() {
            push("releaseDate", "Release date must be YYYY-MM-DD");
        }
        if self.genre.trim().is_empty() {
            push("genre", "Genre is required");
        }
        let rating = match self.rating.trim() {
            "" => 0.0,
            text => match text.parse::<f64>() {
                Ok(r) if (0.0..=5.0).contains(&r) => r,
                _ => {
                    push("rating", "Rating must be between 0 and 5");
                    0.0
                }
            },
        };

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        let mut entry = CollectionEntry::new(id, self.title.trim(), self.status);
        entry.release_date = Some(release.to_string());
        entry.image_url = self.image_url.filter(|s| !s.trim().is_empty());
        entry.rating = rating;
        entry.platform = Some(self.platform.trim().to_string());
        entry.genre = Some(self.genre.trim().to_string());
        entry.description = self.description.filter(|s| !s.trim().is_empty());
        entry.publisher = self.publisher.filter(|s| !s.trim().is_empty());
        entry.developer = self.developer.filter(|s| !s.trim().is_empty());
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> NewGameDraft {
        NewGameDraft {
            title: "Hollow Knight".into(),
            platform: "PC".into(),
            genre: "Action".into(),
            status: GameStatus::Backlog,
            release_date: "2017-02-24".into(),
            rating: "4.5".into(),
            ..NewGameDraft::default()
        }
    }

    #[test]
    fn test_valid_draft_builds_entry() {
        let entry = complete().validate(GameId(42)).unwrap();
        assert_eq!(entry.id, GameId(42));
        assert_eq!(entry.name, "Hollow Knight");
        assert_eq!(entry.release_date.as_deref(), Some("2017-02-24"));
        assert_eq!(entry.rating, 4.5);
        assert_eq!(entry.status, GameStatus::Backlog);
        assert_eq!(entry.platform.as_deref(), Some("PC"));
    }

    #[test]
    fn test_empty_draft_reports_every_required_field() {
        let errors = NewGameDraft::default().validate(GameId(1)).unwrap_err();
        let fields: Vec<_> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "platform", "releaseDate", "genre"]);
        assert_eq!(errors.message_for("title"), Some("Title is required"));
    }

    #[test]
    fn test_rating_out_of_range() {
        let mut draft = complete();
        draft.rating = "7".into();
        let errors = draft.validate(GameId(1)).unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert_eq!(errors.message_for("rating"), Some("Rating must be between 0 and 5"));

        let mut draft = complete();
        draft.rating = "great".into();
        assert!(draft.validate(GameId(1)).is_err());
    }

    #[test]
    fn test_bad_release_date() {
        let mut draft = complete();
        draft.release_date = "24/02/2017".into();
        let errors = draft.validate(GameId(1)).unwrap_err();
        assert_eq!(errors.message_for("releaseDate"), Some("Release date must be YYYY-MM-DD"));
    }
}
