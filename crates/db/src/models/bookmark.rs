//! Bookmark entity model and DTOs.

use bookmarks_core::types::{DbId, Rating};
use bookmarks_core::validation::{ValidBookmark, ValidPatch};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bookmarks` table.
///
/// Fields are stored exactly as received; markup is stripped when the
/// record is serialized for clients, not here.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Bookmark {
    pub id: DbId,
    pub title: String,
    pub url: String,
    pub rating: Rating,
    pub description: String,
}

/// DTO for inserting a new bookmark.
#[derive(Debug, Clone)]
pub struct CreateBookmark {
    pub title: String,
    pub url: String,
    pub rating: Rating,
    /// Stored as an empty string if omitted.
    pub description: Option<String>,
}

/// DTO for updating an existing bookmark. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookmark {
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<Rating>,
    pub description: Option<String>,
}

impl From<ValidBookmark> for CreateBookmark {
    fn from(valid: ValidBookmark) -> Self {
        Self {
            title: valid.title,
            url: valid.url,
            rating: valid.rating,
            description: valid.description,
        }
    }
}

impl From<ValidPatch> for UpdateBookmark {
    fn from(valid: ValidPatch) -> Self {
        Self {
            title: valid.title,
            url: valid.url,
            rating: valid.rating,
            description: valid.description,
        }
    }
}

impl Bookmark {
    /// Merge the supplied fields of `input` into this record.
    pub fn apply(&mut self, input: &UpdateBookmark) {
        if let Some(title) = &input.title {
            self.title.clone_from(title);
        }
        if let Some(url) = &input.url {
            self.url.clone_from(url);
        }
        if let Some(rating) = input.rating {
            self.rating = rating;
        }
        if let Some(description) = &input.description {
            self.description.clone_from(description);
        }
    }
}
