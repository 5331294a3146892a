//! Outbound representation of a bookmark.
//!
//! Every bookmark leaving the API goes through [`BookmarkResponse`], which
//! strips unsafe markup from `title` and `description`.

use bookmarks_core::sanitize::sanitize_text;
use bookmarks_core::types::{DbId, Rating};
use bookmarks_db::models::bookmark::Bookmark;
use serde::Serialize;

/// JSON shape of a bookmark as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkResponse {
    pub id: DbId,
    pub title: String,
    pub url: String,
    pub rating: Rating,
    pub description: String,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id,
            title: sanitize_text(&bookmark.title),
            url: bookmark.url,
            rating: bookmark.rating,
            description: sanitize_text(&bookmark.description),
        }
    }
}
