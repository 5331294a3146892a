//! Process-local [`BookmarkStore`].
//!
//! Used when no `DATABASE_URL` is configured and by the HTTP integration
//! tests. Contents are lost when the process exits.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bookmarks_core::types::DbId;

use super::BookmarkStore;
use crate::models::bookmark::{Bookmark, CreateBookmark, UpdateBookmark};

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<DbId, Bookmark>,
    last_id: DbId,
}

/// Bookmarks held in a mutex-guarded ordered map.
///
/// Ids start at 1 and are never reused, matching `BIGSERIAL`.
#[derive(Debug, Default)]
pub struct InMemoryBookmarkStore {
    inner: Mutex<Inner>,
}

impl InMemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a fixed set of rows. Later inserts continue after the
    /// highest seeded id.
    pub fn with_bookmarks(bookmarks: impl IntoIterator<Item = Bookmark>) -> Self {
        let rows: BTreeMap<DbId, Bookmark> = bookmarks.into_iter().map(|b| (b.id, b)).collect();
        let last_id = rows.keys().next_back().copied().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner { rows, last_id }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, sqlx::Error> {
        self.inner
            .lock()
            .map_err(|_| sqlx::Error::Protocol("in-memory bookmark store poisoned".into()))
    }
}

#[async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    async fn list(&self) -> Result<Vec<Bookmark>, sqlx::Error> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Bookmark>, sqlx::Error> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn create(&self, input: &CreateBookmark) -> Result<Bookmark, sqlx::Error> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let bookmark = Bookmark {
            id: inner.last_id,
            title: input.title.clone(),
            url: input.url.clone(),
            rating: input.rating,
            description: input.description.clone().unwrap_or_default(),
        };
        inner.rows.insert(bookmark.id, bookmark.clone());
        Ok(bookmark)
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateBookmark,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        let mut inner = self.lock()?;
        Ok(inner.rows.get_mut(&id).map(|row| {
            row.apply(input);
            row.clone()
        }))
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        self.lock().map(|_| ())
    }
}
