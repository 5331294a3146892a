//! Repository layer.
//!
//! [`BookmarkRepo`] is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. [`BookmarkStore`] is the seam the
//! HTTP layer talks to, so handlers can run against PostgreSQL or the
//! in-memory store.

use async_trait::async_trait;
use bookmarks_core::types::DbId;

use crate::models::bookmark::{Bookmark, CreateBookmark, UpdateBookmark};

pub mod bookmark_repo;
pub mod memory;

pub use bookmark_repo::{BookmarkRepo, PgBookmarkStore};
pub use memory::InMemoryBookmarkStore;

/// Storage operations for the `bookmarks` resource.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks, ordered by id.
    async fn list(&self) -> Result<Vec<Bookmark>, sqlx::Error>;

    /// A single bookmark, or `None` if no row has this id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Bookmark>, sqlx::Error>;

    /// Insert a bookmark and return it with its generated id.
    async fn create(&self, input: &CreateBookmark) -> Result<Bookmark, sqlx::Error>;

    /// Delete a bookmark. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Apply the non-`None` fields of `input`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    async fn update(
        &self,
        id: DbId,
        input: &UpdateBookmark,
    ) -> Result<Option<Bookmark>, sqlx::Error>;

    /// Check that the backing storage is reachable.
    async fn health_check(&self) -> Result<(), sqlx::Error>;
}
