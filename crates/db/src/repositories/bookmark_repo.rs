//! Repository for the `bookmarks` table.

use async_trait::async_trait;
use bookmarks_core::types::DbId;
use sqlx::PgPool;

use super::BookmarkStore;
use crate::models::bookmark::{Bookmark, CreateBookmark, UpdateBookmark};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, url, rating, description";

/// Provides CRUD operations for bookmarks.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Insert a new bookmark, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBookmark) -> Result<Bookmark, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookmarks (title, url, rating, description)
             VALUES ($1, $2, $3, COALESCE($4, ''))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.rating)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a bookmark by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bookmark>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks WHERE id = $1");
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bookmarks ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Bookmark>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks ORDER BY id");
        sqlx::query_as::<_, Bookmark>(&query).fetch_all(pool).await
    }

    /// Update a bookmark. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBookmark,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        let query = format!(
            "UPDATE bookmarks SET
                title = COALESCE($2, title),
                url = COALESCE($3, url),
                rating = COALESCE($4, rating),
                description = COALESCE($5, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(input.rating)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a bookmark by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`BookmarkStore`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgBookmarkStore {
    pool: PgPool,
}

impl PgBookmarkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkStore for PgBookmarkStore {
    async fn list(&self) -> Result<Vec<Bookmark>, sqlx::Error> {
        BookmarkRepo::list(&self.pool).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Bookmark>, sqlx::Error> {
        BookmarkRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, input: &CreateBookmark) -> Result<Bookmark, sqlx::Error> {
        BookmarkRepo::create(&self.pool, input).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        BookmarkRepo::delete(&self.pool, id).await
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateBookmark,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        BookmarkRepo::update(&self.pool, id, input).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
