//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the [`BookmarkStore`](bookmarks_db::repositories::BookmarkStore)
//! held in [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod bookmark;
