use std::sync::Arc;

use bookmarks_db::repositories::BookmarkStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Bookmark storage (PostgreSQL or in-memory).
    pub store: Arc<dyn BookmarkStore>,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
