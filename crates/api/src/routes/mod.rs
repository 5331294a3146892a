pub mod bookmark;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /bookmarks                 list, create
/// /bookmarks/{id}            get, delete, patch
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/bookmarks", bookmark::router())
}
