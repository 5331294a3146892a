//! Route definitions for the `/bookmarks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::bookmark;
use crate::state::AppState;

/// Routes mounted at `/bookmarks`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// DELETE /{id}    -> delete
/// PATCH  /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookmark::list).post(bookmark::create))
        .route(
            "/{id}",
            get(bookmark::get_by_id)
                .delete(bookmark::delete)
                .patch(bookmark::update),
        )
}
