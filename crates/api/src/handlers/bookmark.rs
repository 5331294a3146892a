//! Handlers for the `/bookmarks` resource.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::Json;
use bookmarks_core::error::CoreError;
use bookmarks_core::types::DbId;
use bookmarks_core::validation::{
    validate_bookmark_update, validate_new_bookmark, BookmarkInput, BookmarkPatch,
};
use bookmarks_db::models::bookmark::{CreateBookmark, UpdateBookmark};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireApiToken;
use crate::response::BookmarkResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    tracing::warn!(bookmark_id = id, "Bookmark not found");
    AppError::Core(CoreError::NotFound {
        entity: "Bookmark",
        id,
    })
}

/// Parse the `{id}` segment. Anything that is not an `i64` cannot name a
/// stored bookmark, so it is reported the same way as a missing one.
fn parse_id(path: Result<Path<String>, PathRejection>) -> AppResult<DbId> {
    let Path(raw) = path?;
    raw.parse().map_err(|_| {
        tracing::warn!(bookmark_id = %raw, "Bookmark not found");
        AppError::UnknownId(raw)
    })
}

fn rejected(err: &CoreError) {
    tracing::warn!(error = %err, "Rejected bookmark payload");
}

/// Path of a single bookmark, used for the `Location` header.
pub fn bookmark_location(id: DbId) -> String {
    format!("/bookmarks/{id}")
}

/// GET /bookmarks
pub async fn list(
    _auth: RequireApiToken,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookmarkResponse>>> {
    let bookmarks = state.store.list().await?;
    Ok(Json(bookmarks.into_iter().map(BookmarkResponse::from).collect()))
}

/// GET /bookmarks/{id}
pub async fn get_by_id(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<BookmarkResponse>> {
    let id = parse_id(path)?;
    let bookmark = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(bookmark.into()))
}

/// POST /bookmarks
pub async fn create(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    payload: Result<Json<BookmarkInput>, JsonRejection>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<BookmarkResponse>)> {
    let Json(input) = payload?;
    let valid = validate_new_bookmark(&input).inspect_err(rejected)?;

    let bookmark = state.store.create(&CreateBookmark::from(valid)).await?;
    tracing::info!(bookmark_id = bookmark.id, "Bookmark created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, bookmark_location(bookmark.id))],
        Json(bookmark.into()),
    ))
}

/// DELETE /bookmarks/{id}
pub async fn delete(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = parse_id(path)?;
    if state.store.delete(id).await? {
        tracing::info!(bookmark_id = id, "Bookmark deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PATCH /bookmarks/{id}
///
/// Existence is checked before the body, so an unknown id is a 404 even when
/// the payload is also invalid.
pub async fn update(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<BookmarkPatch>, JsonRejection>,
) -> AppResult<StatusCode> {
    let id = parse_id(path)?;
    if state.store.find_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }

    let Json(patch) = payload?;
    let valid = validate_bookmark_update(&patch).inspect_err(rejected)?;

    state
        .store
        .update(id, &UpdateBookmark::from(valid))
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(bookmark_id = id, "Bookmark updated");

    Ok(StatusCode::NO_CONTENT)
}
