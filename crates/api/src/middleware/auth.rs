//! Static bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use bookmarks_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured API token.
///
/// Use this as the first extractor parameter of any handler that requires
/// authentication, so the token is checked before the body is read:
///
/// ```ignore
/// async fn my_handler(_auth: RequireApiToken) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireApiToken;

impl FromRequestParts<AppState> for RequireApiToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        if !tokens_match(token.trim(), &state.config.api_token) {
            return Err(unauthorized("Invalid API token"));
        }

        Ok(RequireApiToken)
    }
}

fn unauthorized(reason: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(reason.into()))
}

/// Length-independent comparison so response timing does not reveal how
/// much of the token matched.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    let mut diff = a.len() ^ b.len();
    for (i, byte) in b.iter().enumerate() {
        diff |= usize::from(a.get(i).copied().unwrap_or(0) ^ byte);
    }
    diff == 0
}
