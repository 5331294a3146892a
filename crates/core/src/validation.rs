//! Field rules for bookmark create and update payloads.
//!
//! Payloads arrive with every field optional so that a missing field can be
//! reported by name instead of as a generic deserialization failure. The
//! validators turn them into [`ValidBookmark`] / [`ValidPatch`], whose fields
//! are guaranteed to satisfy the storage invariants.

use serde::Deserialize;
use serde_json::Value;
use validator::ValidateUrl;

use crate::error::CoreError;
use crate::types::Rating;

/// Lowest accepted rating.
pub const RATING_MIN: Rating = 0;
/// Highest accepted rating.
pub const RATING_MAX: Rating = 5;

pub const URL_INVALID: &str = "url must be valid";
pub const RATING_INVALID: &str = "rating must be a number between 0 and 5";
pub const PATCH_EMPTY: &str =
    "Request body must contain either 'title', 'url', 'rating' or 'description'";

/// Raw body of `POST /bookmarks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkInput {
    pub title: Option<String>,
    pub url: Option<String>,
    /// Kept as a raw JSON value so that strings and fractions can be rejected
    /// with the rating message rather than a type error.
    pub rating: Option<Value>,
    pub description: Option<String>,
}

/// Raw body of `PATCH /bookmarks/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<Value>,
    pub description: Option<String>,
}

/// A create payload that passed [`validate_new_bookmark`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBookmark {
    pub title: String,
    pub url: String,
    pub rating: Rating,
    pub description: Option<String>,
}

/// An update payload that passed [`validate_bookmark_update`].
///
/// At least one field is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<Rating>,
    pub description: Option<String>,
}

/// Validate a create payload.
///
/// Checks run in a fixed order and stop at the first failure:
/// presence of `title`, `url`, `rating`; then url shape; then rating range.
pub fn validate_new_bookmark(input: &BookmarkInput) -> Result<ValidBookmark, CoreError> {
    let title = present_text(input.title.as_deref()).ok_or_else(|| required("title"))?;
    let url = present_text(input.url.as_deref()).ok_or_else(|| required("url"))?;
    let rating = input
        .rating
        .as_ref()
        .filter(|v| !v.is_null())
        .ok_or_else(|| required("rating"))?;

    let url = check_url(url)?;
    let rating = check_rating(rating)?;

    Ok(ValidBookmark {
        title: title.to_string(),
        url,
        rating,
        description: input.description.clone(),
    })
}

/// Validate a partial update payload.
///
/// Rejects a payload that supplies none of the four fields, then applies the
/// create rules to whichever fields were supplied.
pub fn validate_bookmark_update(patch: &BookmarkPatch) -> Result<ValidPatch, CoreError> {
    let rating = patch.rating.as_ref().filter(|v| !v.is_null());

    if patch.title.is_none() && patch.url.is_none() && rating.is_none() && patch.description.is_none()
    {
        return Err(CoreError::Validation(PATCH_EMPTY.to_string()));
    }

    let title = match patch.title.as_deref() {
        Some(raw) => Some(
            present_text(Some(raw))
                .ok_or_else(|| required("title"))?
                .to_string(),
        ),
        None => None,
    };
    let url = match patch.url.as_deref() {
        Some(raw) => Some(check_url(raw)?),
        None => None,
    };
    let rating = rating.map(check_rating).transpose()?;

    Ok(ValidPatch {
        title,
        url,
        rating,
        description: patch.description.clone(),
    })
}

/// Whether `candidate` is an absolute `http`/`https` URL with a host.
pub fn is_web_url(candidate: &str) -> bool {
    let lower = candidate.to_ascii_lowercase();
    let has_web_scheme = ["http://", "https://"]
        .iter()
        .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len());

    has_web_scheme
        && !candidate.chars().any(char::is_whitespace)
        && candidate.to_string().validate_url()
}

fn present_text(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn required(field: &str) -> CoreError {
    CoreError::Validation(format!("{field} is required"))
}

fn check_url(raw: &str) -> Result<String, CoreError> {
    let url = raw.trim();
    if is_web_url(url) {
        Ok(url.to_string())
    } else {
        Err(CoreError::Validation(URL_INVALID.to_string()))
    }
}

fn check_rating(value: &Value) -> Result<Rating, CoreError> {
    let integral = value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    });

    integral
        .filter(|n| (i64::from(RATING_MIN)..=i64::from(RATING_MAX)).contains(n))
        .and_then(|n| Rating::try_from(n).ok())
        .ok_or_else(|| CoreError::Validation(RATING_INVALID.to_string()))
}
