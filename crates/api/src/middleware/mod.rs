//! Request extractors that guard handlers.
//!
//! - [`auth::RequireApiToken`] -- Requires `Authorization: Bearer <API_TOKEN>`.

pub mod auth;
