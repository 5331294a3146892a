//! Domain types shared by the bookmarks storage and HTTP crates.
//!
//! - [`validation`] -- field presence and value rules for create/update payloads.
//! - [`sanitize`] -- markup stripping applied to free text before it is sent out.

pub mod error;
pub mod sanitize;
pub mod types;
pub mod validation;
