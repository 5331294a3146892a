/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Bookmark ratings are small integers; see [`crate::validation::RATING_MAX`].
pub type Rating = i32;
