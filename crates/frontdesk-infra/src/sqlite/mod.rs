//! SQLite persistence via sqlx with split reader/writer pools.

pub mod appointment;
pub mod chat;
pub mod contact;
pub mod pool;

use chrono::{DateTime, Utc};
use frontdesk_types::error::RepositoryError;

// Timestamps are stored as RFC 3339 text, which sorts correctly for
// the `ORDER BY created_at` / `last_updated` queries in this module.

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
