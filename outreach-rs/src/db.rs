//! SQLite pool setup and row helpers

use crate::error::{OutreachError, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

/// Open a pool, creating the database file if needed
///
/// In-memory databases are limited to one connection so every query sees
/// the same database.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
    debug!("Opening {} with {} connection(s)", database_url, max_connections);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Parse an RFC 3339 column value
pub(crate) fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| OutreachError::Parse(format!("Invalid {} date: {}", column, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("2024-03-01T12:00:00+00:00", "updated_at").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T12:00:00+00:00");

        let err = parse_timestamp("yesterday", "updated_at").unwrap_err();
        assert!(err.to_string().contains("updated_at"));
    }

    #[tokio::test]
    async fn test_connect_in_memory() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let (one,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one, 1);
    }
}
