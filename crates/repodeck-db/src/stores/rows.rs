//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, NaiveDateTime, Utc};
use repodeck_core::{StoreError, TrackedRepo, User};
use sqlx::Row;

/// Shared SELECT column list for tracked repository queries.
pub const REPO_SELECT_COLUMNS: &str = "id, user_id, name, full_name, owner, url, description, stars, forks, open_issues, source_created_at, source_updated_at, language, default_branch, last_refreshed";

/// Helper to parse datetime strings that may have a "UTC" suffix.
pub fn parse_datetime(datetime_str: Option<String>) -> Option<DateTime<Utc>> {
    datetime_str.and_then(|s| {
        let trimmed = s.trim_end_matches(" UTC");
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
            .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
            .ok()
    })
}

fn get<'r, T>(row: &'r sqlx::sqlite::SqliteRow, column: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| StoreError::Storage(e.to_string()))
}

/// Parse a database row into a `TrackedRepo`.
pub fn row_to_repo(row: &sqlx::sqlite::SqliteRow) -> Result<TrackedRepo, StoreError> {
    Ok(TrackedRepo {
        id: get(row, "id")?,
        user_id: get(row, "user_id")?,
        name: get(row, "name")?,
        full_name: get(row, "full_name")?,
        owner: get(row, "owner")?,
        url: get(row, "url")?,
        description: get(row, "description")?,
        stars: get(row, "stars")?,
        forks: get(row, "forks")?,
        open_issues: get(row, "open_issues")?,
        created_at: parse_datetime(get(row, "source_created_at")?),
        updated_at: parse_datetime(get(row, "source_updated_at")?),
        language: get(row, "language")?,
        default_branch: get(row, "default_branch")?,
        last_refreshed: parse_datetime(get(row, "last_refreshed")?),
    })
}

/// Parse a database row into a `User`.
pub fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, StoreError> {
    let created_at: Option<String> = get(row, "created_at")?;
    Ok(User {
        id: get(row, "id")?,
        email: get(row, "email")?,
        password_hash: get(row, "password_hash")?,
        created_at: parse_datetime(created_at).unwrap_or_else(Utc::now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_datetime_accepts_utc_suffix() {
        let parsed = parse_datetime(Some("2024-03-01 12:30:00 UTC".to_string())).unwrap();
        assert_eq!(parsed.to_string(), "2024-03-01 12:30:00 UTC");
    }

    #[test]
    fn parse_datetime_accepts_fractional_seconds() {
        assert!(parse_datetime(Some("2024-03-01 12:30:00.123456 UTC".to_string())).is_some());
    }

    #[test]
    fn parse_datetime_rejects_garbage() {
        assert!(parse_datetime(Some("not a date".to_string())).is_none());
        assert!(parse_datetime(None).is_none());
    }
}
