//! SQLite comment repository implementation.
//!
//! Implements `CommentRepository` from `chatboard-core` using sqlx with split
//! read/write pools. Timestamps are stored as fixed-width RFC 3339 strings
//! (nanosecond precision, `Z` suffix) so that text ordering matches time
//! ordering.

use chatboard_core::repository::comment::CommentRepository;
use chatboard_types::comment::Comment;
use chatboard_types::error::RepositoryError;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CommentRepository`.
pub struct SqliteCommentRepository {
    pool: DatabasePool,
}

impl SqliteCommentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct CommentRow {
    id: String,
    text: String,
    name: String,
    tab: String,
    time: String,
}

impl CommentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            text: row.try_get("text")?,
            name: row.try_get("name")?,
            tab: row.try_get("tab")?,
            time: row.try_get("time")?,
        })
    }

    fn into_comment(self) -> Result<Comment, RepositoryError> {
        Ok(Comment {
            id: parse_uuid(&self.id)?,
            text: self.text,
            name: self.name,
            tab: self.tab,
            time: parse_datetime(&self.time)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_uuid(s: &str) -> Result<Uuid, RepositoryError> {
    s.parse::<Uuid>()
        .map_err(|e| RepositoryError::Query(format!("invalid UUID: {e}")))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

// ---------------------------------------------------------------------------
// CommentRepository impl
// ---------------------------------------------------------------------------

impl CommentRepository for SqliteCommentRepository {
    async fn insert_comment(&self, comment: &Comment) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO comments (id, text, name, tab, time) VALUES (?, ?, ?, ?, ?)")
            .bind(comment.id.to_string())
            .bind(&comment.text)
            .bind(&comment.name)
            .bind(&comment.tab)
            .bind(format_datetime(&comment.time))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_by_tab(&self, tab: &str) -> Result<Vec<Comment>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id, text, name, tab, time FROM comments
               WHERE tab = ?
               ORDER BY time DESC, id DESC"#,
        )
        .bind(tab)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = CommentRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            comments.push(r.into_comment()?);
        }
        Ok(comments)
    }

    async fn list_tabs(&self) -> Result<Vec<(String, i64)>, RepositoryError> {
        let rows = sqlx::query("SELECT tab, COUNT(*) AS count FROM comments GROUP BY tab ORDER BY tab")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let tab: String = row.try_get("tab")?;
                let count: i64 = row.try_get("count")?;
                Ok((tab, count))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
