//! Revision log repository.
//!
//! The log is append-only: rows are inserted on successful content writes
//! and never updated. Deletion happens only through the explicit purge
//! operations on the history surface.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use ruhiya_core::RevisionId;

use super::RepositoryError;
use crate::models::Revision;

/// Maximum number of revisions returned by a history query.
pub const HISTORY_PAGE_SIZE: i64 = 50;

/// Repository for revision log database operations.
pub struct RevisionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RevisionRepository<'a> {
    /// Create a new revision repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a revision snapshot.
    ///
    /// `reference_id` is stored as-is; it is an informational pointer and
    /// is not validated against the referenced collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn append(
        &self,
        section: &str,
        reference_id: Option<i32>,
        content: &JsonValue,
        updated_by: &str,
    ) -> Result<Revision, RepositoryError> {
        let row = sqlx::query_as::<_, Revision>(
            r"
            INSERT INTO revision (section, reference_id, content, updated_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, section, reference_id, content, updated_by, created_at
            ",
        )
        .bind(section)
        .bind(reference_id)
        .bind(content)
        .bind(updated_by)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// List revisions newest-first, optionally filtered to one section,
    /// capped at [`HISTORY_PAGE_SIZE`]. The id tiebreak keeps the order
    /// deterministic for revisions created in the same instant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, section: Option<&str>) -> Result<Vec<Revision>, RepositoryError> {
        let rows = sqlx::query_as::<_, Revision>(
            r"
            SELECT id, section, reference_id, content, updated_by, created_at
            FROM revision
            WHERE $1::text IS NULL OR section = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(section)
        .bind(HISTORY_PAGE_SIZE)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete one revision by id.
    ///
    /// Returns whether a row was actually removed. Deleting a missing id
    /// is not an error - the history surface treats it as success, since
    /// the admin UI issues deletes from a possibly-stale listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: RevisionId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM revision WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every revision. Irreversible; idempotent on an empty log.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM revision").execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}
