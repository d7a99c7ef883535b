//! Content section repository.

use sqlx::PgPool;

use ruhiya_core::SectionKey;

use super::RepositoryError;
use crate::models::{ContentSection, SectionFields};

/// Repository for content section database operations.
pub struct ContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all content sections, sorted by section key ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ContentSection>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContentSection>(
            r"
            SELECT id, section, title, subtitle, body, image_url, created_at, updated_at
            FROM content_section
            ORDER BY section ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get one content section by its key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, key: &SectionKey) -> Result<Option<ContentSection>, RepositoryError> {
        let row = sqlx::query_as::<_, ContentSection>(
            r"
            SELECT id, section, title, subtitle, body, image_url, created_at, updated_at
            FROM content_section
            WHERE section = $1
            ",
        )
        .bind(key)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Upsert a content section: replace all four fields if the key exists,
    /// otherwise create a new row. A single logical write - the unique
    /// constraint on `section` guarantees at most one row per key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        key: &SectionKey,
        fields: &SectionFields,
    ) -> Result<ContentSection, RepositoryError> {
        let row = sqlx::query_as::<_, ContentSection>(
            r"
            INSERT INTO content_section (section, title, subtitle, body, image_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (section) DO UPDATE
            SET title = $2, subtitle = $3, body = $4, image_url = $5, updated_at = now()
            RETURNING id, section, title, subtitle, body, image_url, created_at, updated_at
            ",
        )
        .bind(key)
        .bind(&fields.title)
        .bind(&fields.subtitle)
        .bind(&fields.body)
        .bind(&fields.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }
}
