//! Catalog repositories: services and testimonials.
//!
//! Updates are partial merges: `COALESCE` keeps the stored value for any
//! field absent from the patch, in one atomic row update.

use sqlx::PgPool;

use ruhiya_core::{ServiceId, TestimonialId};

use super::RepositoryError;
use crate::models::{
    NewService, NewTestimonial, Service, ServicePatch, Testimonial, TestimonialPatch,
};

/// Repository for service database operations.
pub struct ServiceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ServiceRepository<'a> {
    /// Create a new service repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all services, ordered by `sort_order` ascending (id breaks ties
    /// so the listing is stable).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Service>, RepositoryError> {
        let rows = sqlx::query_as::<_, Service>(
            r"
            SELECT id, title, subtitle, description, image_url, sort_order,
                   created_at, updated_at
            FROM service
            ORDER BY sort_order ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a new service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewService) -> Result<Service, RepositoryError> {
        let row = sqlx::query_as::<_, Service>(
            r"
            INSERT INTO service (title, subtitle, description, image_url, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, subtitle, description, image_url, sort_order,
                      created_at, updated_at
            ",
        )
        .bind(&new.title)
        .bind(&new.subtitle)
        .bind(&new.description)
        .bind(&new.image_url)
        .bind(new.sort_order)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Apply a partial update to a service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the service doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ServiceId,
        patch: &ServicePatch,
    ) -> Result<Service, RepositoryError> {
        let row = sqlx::query_as::<_, Service>(
            r"
            UPDATE service
            SET title       = COALESCE($2, title),
                subtitle    = COALESCE($3, subtitle),
                description = COALESCE($4, description),
                image_url   = COALESCE($5, image_url),
                sort_order  = COALESCE($6, sort_order),
                updated_at  = now()
            WHERE id = $1
            RETURNING id, title, subtitle, description, image_url, sort_order,
                      created_at, updated_at
            ",
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.subtitle.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.image_url.as_deref())
        .bind(patch.sort_order)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row)
    }

    /// Delete a service permanently. No tombstone, no revision.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the service doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM service WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Repository for testimonial database operations.
pub struct TestimonialRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TestimonialRepository<'a> {
    /// Create a new testimonial repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all testimonials in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, Testimonial>(
            r"
            SELECT id, name, service_label, text, image_url, created_at, updated_at
            FROM testimonial
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a new testimonial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewTestimonial) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as::<_, Testimonial>(
            r"
            INSERT INTO testimonial (name, service_label, text, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, service_label, text, image_url, created_at, updated_at
            ",
        )
        .bind(&new.name)
        .bind(&new.service_label)
        .bind(&new.text)
        .bind(&new.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Apply a partial update to a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: TestimonialId,
        patch: &TestimonialPatch,
    ) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as::<_, Testimonial>(
            r"
            UPDATE testimonial
            SET name          = COALESCE($2, name),
                service_label = COALESCE($3, service_label),
                text          = COALESCE($4, text),
                image_url     = COALESCE($5, image_url),
                updated_at    = now()
            WHERE id = $1
            RETURNING id, name, service_label, text, image_url, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.service_label.as_deref())
        .bind(patch.text.as_deref())
        .bind(patch.image_url.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row)
    }

    /// Delete a testimonial permanently. No tombstone, no revision.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: TestimonialId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM testimonial WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
