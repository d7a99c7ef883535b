//! Database operations for the Ruhiya `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `admin_user` - Admin credential store (email + password hash)
//! - `content_section` - Named singleton content blocks, keyed by section
//! - `service` / `testimonial` - Catalog entities with generated ids
//! - `revision` - Append-only edit history (JSONB snapshots)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p ruhiya-cli -- migrate
//! ```
//!
//! Queries use the runtime-checked sqlx API (`query_as::<_, T>`) so the
//! workspace builds without a live database.

pub mod admins;
pub mod catalog;
pub mod content;
pub mod revisions;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use catalog::{ServiceRepository, TestimonialRepository};
pub use content::ContentRepository;
pub use revisions::RevisionRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
