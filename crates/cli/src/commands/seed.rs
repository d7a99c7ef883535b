//! Database seeding command.
//!
//! Creates the admin account from `ADMIN_EMAIL` / `ADMIN_PASSWORD` and
//! the initial set of empty content sections. Existing sections are
//! left untouched, so re-running the seed never clobbers live content.
//! Seeding writes no revisions.
//!
//! # Usage
//!
//! ```bash
//! ruhiya-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `ADMIN_EMAIL` / `ADMIN_PASSWORD` - Initial admin credentials

use sqlx::PgPool;
use thiserror::Error;

use ruhiya_core::{Email, EmailError, SectionKey, SectionKeyError};
use ruhiya_server::db::{AdminRepository, ContentRepository, RepositoryError};
use ruhiya_server::models::SectionFields;
use ruhiya_server::services::auth::{AuthError, hash_password};

/// Section keys created (empty) on first seed.
const INITIAL_SECTIONS: &[&str] = &[
    "hero",
    "about",
    "therapy",
    "services",
    "testimonials",
    "journey",
];

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid admin email.
    #[error("Invalid admin email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid section key.
    #[error("Invalid section key: {0}")]
    InvalidSection(#[from] SectionKeyError),

    /// Password hashing error.
    #[error("Password hashing failed: {0}")]
    Hash(#[from] AuthError),
}

/// Seed the admin account and initial content sections.
///
/// The admin password is re-hashed and applied on every run, so the
/// seed doubles as a recovery path for a lost admin password.
///
/// # Errors
///
/// Returns `SeedError` if configuration is incomplete or any write
/// fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;
    let admin_email =
        std::env::var("ADMIN_EMAIL").map_err(|_| SeedError::MissingEnvVar("ADMIN_EMAIL"))?;
    let admin_password =
        std::env::var("ADMIN_PASSWORD").map_err(|_| SeedError::MissingEnvVar("ADMIN_PASSWORD"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    seed_admin(&pool, &admin_email, &admin_password).await?;
    seed_sections(&pool).await?;

    tracing::info!("Seed completed successfully");
    Ok(())
}

/// Create the admin account, or rotate its password if it exists.
async fn seed_admin(pool: &PgPool, email: &str, password: &str) -> Result<(), SeedError> {
    let email = Email::parse(email)?;
    let password_hash = hash_password(password)?;

    let repo = AdminRepository::new(pool);

    match repo.get_with_password_hash(&email).await? {
        Some((admin, _)) => {
            repo.update_password_hash(admin.id, &password_hash).await?;
            tracing::info!("Admin account {} already exists, password updated", email);
        }
        None => {
            let admin = repo.create(&email, &password_hash).await?;
            tracing::info!("Created admin account {} (id {})", email, admin.id);
        }
    }

    Ok(())
}

/// Create any missing initial sections with empty fields.
async fn seed_sections(pool: &PgPool) -> Result<(), SeedError> {
    let repo = ContentRepository::new(pool);

    for raw in INITIAL_SECTIONS {
        let key = SectionKey::parse(raw)?;

        if repo.get(&key).await?.is_some() {
            tracing::debug!(section = %key, "Section already exists, skipping");
            continue;
        }

        repo.upsert(&key, &SectionFields::default()).await?;
        tracing::info!(section = %key, "Created empty content section");
    }

    Ok(())
}
