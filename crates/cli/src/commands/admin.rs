//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin account
//! ruhiya-cli admin create -e admin@example.com -p <password>
//!
//! # Rotate an existing admin's password
//! ruhiya-cli admin set-password -e admin@example.com -p <password>
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

use ruhiya_core::{Email, EmailError};
use ruhiya_server::db::{AdminRepository, RepositoryError};
use ruhiya_server::services::auth::{AuthError, hash_password};

/// Errors that can occur during admin account operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error (conflict, not found, query failure).
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password hashing error.
    #[error("Password hashing failed: {0}")]
    Hash(#[from] AuthError),

    /// No admin account with the given email.
    #[error("No admin account with email: {0}")]
    NoSuchAccount(String),
}

/// Create a new admin account.
///
/// # Errors
///
/// Returns `AdminError::Repository` with a conflict when the email is
/// already registered.
pub async fn create_account(email: &str, password: &str) -> Result<i32, AdminError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;

    let password_hash = hash_password(password)?;

    let admin = AdminRepository::new(&pool)
        .create(&email, &password_hash)
        .await?;

    tracing::info!("Created admin account {} (id {})", email, admin.id);
    Ok(admin.id.as_i32())
}

/// Rotate the password of an existing admin account.
///
/// # Errors
///
/// Returns `AdminError::NoSuchAccount` when no admin has the given email.
pub async fn set_password(email: &str, password: &str) -> Result<(), AdminError> {
    let email = Email::parse(email)?;
    let pool = connect().await?;

    let repo = AdminRepository::new(&pool);

    let (admin, _) = repo
        .get_with_password_hash(&email)
        .await?
        .ok_or_else(|| AdminError::NoSuchAccount(email.to_string()))?;

    let password_hash = hash_password(password)?;
    repo.update_password_hash(admin.id, &password_hash).await?;

    tracing::info!("Password updated for {}", email);
    Ok(())
}

async fn connect() -> Result<PgPool, AdminError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| AdminError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(PgPool::connect(&database_url).await?)
}
