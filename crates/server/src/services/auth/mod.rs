//! Authentication service.
//!
//! Verifies email/password pairs against the credential store and issues
//! signed, time-limited bearer tokens. Protected routes verify tokens
//! through [`verify_token`] before any store access.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use ruhiya_core::{AdminUserId, Email};

use crate::db::AdminRepository;
use crate::models::CurrentAdmin;

/// Claims embedded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin identity id.
    pub sub: i32,
    /// Admin email at issue time.
    pub email: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch. Checked by [`verify_token`].
    pub exp: i64,
}

/// A freshly issued bearer token with its nominal lifetime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    /// Seconds until expiry.
    pub expires_in: i64,
}

/// Authentication service.
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
    jwt_secret: &'a SecretString,
    token_expiry_days: i64,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, jwt_secret: &'a SecretString, token_expiry_days: i64) -> Self {
        Self {
            admins: AdminRepository::new(pool),
            jwt_secret,
            token_expiry_days,
        }
    }

    /// Login with email and password, yielding a bearer token.
    ///
    /// The email is normalized (lower-cased) before lookup. "No such
    /// identity" and "hash mismatch" both return `InvalidCredentials` -
    /// the caller must not be able to tell which emails are registered.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is
    /// wrong, `AuthError::Repository` on store failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let email = Email::parse(email)?;

        let (admin, password_hash) = self
            .admins
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        issue_token(admin.id, &admin.email, self.jwt_secret, self.token_expiry_days)
    }
}

/// Issue a signed bearer token for an admin identity.
///
/// # Errors
///
/// Returns `AuthError::TokenEncoding` if signing fails.
pub fn issue_token(
    id: AdminUserId,
    email: &Email,
    secret: &SecretString,
    expiry_days: i64,
) -> Result<IssuedToken, AuthError> {
    let now = Utc::now();
    let expires_in = Duration::days(expiry_days);

    let claims = Claims {
        sub: id.as_i32(),
        email: email.as_str().to_owned(),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(AuthError::TokenEncoding)?;

    Ok(IssuedToken {
        token,
        expires_in: expires_in.num_seconds(),
    })
}

/// Verify a bearer token and yield the embedded identity.
///
/// Signature and expiry are both checked; every failure mode (malformed,
/// expired, bad signature) maps to the same `InvalidToken`.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` on any verification failure.
pub fn verify_token(token: &str, secret: &SecretString) -> Result<CurrentAdmin, AuthError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    let email = Email::parse(&data.claims.email).map_err(|_| AuthError::InvalidToken)?;

    Ok(CurrentAdmin {
        id: AdminUserId::new(data.claims.sub),
        email,
    })
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password doesn't match.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_secret() -> SecretString {
        SecretString::from("kQ9#mZ2$vX7!pL4&wN8*rT1@yB5^cF3%")
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correct horse battery").unwrap();
        let result = verify_password("wrong password", &hash);
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_verify_garbage_hash() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_token_roundtrip() {
        let secret = test_secret();
        let email = Email::parse("admin@ruhiya.com").unwrap();
        let issued = issue_token(AdminUserId::new(1), &email, &secret, 7).unwrap();

        assert_eq!(issued.expires_in, 7 * 24 * 60 * 60);

        let admin = verify_token(&issued.token, &secret).unwrap();
        assert_eq!(admin.id, AdminUserId::new(1));
        assert_eq!(admin.email.as_str(), "admin@ruhiya.com");
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let result = verify_token("not.a.token", &test_secret());
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let email = Email::parse("admin@ruhiya.com").unwrap();
        let issued = issue_token(AdminUserId::new(1), &email, &test_secret(), 7).unwrap();

        let other = SecretString::from("zW6&hJ3!nM9#qD2$xK8*vG5@tR1^bY4%");
        let result = verify_token(&issued.token, &other);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_expired() {
        let secret = test_secret();
        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            email: "admin@ruhiya.com".to_string(),
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .unwrap();

        let result = verify_token(&token, &secret);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
