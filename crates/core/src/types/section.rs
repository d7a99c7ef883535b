//! Section key type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SectionKey`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SectionKeyError {
    /// The input string is empty after trimming.
    #[error("section key cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("section key must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The unique, case-insensitive key of a content section.
///
/// Section keys name singleton blocks of editable page content ("about",
/// "hero", ...) and tag revision-log entries. They are the identity of a
/// content section - there is at most one section record per key - so they
/// are normalized (trimmed, lower-cased) at the boundary and compared
/// exactly thereafter.
///
/// The catalog collections use the fixed keys [`SectionKey::SERVICES`] and
/// [`SectionKey::TESTIMONIALS`] when tagging revisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SectionKey(String);

impl SectionKey {
    /// Maximum length of a section key.
    pub const MAX_LENGTH: usize = 64;

    /// Revision tag for the service catalog.
    pub const SERVICES: &'static str = "services";

    /// Revision tag for the testimonial catalog.
    pub const TESTIMONIALS: &'static str = "testimonials";

    /// Parse a `SectionKey` from a string, trimming and lower-casing.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after trimming or longer
    /// than [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, SectionKeyError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(SectionKeyError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SectionKeyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_lowercase()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `SectionKey` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SectionKey {
    type Err = SectionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SectionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for SectionKey {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for SectionKey {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed normalized
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for SectionKey {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let key = SectionKey::parse("About").unwrap();
        assert_eq!(key.as_str(), "about");
    }

    #[test]
    fn test_parse_trims() {
        let key = SectionKey::parse("  hero ").unwrap();
        assert_eq!(key.as_str(), "hero");
    }

    #[test]
    fn test_normalized_keys_are_equal() {
        let a = SectionKey::parse("HERO").unwrap();
        let b = SectionKey::parse("hero").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(SectionKey::parse(""), Err(SectionKeyError::Empty)));
        assert!(matches!(
            SectionKey::parse("   "),
            Err(SectionKeyError::Empty)
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(65);
        assert!(matches!(
            SectionKey::parse(&long),
            Err(SectionKeyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let key = SectionKey::parse("journey").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"journey\"");
    }
}
