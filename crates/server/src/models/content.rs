//! Content section models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ruhiya_core::{ContentSectionId, SectionKey};

/// A named singleton block of editable page content.
///
/// Identity is the section key, not the generated id: there is at most one
/// row per key, and edits replace the row in place.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub id: ContentSectionId,
    pub section: SectionKey,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable fields of a content section, as submitted by the admin UI.
///
/// An upsert replaces all four fields; there is no field-level patch for
/// sections, so the caller submits the full current object and omitted
/// fields land as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_section_fields_omitted_fields_default_empty() {
        let fields: SectionFields = serde_json::from_str(r#"{"title":"About Me"}"#).unwrap();
        assert_eq!(fields.title, "About Me");
        assert_eq!(fields.subtitle, "");
        assert_eq!(fields.body, "");
        assert_eq!(fields.image_url, "");
    }

    #[test]
    fn test_section_fields_camel_case_wire_names() {
        let fields: SectionFields =
            serde_json::from_str(r#"{"title":"T","imageUrl":"/uploads/x.png"}"#).unwrap();
        assert_eq!(fields.image_url, "/uploads/x.png");

        let json = serde_json::to_value(&fields).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("image_url").is_none());
    }
}
