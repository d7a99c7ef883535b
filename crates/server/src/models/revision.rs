//! Revision log models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use ruhiya_core::RevisionId;

/// An immutable snapshot of one edit to a content section or catalog
/// entity.
///
/// `content` is deliberately schema-free: the log holds heterogeneous
/// shapes (section fields, service fields, testimonial fields) in one
/// collection, so the snapshot is an opaque JSON value, not a fixed record
/// type. `reference_id` is an informational pointer into the referenced
/// collection and is never validated against it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: RevisionId,
    pub section: String,
    pub reference_id: Option<i32>,
    pub content: JsonValue,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_wire_names() {
        let rev = Revision {
            id: RevisionId::new(1),
            section: "services".to_string(),
            reference_id: Some(9),
            content: serde_json::json!({"title": "Therapy A"}),
            updated_by: "Admin".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&rev).unwrap();
        assert_eq!(json["referenceId"], 9);
        assert_eq!(json["updatedBy"], "Admin");
        assert!(json.get("createdAt").is_some());
    }
}
