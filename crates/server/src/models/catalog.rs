//! Catalog entity models: services and testimonials.
//!
//! Unlike content sections, catalog entities have their own generated
//! identity and are created, updated (partial merge), and deleted through
//! explicit calls addressed by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ruhiya_core::{ServiceId, TestimonialId};

/// A therapy offering listed on the public site.
///
/// `sort_order` drives the public listing order (ascending, stable).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a service. Title is required and must be non-empty;
/// it defaults on the wire so an absent title reaches validation (and gets
/// a 400) instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Listing position; defaults to 0 when not supplied.
    #[serde(rename = "order", default)]
    pub sort_order: i32,
}

/// Partial update for a service: only fields present in the request
/// overwrite existing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// A client testimonial shown on the public site. Listed in insertion order.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub service_label: String,
    pub text: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a testimonial. Name and text are required; both
/// default on the wire so absence surfaces as a validation error, not a
/// deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service_label: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image_url: String,
}

/// Partial update for a testimonial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_service_defaults() {
        let svc: NewService = serde_json::from_str(r#"{"title":"Therapy A"}"#).unwrap();
        assert_eq!(svc.title, "Therapy A");
        assert_eq!(svc.sort_order, 0);
        assert_eq!(svc.subtitle, "");
    }

    #[test]
    fn test_new_service_order_wire_name() {
        let svc: NewService =
            serde_json::from_str(r#"{"title":"Therapy A","order":3}"#).unwrap();
        assert_eq!(svc.sort_order, 3);
    }

    #[test]
    fn test_service_patch_absent_fields_are_none() {
        let patch: ServicePatch =
            serde_json::from_str(r#"{"description":"new text"}"#).unwrap();
        assert_eq!(patch.description.as_deref(), Some("new text"));
        assert!(patch.title.is_none());
        assert!(patch.sort_order.is_none());
    }

    #[test]
    fn test_new_service_missing_title_deserializes_blank() {
        // An absent title must reach the validator, not fail as a 422
        let svc: NewService = serde_json::from_str("{}").unwrap();
        assert_eq!(svc.title, "");
    }

    #[test]
    fn test_new_testimonial_missing_fields_deserialize_blank() {
        let t: NewTestimonial = serde_json::from_str(r#"{"name":"A."}"#).unwrap();
        assert_eq!(t.name, "A.");
        assert_eq!(t.text, "");

        let t: NewTestimonial = serde_json::from_str("{}").unwrap();
        assert_eq!(t.name, "");
    }
}
